//! Custom `genpdf` elements used by the report layout.

use genpdf::elements::{Image, Paragraph};
use genpdf::error::{Context as _, Error};
use genpdf::style::Style;
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Scale, Size};

use image::GenericImageView;

const IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const CAPTION_SPACING_MM: f64 = 2.0;

fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// A rasterized chart image with a caption stacked underneath.
///
/// The chart is rescaled so its physical width matches the requested
/// millimetres regardless of the pixel density it was rasterized at; a PNG
/// rendered at 2x therefore keeps its size and doubles its dot density.
pub struct CaptionedChart {
    image: Image,
    caption: Paragraph,
    natural_width_mm: f64,
    width_mm: f64,
}

impl CaptionedChart {
    /// Decodes the PNG bytes and prepares the element.
    pub fn from_png(png: &[u8], caption: impl Into<String>, width_mm: f64) -> Result<Self, Error> {
        let decoded =
            image::load_from_memory(png).context("Failed to decode rasterized chart PNG")?;
        let (px_width, _) = decoded.dimensions();
        let natural_width_mm = MM_PER_INCH * f64::from(px_width) / IMAGE_DPI;

        let image = Image::from_dynamic_image(decoded)?;
        let mut caption = Paragraph::new(caption.into());
        caption.set_alignment(Alignment::Center);

        Ok(Self {
            image,
            caption,
            natural_width_mm,
            width_mm,
        })
    }

    fn apply_layout(&mut self) {
        self.image.set_alignment(Alignment::Center);
        if self.natural_width_mm > f64::EPSILON {
            let scale = self.width_mm / self.natural_width_mm;
            self.image.set_scale(Scale::new(scale, scale));
        }
    }
}

impl Element for CaptionedChart {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        self.apply_layout();

        let mut result = RenderResult::default();
        let image_result = self.image.render(context, area.clone(), style)?;
        result.size = result.size.stack_vertical(image_result.size);
        result.has_more |= image_result.has_more;

        let spacing = mm_from_f64(CAPTION_SPACING_MM);
        area.add_offset(Position::new(0, image_result.size.height + spacing));
        result.size = result.size.stack_vertical(Size::new(0, spacing));

        let caption_result = self.caption.render(context, area, style)?;
        result.size = result.size.stack_vertical(caption_result.size);
        result.has_more |= caption_result.has_more;

        Ok(result)
    }
}

/// Thin horizontal rule used to separate the dashboard from the narrative.
pub struct HorizontalRule {
    color: genpdf::style::Color,
    spacing_mm: f64,
}

impl HorizontalRule {
    pub fn new(color: genpdf::style::Color) -> Self {
        Self {
            color,
            spacing_mm: 2.0,
        }
    }
}

impl Element for HorizontalRule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        mut area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let spacing = mm_from_f64(self.spacing_mm);
        let y = spacing / 2.0;
        let width = area.size().width;
        area.draw_line(
            vec![Position::new(0, y), Position::new(width, y)],
            Style::new().with_color(self.color),
        );

        let mut result = RenderResult::default();
        result.size = Size::new(width, spacing);
        Ok(result)
    }
}
