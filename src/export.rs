//! PDF export of a rendered report view.
//!
//! The export trigger consumes exactly one [`ReportView`] subtree and
//! rasterizes it into a paginated document: 0.5 in (12.7 mm) margins on
//! every page, charts embedded at 2x pixel density, and a download-style
//! default file name of `DOT_Report.pdf`.

use std::path::{Path, PathBuf};

use genpdf::elements::{Break, LinearLayout, Paragraph, TableLayout, UnorderedList};
use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Element, Margins, Mm, PageDecorator, Position};

use log::info;

use crate::elements::{CaptionedChart, HorizontalRule};
use crate::fonts;
use crate::markdown::{MarkdownBlock, Span};
use crate::model::format_metric;
use crate::projections::{Scorecard, SummaryTile, Trend};
use crate::render::{ReportView, ViewBlock};

/// Default name of the exported document.
pub const DEFAULT_EXPORT_FILE: &str = "DOT_Report.pdf";

/// Page margin on all four sides: 0.5 in expressed in millimetres.
pub const PAGE_MARGIN_MM: f64 = 12.7;

const POSITIVE_CHANGE: Color = Color::Rgb(0x16, 0xa3, 0x4a);
const NEGATIVE_CHANGE: Color = Color::Rgb(0xdc, 0x26, 0x26);
const MUTED_TEXT: Color = Color::Rgb(0x6b, 0x72, 0x80);

/// Page decorator applying the fixed export margins and a running header
/// with the report heading on every page after the first.
struct SnapshotPageDecorator {
    page: usize,
    heading: String,
}

impl SnapshotPageDecorator {
    fn new(heading: String) -> Self {
        Self { page: 0, heading }
    }
}

impl PageDecorator for SnapshotPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;
        area.add_margins(Margins::trbl(
            PAGE_MARGIN_MM,
            PAGE_MARGIN_MM,
            PAGE_MARGIN_MM,
            PAGE_MARGIN_MM,
        ));

        if self.page > 1 {
            let mut header = Paragraph::new(self.heading.clone())
                .styled(Style::new().with_font_size(9).with_color(MUTED_TEXT));
            let result = header.render(context, area.clone(), style)?;
            area.add_offset(Position::new(0, result.size.height + Mm::from(2.0)));
        }

        Ok(area)
    }
}

fn brand_color(rgb: [u8; 3]) -> Color {
    Color::Rgb(rgb[0], rgb[1], rgb[2])
}

fn span_style(span: &Span) -> Style {
    let mut style = Style::new();
    if span.bold {
        style.set_bold();
    }
    if span.italic {
        style.set_italic();
    }
    style
}

fn paragraph_from_spans(spans: &[Span]) -> Paragraph {
    let mut paragraph = Paragraph::default();
    for span in spans {
        paragraph.push_styled(span.text.clone(), span_style(span));
    }
    paragraph
}

fn heading_style(level: u8, accent: Color) -> Style {
    let size = match level {
        1 => 16,
        2 => 14,
        3 => 12,
        _ => 11,
    };
    let mut style = Style::new().with_font_size(size).with_color(accent);
    style.set_bold();
    style
}

fn scorecard_cell(card: &Scorecard) -> LinearLayout {
    let mut cell = LinearLayout::vertical();
    cell.push(Paragraph::new(card.region.label()).styled(Style::new().with_font_size(10)));
    cell.push(
        Paragraph::new(card.score_label()).styled({
            let mut style = Style::new().with_font_size(16);
            style.set_bold();
            style
        }),
    );
    let change_color = match card.trend() {
        Trend::Positive => POSITIVE_CHANGE,
        Trend::Negative => NEGATIVE_CHANGE,
    };
    cell.push(
        Paragraph::new(card.change_label())
            .styled(Style::new().with_font_size(11).with_color(change_color)),
    );
    cell
}

fn summary_cell(tile: &SummaryTile) -> LinearLayout {
    let mut cell = LinearLayout::vertical();
    cell.push(Paragraph::new(tile.label).styled(Style::new().with_font_size(10)));
    cell.push(
        Paragraph::new(format_metric(tile.value)).styled({
            let mut style = Style::new().with_font_size(14);
            style.set_bold();
            style
        }),
    );
    cell
}

fn four_column_row<E: Element + 'static>(cells: Vec<E>) -> Result<TableLayout, Error> {
    let mut table = TableLayout::new(vec![1, 1, 1, 1]);
    let mut row = table.row();
    for cell in cells {
        row = row.element(cell.padded(Margins::trbl(2.0, 2.0, 2.0, 2.0)));
    }
    row.push()?;
    Ok(table)
}

fn push_narrative_body(layout: &mut LinearLayout, body: &[MarkdownBlock], accent: Color) {
    for block in body {
        match block {
            MarkdownBlock::Heading { level, spans } => {
                layout.push(paragraph_from_spans(spans).styled(heading_style(*level, accent)));
            }
            MarkdownBlock::Paragraph(spans) => {
                layout.push(paragraph_from_spans(spans));
            }
            MarkdownBlock::Bullets(items) => {
                let mut list = UnorderedList::new();
                for item in items {
                    list.push(paragraph_from_spans(item));
                }
                layout.push(list);
            }
        }
        layout.push(Break::new(0.5));
    }
}

/// Assembles the genpdf document for the given view.
pub fn build_document(view: &ReportView) -> Result<genpdf::Document, Error> {
    let font_family = fonts::report_font_family()?;
    let mut document = genpdf::Document::new(font_family);
    document.set_title(view.heading());
    document.set_page_decorator(SnapshotPageDecorator::new(view.heading()));

    let primary = brand_color(view.brand.primary);
    let secondary = brand_color(view.brand.secondary);

    let mut title = Paragraph::new(view.heading());
    title.set_alignment(Alignment::Center);
    document.push(title.styled({
        let mut style = Style::new().with_font_size(20).with_color(primary);
        style.set_bold();
        style
    }));

    if !view.report_period.trim().is_empty() {
        let mut period = Paragraph::new(view.report_period.clone());
        period.set_alignment(Alignment::Center);
        document.push(period.styled(Style::new().with_font_size(11).with_color(MUTED_TEXT)));
    }

    let mut meta_lines = Vec::new();
    if !view.industry.trim().is_empty() {
        meta_lines.push(format!("Industry: {}", view.industry));
    }
    if !view.logo_desc.trim().is_empty() {
        meta_lines.push(format!("Logo: {}", view.logo_desc));
    }
    let contacts = view.contact_list();
    if !contacts.is_empty() {
        meta_lines.push(format!("Contacts: {}", contacts.join(", ")));
    }
    for line in meta_lines {
        let mut paragraph = Paragraph::new(line);
        paragraph.set_alignment(Alignment::Center);
        document.push(paragraph.styled(Style::new().with_font_size(9).with_color(MUTED_TEXT)));
    }
    document.push(Break::new(1.0));

    for block in &view.blocks {
        match block {
            ViewBlock::ScoreRow(cards) => {
                let cells: Vec<LinearLayout> = cards.iter().map(scorecard_cell).collect();
                document.push(four_column_row(cells)?);
                document.push(Break::new(1.0));
            }
            ViewBlock::Chart(chart) => {
                document.push(CaptionedChart::from_png(
                    &chart.png,
                    chart.caption.clone(),
                    chart.width_mm,
                )?);
                document.push(Break::new(1.0));
            }
            ViewBlock::TileRow(tiles) => {
                let cells: Vec<LinearLayout> = tiles.iter().map(summary_cell).collect();
                document.push(four_column_row(cells)?);
                document.push(Break::new(1.0));
            }
            ViewBlock::Narrative { title, body } => {
                document.push(HorizontalRule::new(secondary));
                document.push(Break::new(0.5));

                let mut layout = LinearLayout::vertical();
                layout.push(
                    Paragraph::new(title.clone()).styled(heading_style(2, primary)),
                );
                layout.push(Break::new(0.5));
                push_narrative_body(&mut layout, body, primary);
                document.push(layout);
            }
        }
    }

    Ok(document)
}

/// Renders the view into in-memory PDF bytes.
pub fn render_to_bytes(view: &ReportView) -> Result<Vec<u8>, Error> {
    let document = build_document(view)?;
    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(bytes)
}

/// Renders the view and writes the document to `path`.
pub fn export_to_file(view: &ReportView, path: &Path) -> Result<PathBuf, Error> {
    let bytes = render_to_bytes(view)?;
    std::fs::write(path, &bytes).map_err(|err| {
        Error::new(
            format!("Failed to write report to {}", path.display()),
            err,
        )
    })?;
    info!("exported {} ({} bytes)", path.display(), bytes.len());
    Ok(path.to_path_buf())
}
