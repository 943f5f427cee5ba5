//! Bitmap chart rasterization for the report dashboard.
//!
//! Charts are drawn directly into RGB buffers with the [`image`] crate and
//! encoded as PNG, so the PDF layer can embed them like any other image.
//! Every renderer takes a `scale` factor; the export path passes
//! [`EXPORT_SCALE`] to double the pixel density of the rasterized output.

use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb, RgbImage};

use crate::projections::{BarDatum, PieSlice, TrendPoint};

/// Pixel-density multiplier applied when rasterizing for export.
pub const EXPORT_SCALE: u32 = 2;

/// Dashboard palette shared by all charts.
pub const PALETTE: [[u8; 3]; 4] = [
    [0x25, 0x63, 0xeb],
    [0xdc, 0x26, 0x26],
    [0x10, 0xb9, 0x81],
    [0xfa, 0xcc, 0x15],
];

const BACKGROUND: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const AXIS: Rgb<u8> = Rgb([0x9c, 0xa3, 0xaf]);

/// Logical (1×) size of the bar and line charts, in pixels.
const CHART_WIDTH: u32 = 360;
const CHART_HEIGHT: u32 = 200;

/// Logical (1×) diameter of the pie chart, in pixels.
const PIE_SIZE: u32 = 200;

/// Inner margin around the plot area at 1× scale.
const MARGIN: u32 = 12;

fn palette_color(index: usize) -> Rgb<u8> {
    Rgb(PALETTE[index % PALETTE.len()])
}

fn blank_canvas(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_pixel(width, height, BACKGROUND)
}

fn encode_png(buffer: RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(buffer).write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

fn fill_rect(buffer: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    let (width, height) = buffer.dimensions();
    for y in y0..y1.min(height) {
        for x in x0..x1.min(width) {
            buffer.put_pixel(x, y, color);
        }
    }
}

fn draw_segment(buffer: &mut RgbImage, from: (f64, f64), to: (f64, f64), half: u32, color: Rgb<u8>) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    for step in 0..=steps {
        let t = f64::from(step) / f64::from(steps);
        let x = from.0 + dx * t;
        let y = from.1 + dy * t;
        let cx = x.round().max(0.0) as u32;
        let cy = y.round().max(0.0) as u32;
        fill_rect(
            buffer,
            cx.saturating_sub(half),
            cy.saturating_sub(half),
            cx + half + 1,
            cy + half + 1,
            color,
        );
    }
}

fn series_max(values: impl Iterator<Item = f64>) -> f64 {
    values
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max)
        .max(1.0)
}

/// Renders the violation bar chart: one bar per counter category.
pub fn render_bar_chart(bars: &[BarDatum], scale: u32) -> Result<Vec<u8>, image::ImageError> {
    let scale = scale.max(1);
    let width = CHART_WIDTH * scale;
    let height = CHART_HEIGHT * scale;
    let margin = MARGIN * scale;
    let mut buffer = blank_canvas(width, height);

    let baseline = height - margin;
    fill_rect(&mut buffer, margin, baseline, width - margin, baseline + scale, AXIS);
    fill_rect(&mut buffer, margin, margin, margin + scale, baseline, AXIS);

    if bars.is_empty() {
        return encode_png(buffer);
    }

    let max = series_max(bars.iter().map(|bar| bar.value));
    let plot_width = width - 2 * margin;
    let plot_height = (baseline - margin) as f64;
    let slot = plot_width / bars.len() as u32;
    let gap = slot / 5;

    for (index, bar) in bars.iter().enumerate() {
        let value = bar.value.max(0.0);
        let bar_height = ((value / max) * plot_height).round() as u32;
        let x0 = margin + slot * index as u32 + gap;
        let x1 = margin + slot * (index as u32 + 1) - gap;
        let y0 = baseline.saturating_sub(bar_height);
        fill_rect(&mut buffer, x0, y0, x1, baseline, palette_color(index));
    }

    encode_png(buffer)
}

/// Renders the weekly trend line chart.
pub fn render_line_chart(points: &[TrendPoint], scale: u32) -> Result<Vec<u8>, image::ImageError> {
    let scale = scale.max(1);
    let width = CHART_WIDTH * scale;
    let height = CHART_HEIGHT * scale;
    let margin = MARGIN * scale;
    let mut buffer = blank_canvas(width, height);

    let baseline = height - margin;
    fill_rect(&mut buffer, margin, baseline, width - margin, baseline + scale, AXIS);
    fill_rect(&mut buffer, margin, margin, margin + scale, baseline, AXIS);

    if points.is_empty() {
        return encode_png(buffer);
    }

    let max = series_max(points.iter().map(|point| point.value));
    let plot_width = f64::from(width - 2 * margin);
    let plot_height = f64::from(baseline - margin);
    let step = if points.len() > 1 {
        plot_width / (points.len() - 1) as f64
    } else {
        0.0
    };

    let color = palette_color(1);
    let positions: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let x = f64::from(margin) + step * index as f64;
            let y = f64::from(baseline) - (point.value.max(0.0) / max) * plot_height;
            (x, y)
        })
        .collect();

    for pair in positions.windows(2) {
        draw_segment(&mut buffer, pair[0], pair[1], scale / 2, color);
    }
    for &(x, y) in &positions {
        draw_segment(&mut buffer, (x, y), (x, y), scale, color);
    }

    encode_png(buffer)
}

/// Renders the categorical distribution pie chart.
///
/// Slices are laid out clockwise from twelve o'clock; a distribution whose
/// values sum to zero renders as an unfilled outline.
pub fn render_pie_chart(slices: &[PieSlice], scale: u32) -> Result<Vec<u8>, image::ImageError> {
    let scale = scale.max(1);
    let size = PIE_SIZE * scale;
    let total: f64 = slices
        .iter()
        .map(|slice| slice.value.max(0.0))
        .filter(|value| value.is_finite())
        .sum();

    let center = f64::from(size) / 2.0;
    let radius = center - f64::from(MARGIN * scale);
    let ring = f64::from(scale);

    let buffer = ImageBuffer::from_fn(size, size, |x, y| {
        let dx = f64::from(x) - center;
        let dy = f64::from(y) - center;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance > radius {
            return BACKGROUND;
        }
        if total <= 0.0 {
            if distance >= radius - ring {
                return AXIS;
            }
            return BACKGROUND;
        }

        // Angle measured clockwise from twelve o'clock, in [0, 1).
        let angle = dx.atan2(-dy);
        let mut fraction = angle / (2.0 * std::f64::consts::PI);
        if fraction < 0.0 {
            fraction += 1.0;
        }

        let mut cumulative = 0.0;
        for (index, slice) in slices.iter().enumerate() {
            cumulative += slice.value.max(0.0) / total;
            if fraction <= cumulative {
                return palette_color(index);
            }
        }
        palette_color(slices.len().saturating_sub(1))
    });

    encode_png(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn bars() -> Vec<BarDatum> {
        vec![
            BarDatum {
                label: "HOS Violations",
                value: 12.0,
            },
            BarDatum {
                label: "Safety Events",
                value: 4.0,
            },
        ]
    }

    #[test]
    fn bar_chart_doubles_dimensions_at_export_scale() {
        let png = render_bar_chart(&bars(), EXPORT_SCALE).expect("render bar chart");
        let decoded = image::load_from_memory(&png).expect("decode png");
        assert_eq!(decoded.dimensions(), (CHART_WIDTH * 2, CHART_HEIGHT * 2));
    }

    #[test]
    fn bar_chart_paints_the_first_bar_in_palette_blue() {
        let png = render_bar_chart(&bars(), 1).expect("render bar chart");
        let decoded = image::load_from_memory(&png).expect("decode png").to_rgb8();
        let slot = (CHART_WIDTH - 2 * MARGIN) / 2;
        let x = MARGIN + slot / 2;
        let y = CHART_HEIGHT - MARGIN - 4;
        assert_eq!(decoded.get_pixel(x, y), &Rgb(PALETTE[0]));
    }

    #[test]
    fn line_chart_handles_all_zero_series() {
        let points = vec![
            TrendPoint {
                week: "Week 1",
                value: 0.0,
            },
            TrendPoint {
                week: "Week 2",
                value: 0.0,
            },
        ];
        let png = render_line_chart(&points, 1).expect("render line chart");
        let decoded = image::load_from_memory(&png).expect("decode png");
        assert_eq!(decoded.dimensions(), (CHART_WIDTH, CHART_HEIGHT));
    }

    #[test]
    fn pie_chart_fills_a_single_slice_everywhere() {
        let slices = vec![PieSlice {
            label: "Speeding Events",
            value: 14.0,
        }];
        let png = render_pie_chart(&slices, 1).expect("render pie chart");
        let decoded = image::load_from_memory(&png).expect("decode png").to_rgb8();
        let center = PIE_SIZE / 2;
        assert_eq!(decoded.get_pixel(center, center - 20), &Rgb(PALETTE[0]));
        assert_eq!(decoded.get_pixel(center, center + 20), &Rgb(PALETTE[0]));
        assert_eq!(decoded.get_pixel(2, 2), &BACKGROUND);
    }

    #[test]
    fn zero_total_pie_renders_only_an_outline() {
        let slices = vec![PieSlice {
            label: "Speeding Events",
            value: 0.0,
        }];
        let png = render_pie_chart(&slices, 1).expect("render pie chart");
        let decoded = image::load_from_memory(&png).expect("decode png").to_rgb8();
        let center = PIE_SIZE / 2;
        assert_eq!(decoded.get_pixel(center, center), &BACKGROUND);
    }
}
