//! Report renderer: maps a snapshot plus narrative sections into a view.
//!
//! [`render_report`] is a pure function of its inputs.  It produces a
//! [`ReportView`] whose block list is the single addressable root that the
//! export layer rasterizes; no mutable state survives outside the returned
//! value.  Chart images are rasterized here so the view is self-contained.

use thiserror::Error;

use crate::charts;
use crate::markdown::{self, MarkdownBlock};
use crate::model::{CompanyInfo, InputData, NarrativeSection};
use crate::projections::{self, Scorecard, SummaryTile};

/// Report line shown under the company name, matching the dashboard header.
pub const REPORT_TITLE: &str = "DOT Fleet Compliance Snapshot";

/// Errors produced while building the report view.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to rasterize chart: {0}")]
    Chart(#[from] image::ImageError),
}

/// Brand accent colors resolved from the company metadata.
///
/// Free-text color fields that do not parse as `#RRGGBB` fall back to the
/// first two palette entries, so an unbranded report still renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrandColors {
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
}

impl BrandColors {
    /// Resolves brand colors from the company's free-text color fields.
    pub fn resolve(company: &CompanyInfo) -> Self {
        Self {
            primary: parse_hex_color(&company.primary_color).unwrap_or(charts::PALETTE[0]),
            secondary: parse_hex_color(&company.secondary_color).unwrap_or(charts::PALETTE[1]),
        }
    }
}

/// Parses a `#RRGGBB` (or `RRGGBB`) string into RGB components.
pub fn parse_hex_color(raw: &str) -> Option<[u8; 3]> {
    let hex = raw.trim().strip_prefix('#').unwrap_or_else(|| raw.trim());
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// The kind of chart carried by a [`ChartBlock`], used for captions and
/// layout widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    ViolationBars,
    WeeklyTrend,
    SpeedingPie,
}

/// A rasterized chart ready for embedding.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartBlock {
    pub kind: ChartKind,
    pub caption: String,
    pub png: Vec<u8>,
    pub width_mm: f64,
}

/// One block of the rendered report, in display order.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewBlock {
    /// The four per-region scorecards.
    ScoreRow(Vec<Scorecard>),
    /// A rasterized chart with its caption.
    Chart(ChartBlock),
    /// The four scalar summary tiles.
    TileRow(Vec<SummaryTile>),
    /// One narrative section: heading plus parsed body blocks.
    Narrative {
        title: String,
        body: Vec<MarkdownBlock>,
    },
}

/// The complete rendered report.
///
/// `blocks` is the one stable container wrapping the whole report; the
/// export trigger rasterizes exactly this subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportView {
    pub company_name: String,
    pub report_period: String,
    pub industry: String,
    pub logo_desc: String,
    pub contacts: Vec<String>,
    pub brand: BrandColors,
    pub blocks: Vec<ViewBlock>,
}

impl ReportView {
    /// Header line combining the company name and the report title.
    pub fn heading(&self) -> String {
        if self.company_name.trim().is_empty() {
            REPORT_TITLE.to_string()
        } else {
            format!("{} \u{2013} {}", self.company_name, REPORT_TITLE)
        }
    }

    /// Contacts with empty form entries filtered out.
    pub fn contact_list(&self) -> Vec<&str> {
        self.contacts
            .iter()
            .map(String::as_str)
            .filter(|contact| !contact.trim().is_empty())
            .collect()
    }
}

/// Builds the report view from an immutable snapshot.
///
/// The inputs pass through unmodified: the scorecards, tiles, and charts are
/// projections of exactly the given `input`, and the narrative sections keep
/// the order they were received in.  `scale` is the chart pixel-density
/// multiplier; export uses [`charts::EXPORT_SCALE`].
pub fn render_report(
    company: &CompanyInfo,
    input: &InputData,
    sections: &[NarrativeSection],
    scale: u32,
) -> Result<ReportView, RenderError> {
    let mut blocks = Vec::new();

    blocks.push(ViewBlock::ScoreRow(projections::scorecards(input)));

    blocks.push(ViewBlock::Chart(ChartBlock {
        kind: ChartKind::ViolationBars,
        caption: "Violations by category".into(),
        png: charts::render_bar_chart(&projections::violation_bars(input), scale)?,
        width_mm: 150.0,
    }));

    blocks.push(ViewBlock::Chart(ChartBlock {
        kind: ChartKind::WeeklyTrend,
        caption: "4-week violation trend".into(),
        png: charts::render_line_chart(&projections::weekly_trend(input), scale)?,
        width_mm: 150.0,
    }));

    blocks.push(ViewBlock::Chart(ChartBlock {
        kind: ChartKind::SpeedingPie,
        caption: "Speeding event distribution".into(),
        png: charts::render_pie_chart(&projections::speeding_distribution(input), scale)?,
        width_mm: 90.0,
    }));

    blocks.push(ViewBlock::TileRow(projections::summary_tiles(input)));

    for section in sections {
        blocks.push(ViewBlock::Narrative {
            title: section.title.clone(),
            body: markdown::parse_markdown(&section.markdown),
        });
    }

    Ok(ReportView {
        company_name: company.name.clone(),
        report_period: company.report_period.clone(),
        industry: company.industry.clone(),
        logo_desc: company.logo_desc.clone(),
        contacts: input.contacts.clone(),
        brand: BrandColors::resolve(company),
        blocks,
    })
}
