//! Data structures describing the weekly fleet compliance snapshot.
//!
//! The types in this module form a serialization-friendly model that mirrors
//! the wire format of the generation endpoint.  They intentionally carry no
//! behavior beyond construction defaults and numeric coercion so the values
//! can be collected by a form, exchanged over the network, and handed to the
//! renderer without pulling in heavy dependencies.

use serde::{Deserialize, Serialize};

/// Free-text company metadata attached to every report.
///
/// All fields are plain strings; empty values are permitted everywhere and
/// the default instance is fully empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub industry: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub logo_desc: String,
    pub report_period: String,
}

/// A per-region safety score together with its period-over-period change.
///
/// `change` is a signed delta used only for sign-based display; non-negative
/// values render with a `+` prefix and positive styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreChange {
    pub score: f64,
    pub change: f64,
}

/// The four fixed fleet regions tracked by the snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Corporate,
    GreatLakes,
    OhioValley,
    Southeast,
}

impl Region {
    /// All regions in their stable display order.
    pub const ALL: [Region; 4] = [
        Region::Corporate,
        Region::GreatLakes,
        Region::OhioValley,
        Region::Southeast,
    ];

    /// Human-readable label used on scorecards.
    pub fn label(self) -> &'static str {
        match self {
            Region::Corporate => "Corporate",
            Region::GreatLakes => "Great Lakes",
            Region::OhioValley => "Ohio Valley",
            Region::Southeast => "Southeast",
        }
    }
}

/// Per-region score map with a fixed set of keys matching the wire format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetScores {
    pub corporate: ScoreChange,
    pub great_lakes: ScoreChange,
    pub ohio_valley: ScoreChange,
    pub southeast: ScoreChange,
}

impl FleetScores {
    /// Returns the score entry for `region`.
    pub fn get(&self, region: Region) -> ScoreChange {
        match region {
            Region::Corporate => self.corporate,
            Region::GreatLakes => self.great_lakes,
            Region::OhioValley => self.ohio_valley,
            Region::Southeast => self.southeast,
        }
    }

    /// Returns a mutable reference to the score entry for `region`.
    pub fn get_mut(&mut self, region: Region) -> &mut ScoreChange {
        match region {
            Region::Corporate => &mut self.corporate,
            Region::GreatLakes => &mut self.great_lakes,
            Region::OhioValley => &mut self.ohio_valley,
            Region::Southeast => &mut self.southeast,
        }
    }
}

/// A single incident counter.  The wire format nests the value under a
/// `total` key so richer per-type breakdowns can be added without breaking
/// the endpoint contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterTotal {
    pub total: f64,
}

impl CounterTotal {
    pub fn new(total: f64) -> Self {
        Self { total }
    }
}

/// The complete set of weekly fleet inputs collected by the form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputData {
    pub fleet_scores: FleetScores,
    pub hos_violations: CounterTotal,
    pub safety_events: CounterTotal,
    pub unassigned_driving: CounterTotal,
    pub speeding_events: CounterTotal,
    pub personal_conveyance: CounterTotal,
    #[serde(rename = "missedDVIR")]
    pub missed_dvir: CounterTotal,
    pub contacts: Vec<String>,
}

impl Default for InputData {
    /// Zeroed counters and scores, with a single empty contact entry so the
    /// form always shows one contact field.
    fn default() -> Self {
        Self {
            fleet_scores: FleetScores::default(),
            hos_violations: CounterTotal::default(),
            safety_events: CounterTotal::default(),
            unassigned_driving: CounterTotal::default(),
            speeding_events: CounterTotal::default(),
            personal_conveyance: CounterTotal::default(),
            missed_dvir: CounterTotal::default(),
            contacts: vec![String::new()],
        }
    }
}

/// A titled block of generated explanatory text, rendered as-is and in the
/// order received from the generation endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSection {
    pub title: String,
    pub markdown: String,
}

impl NarrativeSection {
    pub fn new(title: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
        }
    }
}

/// Immutable snapshot handed to the renderer once generation succeeds.
///
/// The form keeps exclusive ownership of the live model; this value is a
/// by-value copy paired with the narrative sections, so later edits to the
/// form cannot retroactively change a generated report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub company_info: CompanyInfo,
    pub input_data: InputData,
    pub sections: Vec<NarrativeSection>,
}

/// Coerces free text into a finite number.
///
/// Empty input, parse failures, and non-finite parses all map to `0.0` so
/// no NaN-like value ever reaches the rendered output.
pub fn coerce_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Formats a metric value without a trailing `.0` for whole numbers.
pub fn format_metric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
