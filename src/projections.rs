//! Pure mappings from the fleet input model to chart-ready aggregates.
//!
//! Nothing in this module touches rendering; each function is a projection
//! of [`InputData`] that the chart rasterizer and the report layout consume.
//! Keeping them free-standing makes the display contract (sign prefixes,
//! ordering, labels) testable without fonts or pixels.

use crate::form::Counter;
use crate::model::{format_metric, InputData, Region};

/// Display styling of a score change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    /// `change >= 0`: rendered with a `+` prefix and positive styling.
    Positive,
    /// `change < 0`: rendered without a prefix and negative styling.
    Negative,
}

/// One per-region scorecard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scorecard {
    pub region: Region,
    pub score: f64,
    pub change: f64,
}

impl Scorecard {
    /// The absolute score, formatted for display.
    pub fn score_label(&self) -> String {
        format_metric(self.score)
    }

    /// The signed delta: `+{n}` when non-negative, `{n}` otherwise (the
    /// negative sign comes from the number itself).
    pub fn change_label(&self) -> String {
        if self.change >= 0.0 {
            format!("+{}", format_metric(self.change))
        } else {
            format_metric(self.change)
        }
    }

    /// Styling classification for the change value.
    pub fn trend(&self) -> Trend {
        if self.change >= 0.0 {
            Trend::Positive
        } else {
            Trend::Negative
        }
    }
}

/// One labelled value in a bar series.
#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
    pub label: &'static str,
    pub value: f64,
}

/// One point of the weekly trend line.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendPoint {
    pub week: &'static str,
    pub value: f64,
}

/// One slice of the speeding distribution pie.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: f64,
}

/// One scalar summary tile.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryTile {
    pub label: &'static str,
    pub value: f64,
}

/// Builds the four scorecards in stable region order.
pub fn scorecards(input: &InputData) -> Vec<Scorecard> {
    Region::ALL
        .iter()
        .map(|&region| {
            let entry = input.fleet_scores.get(region);
            Scorecard {
                region,
                score: entry.score,
                change: entry.change,
            }
        })
        .collect()
}

fn counter_total(input: &InputData, counter: Counter) -> f64 {
    match counter {
        Counter::HosViolations => input.hos_violations.total,
        Counter::SafetyEvents => input.safety_events.total,
        Counter::UnassignedDriving => input.unassigned_driving.total,
        Counter::SpeedingEvents => input.speeding_events.total,
        Counter::PersonalConveyance => input.personal_conveyance.total,
        Counter::MissedDvir => input.missed_dvir.total,
    }
}

/// Builds the violation bar series: one data point per incident counter
/// category, carrying its real total.
pub fn violation_bars(input: &InputData) -> Vec<BarDatum> {
    Counter::ALL
        .iter()
        .map(|&counter| BarDatum {
            label: counter.label(),
            value: counter_total(input, counter),
        })
        .collect()
}

/// Builds the four-week trend line.
///
/// A single-week snapshot carries no history, so the first three weeks are
/// zero and the current week carries the HOS violation total.
pub fn weekly_trend(input: &InputData) -> Vec<TrendPoint> {
    vec![
        TrendPoint {
            week: "Week 1",
            value: 0.0,
        },
        TrendPoint {
            week: "Week 2",
            value: 0.0,
        },
        TrendPoint {
            week: "Week 3",
            value: 0.0,
        },
        TrendPoint {
            week: "Week 4",
            value: input.hos_violations.total,
        },
    ]
}

/// Builds the speeding distribution.  The current model tracks a single
/// total, so the pie has one slice.
pub fn speeding_distribution(input: &InputData) -> Vec<PieSlice> {
    vec![PieSlice {
        label: "Speeding Events",
        value: input.speeding_events.total,
    }]
}

/// Builds the four scalar summary tiles.
pub fn summary_tiles(input: &InputData) -> Vec<SummaryTile> {
    [
        Counter::SafetyEvents,
        Counter::UnassignedDriving,
        Counter::PersonalConveyance,
        Counter::MissedDvir,
    ]
    .iter()
    .map(|&counter| SummaryTile {
        label: counter.label(),
        value: counter_total(input, counter),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScoreChange;

    fn sample_input() -> InputData {
        let mut input = InputData::default();
        input.fleet_scores.corporate = ScoreChange {
            score: 82.0,
            change: 5.0,
        };
        input.fleet_scores.great_lakes = ScoreChange {
            score: 77.0,
            change: -3.0,
        };
        input.fleet_scores.ohio_valley = ScoreChange {
            score: 90.0,
            change: 0.0,
        };
        input.fleet_scores.southeast = ScoreChange {
            score: 68.0,
            change: -1.0,
        };
        input.hos_violations.total = 12.0;
        input.speeding_events.total = 14.0;
        input
    }

    #[test]
    fn scorecards_follow_region_order_and_styling() {
        let cards = scorecards(&sample_input());
        assert_eq!(cards.len(), 4);

        assert_eq!(cards[0].region, Region::Corporate);
        assert_eq!(cards[0].score_label(), "82");
        assert_eq!(cards[0].change_label(), "+5");
        assert_eq!(cards[0].trend(), Trend::Positive);

        assert_eq!(cards[1].region, Region::GreatLakes);
        assert_eq!(cards[1].score_label(), "77");
        assert_eq!(cards[1].change_label(), "-3");
        assert_eq!(cards[1].trend(), Trend::Negative);

        assert_eq!(cards[2].region, Region::OhioValley);
        assert_eq!(cards[2].score_label(), "90");
        assert_eq!(cards[2].change_label(), "+0");
        assert_eq!(cards[2].trend(), Trend::Positive);

        assert_eq!(cards[3].region, Region::Southeast);
        assert_eq!(cards[3].score_label(), "68");
        assert_eq!(cards[3].change_label(), "-1");
        assert_eq!(cards[3].trend(), Trend::Negative);
    }

    #[test]
    fn violation_bars_cover_all_counters() {
        let bars = violation_bars(&sample_input());
        assert_eq!(bars.len(), 6);
        assert_eq!(bars[0].label, "HOS Violations");
        assert_eq!(bars[0].value, 12.0);
        assert_eq!(bars[3].label, "Speeding Events");
        assert_eq!(bars[3].value, 14.0);
    }

    #[test]
    fn weekly_trend_ends_with_current_hos_total() {
        let trend = weekly_trend(&sample_input());
        assert_eq!(trend.len(), 4);
        assert!(trend[..3].iter().all(|point| point.value == 0.0));
        assert_eq!(trend[3].week, "Week 4");
        assert_eq!(trend[3].value, 12.0);
    }

    #[test]
    fn summary_tiles_pick_the_four_scalar_counters() {
        let mut input = sample_input();
        input.safety_events.total = 7.0;
        input.missed_dvir.total = 2.0;
        let tiles = summary_tiles(&input);
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0].label, "Safety Events");
        assert_eq!(tiles[0].value, 7.0);
        assert_eq!(tiles[3].label, "Missed DVIR");
        assert_eq!(tiles[3].value, 2.0);
    }
}
