//! Stateful input collector for the weekly snapshot.
//!
//! [`ReportForm`] exclusively owns the live [`CompanyInfo`] and [`InputData`]
//! values for a data-entry session.  Field updates are addressed through
//! small enums rather than stringly-typed names, and every numeric update
//! accepts raw text so the coercion policy lives in exactly one place.

use log::debug;

use crate::client::{GenerateError, ReportClient};
use crate::model::{coerce_number, CompanyInfo, InputData, NarrativeSection, Region};

/// Addressable free-text fields of [`CompanyInfo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompanyField {
    Name,
    Industry,
    PrimaryColor,
    SecondaryColor,
    LogoDesc,
    ReportPeriod,
}

/// The two numeric fields of a per-region score entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreField {
    Score,
    Change,
}

/// The six independently-tracked incident counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Counter {
    HosViolations,
    SafetyEvents,
    UnassignedDriving,
    SpeedingEvents,
    PersonalConveyance,
    MissedDvir,
}

impl Counter {
    /// All counters in their stable display order.
    pub const ALL: [Counter; 6] = [
        Counter::HosViolations,
        Counter::SafetyEvents,
        Counter::UnassignedDriving,
        Counter::SpeedingEvents,
        Counter::PersonalConveyance,
        Counter::MissedDvir,
    ];

    /// Human-readable label used on charts and summary tiles.
    pub fn label(self) -> &'static str {
        match self {
            Counter::HosViolations => "HOS Violations",
            Counter::SafetyEvents => "Safety Events",
            Counter::UnassignedDriving => "Unassigned Driving",
            Counter::SpeedingEvents => "Speeding Events",
            Counter::PersonalConveyance => "Personal Conveyance",
            Counter::MissedDvir => "Missed DVIR",
        }
    }
}

/// Mutable form state for one data-entry session.
///
/// Created with zeroed/empty defaults when the session starts and discarded
/// when it ends; downstream consumers only ever receive cloned snapshots.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportForm {
    company: CompanyInfo,
    input: InputData,
}

impl ReportForm {
    /// Creates a form with zeroed defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form pre-filled from an existing payload, e.g. one loaded
    /// from disk by the CLI.
    pub fn from_parts(company: CompanyInfo, input: InputData) -> Self {
        Self { company, input }
    }

    /// Returns the current company metadata.
    pub fn company(&self) -> &CompanyInfo {
        &self.company
    }

    /// Returns the current fleet input data.
    pub fn input(&self) -> &InputData {
        &self.input
    }

    /// Sets one company string field.  No validation is applied.
    pub fn set_company_field(&mut self, field: CompanyField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CompanyField::Name => self.company.name = value,
            CompanyField::Industry => self.company.industry = value,
            CompanyField::PrimaryColor => self.company.primary_color = value,
            CompanyField::SecondaryColor => self.company.secondary_color = value,
            CompanyField::LogoDesc => self.company.logo_desc = value,
            CompanyField::ReportPeriod => self.company.report_period = value,
        }
    }

    /// Sets the score or change for one region, coercing the raw text.
    /// There is no range constraint on either field.
    pub fn set_fleet_score(&mut self, region: Region, field: ScoreField, raw: &str) {
        let value = coerce_number(raw);
        let entry = self.input.fleet_scores.get_mut(region);
        match field {
            ScoreField::Score => entry.score = value,
            ScoreField::Change => entry.change = value,
        }
    }

    /// Overwrites a counter's total, coercing the raw text.
    pub fn set_counter(&mut self, counter: Counter, raw: &str) {
        let value = coerce_number(raw);
        let slot = match counter {
            Counter::HosViolations => &mut self.input.hos_violations,
            Counter::SafetyEvents => &mut self.input.safety_events,
            Counter::UnassignedDriving => &mut self.input.unassigned_driving,
            Counter::SpeedingEvents => &mut self.input.speeding_events,
            Counter::PersonalConveyance => &mut self.input.personal_conveyance,
            Counter::MissedDvir => &mut self.input.missed_dvir,
        };
        slot.total = value;
    }

    /// Replaces one contact entry.  Indexes past the end are ignored; the
    /// form can only address fields it has rendered.
    pub fn set_contact(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.input.contacts.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Appends exactly one empty contact entry, preserving prior entries.
    /// No de-duplication or format validation is performed.
    pub fn add_contact(&mut self) {
        self.input.contacts.push(String::new());
    }

    /// Submits the current state to the generation endpoint.
    ///
    /// The payload is a by-value snapshot; the form itself is not consumed
    /// or modified, so a failed submission leaves the displayed state fully
    /// editable.  No required-field validation is performed before sending.
    pub fn submit(&self, client: &ReportClient) -> Result<Vec<NarrativeSection>, GenerateError> {
        debug!(
            "submitting snapshot for {:?} ({} contacts)",
            self.company.name,
            self.input.contacts.len()
        );
        client.request_report(&self.company, &self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_fields_update_independently() {
        let mut form = ReportForm::new();
        form.set_company_field(CompanyField::Name, "Acme Logistics");
        form.set_company_field(CompanyField::ReportPeriod, "Week 32");
        assert_eq!(form.company().name, "Acme Logistics");
        assert_eq!(form.company().report_period, "Week 32");
        assert_eq!(form.company().industry, "");
    }

    #[test]
    fn fleet_score_updates_target_one_region() {
        let mut form = ReportForm::new();
        form.set_fleet_score(Region::GreatLakes, ScoreField::Score, "77");
        form.set_fleet_score(Region::GreatLakes, ScoreField::Change, "-3");
        assert_eq!(form.input().fleet_scores.great_lakes.score, 77.0);
        assert_eq!(form.input().fleet_scores.great_lakes.change, -3.0);
        assert_eq!(form.input().fleet_scores.corporate.score, 0.0);
    }

    #[test]
    fn non_numeric_score_coerces_to_zero() {
        let mut form = ReportForm::new();
        form.set_fleet_score(Region::Corporate, ScoreField::Score, "82");
        form.set_fleet_score(Region::Corporate, ScoreField::Score, "not a number");
        assert_eq!(form.input().fleet_scores.corporate.score, 0.0);
    }

    #[test]
    fn counters_overwrite_totals() {
        let mut form = ReportForm::new();
        form.set_counter(Counter::SpeedingEvents, "14");
        form.set_counter(Counter::MissedDvir, "2");
        assert_eq!(form.input().speeding_events.total, 14.0);
        assert_eq!(form.input().missed_dvir.total, 2.0);
        assert_eq!(form.input().hos_violations.total, 0.0);
    }

    #[test]
    fn add_contact_appends_one_empty_entry() {
        let mut form = ReportForm::new();
        form.set_contact(0, "safety@acme.test");
        form.add_contact();
        assert_eq!(
            form.input().contacts,
            vec!["safety@acme.test".to_string(), String::new()]
        );
    }

    #[test]
    fn out_of_range_contact_index_is_ignored() {
        let mut form = ReportForm::new();
        form.set_contact(5, "nobody@acme.test");
        assert_eq!(form.input().contacts, vec![String::new()]);
    }
}
