//! Session state tying the form, the client, and the export path together.
//!
//! [`App`] mirrors the single-screen flow of the report tool: the form is
//! always editable; a successful generation installs an immutable snapshot;
//! and the report view (and therefore export) only exists while a snapshot
//! with at least one narrative section is present.

use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::charts::EXPORT_SCALE;
use crate::client::{GenerateError, ReportClient};
use crate::export::{self, DEFAULT_EXPORT_FILE};
use crate::form::ReportForm;
use crate::model::{NarrativeSection, ReportSnapshot};
use crate::render::{self, RenderError};

/// Errors produced while exporting the current report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to build report view: {0}")]
    Render(#[from] RenderError),
    #[error("failed to produce PDF: {0}")]
    Pdf(#[from] genpdf::error::Error),
}

/// One report-generation session.
#[derive(Debug, Default)]
pub struct App {
    form: ReportForm,
    snapshot: Option<ReportSnapshot>,
}

impl App {
    /// Starts a session with an empty form and no generated report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session with a pre-filled form, e.g. from a payload file.
    pub fn with_form(form: ReportForm) -> Self {
        Self {
            form,
            snapshot: None,
        }
    }

    /// The editable input form.
    pub fn form(&self) -> &ReportForm {
        &self.form
    }

    /// Mutable access to the input form.  Editing the form never touches an
    /// already-generated snapshot.
    pub fn form_mut(&mut self) -> &mut ReportForm {
        &mut self.form
    }

    /// The generated report, if any.
    pub fn report(&self) -> Option<&ReportSnapshot> {
        self.snapshot.as_ref()
    }

    /// Whether the report view is currently available.
    pub fn has_report(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Submits the current form state and, on success, installs the snapshot.
    ///
    /// Errors leave any previously generated report in place and the form
    /// untouched; the caller is expected to surface them.  When submissions
    /// race, the last call to resolve wins.
    pub fn submit(&mut self, client: &ReportClient) -> Result<(), GenerateError> {
        match self.form.submit(client) {
            Ok(sections) => {
                self.install(sections);
                Ok(())
            }
            Err(err) => {
                warn!("report generation failed: {err}");
                Err(err)
            }
        }
    }

    /// Installs a snapshot from already-fetched sections.  Used by `submit`
    /// and by offline rendering from a saved section file.
    ///
    /// An empty section list is ignored: the report view requires at least
    /// one narrative section.
    pub fn install(&mut self, sections: Vec<NarrativeSection>) {
        if sections.is_empty() {
            warn!("ignoring empty section list; report view not installed");
            return;
        }
        self.snapshot = Some(ReportSnapshot {
            company_info: self.form.company().clone(),
            input_data: self.form.input().clone(),
            sections,
        });
    }

    /// Exports the current report to `path` (default `DOT_Report.pdf`).
    ///
    /// With no generated report present this is a no-op: no error and no
    /// file, signalled by `Ok(None)`.
    pub fn export_report(&self, path: Option<&Path>) -> Result<Option<PathBuf>, ExportError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(None);
        };

        let view = render::render_report(
            &snapshot.company_info,
            &snapshot.input_data,
            &snapshot.sections,
            EXPORT_SCALE,
        )?;
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_EXPORT_FILE));
        let written = export::export_to_file(&view, path)?;
        Ok(Some(written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{CompanyField, Counter};

    #[test]
    fn export_without_report_is_a_silent_no_op() {
        let app = App::new();
        let result = app
            .export_report(Some(Path::new("should_not_exist.pdf")))
            .expect("no-op export must not fail");
        assert!(result.is_none());
        assert!(!Path::new("should_not_exist.pdf").exists());
    }

    #[test]
    fn install_freezes_the_form_state_at_generation_time() {
        let mut app = App::new();
        app.form_mut()
            .set_company_field(CompanyField::Name, "Acme Logistics");
        app.form_mut().set_counter(Counter::HosViolations, "12");
        app.install(vec![NarrativeSection::new("Summary", "All good.")]);

        // later edits must not leak into the snapshot
        app.form_mut()
            .set_company_field(CompanyField::Name, "Renamed Inc");
        app.form_mut().set_counter(Counter::HosViolations, "99");

        let report = app.report().expect("report installed");
        assert_eq!(report.company_info.name, "Acme Logistics");
        assert_eq!(report.input_data.hos_violations.total, 12.0);
        assert_eq!(report.sections.len(), 1);
    }

    #[test]
    fn session_starts_without_a_report() {
        let app = App::new();
        assert!(!app.has_report());
        assert!(app.report().is_none());
    }

    #[test]
    fn empty_section_list_does_not_open_the_report_view() {
        let mut app = App::new();
        app.install(Vec::new());
        assert!(!app.has_report());
    }
}
