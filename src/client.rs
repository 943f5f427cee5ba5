//! HTTP client for the report-generation endpoint.
//!
//! A single POST carries `{companyInfo, inputData}` and the endpoint answers
//! with `{sections: [{title, markdown}, ...]}`.  Failures are never swallowed:
//! every outcome other than a non-empty section list maps to a tagged
//! [`GenerateError`] variant so callers can surface it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{CompanyInfo, InputData, NarrativeSection};

/// Endpoint used when neither the constructor nor the environment provides
/// one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/generate";

/// Environment variable that overrides the generation endpoint URL.
pub const ENDPOINT_ENV_VAR: &str = "FLEET_REPORT_ENDPOINT";

/// Failure modes of a generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request never produced an HTTP response.
    #[error("network error calling generation endpoint: {0}")]
    Network(String),
    /// The endpoint answered with a non-success status code.
    #[error("generation endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body was not JSON of the expected shape, including a
    /// missing `sections` field.
    #[error("malformed response from generation endpoint: {0}")]
    MalformedResponse(String),
    /// The endpoint answered correctly but produced no sections; the report
    /// view requires at least one.
    #[error("generation endpoint returned no sections")]
    EmptySections,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    company_info: &'a CompanyInfo,
    input_data: &'a InputData,
}

#[derive(Deserialize)]
struct GenerateResponse {
    sections: Option<Vec<NarrativeSection>>,
}

/// Client for the remote generation service.
///
/// The endpoint is injected configuration rather than a call-site literal:
/// explicit constructor argument, then the `FLEET_REPORT_ENDPOINT`
/// environment variable, then [`DEFAULT_ENDPOINT`].
#[derive(Clone, Debug)]
pub struct ReportClient {
    endpoint: String,
}

impl ReportClient {
    /// Creates a client for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a client from the environment, falling back to the default
    /// endpoint.
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var(ENDPOINT_ENV_VAR).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::new(endpoint)
    }

    /// Returns the configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the snapshot and parses the narrative sections.
    ///
    /// One request, no retry, no cancellation; when two submissions race the
    /// caller decides which result wins.  The section list is guaranteed
    /// non-empty on success.
    pub fn request_report(
        &self,
        company: &CompanyInfo,
        input: &InputData,
    ) -> Result<Vec<NarrativeSection>, GenerateError> {
        let body = GenerateRequest {
            company_info: company,
            input_data: input,
        };

        debug!("POST {}", self.endpoint);
        let response = match ureq::post(&self.endpoint).send_json(&body) {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                warn!("generation endpoint rejected request with HTTP {status}");
                return Err(GenerateError::Status { status, body });
            }
            Err(err) => return Err(GenerateError::Network(err.to_string())),
        };

        let parsed: GenerateResponse = response
            .into_json()
            .map_err(|err| GenerateError::MalformedResponse(err.to_string()))?;

        let sections = parsed
            .sections
            .ok_or_else(|| GenerateError::MalformedResponse("missing `sections` field".into()))?;

        if sections.is_empty() {
            return Err(GenerateError::EmptySections);
        }

        debug!("received {} narrative sections", sections.len());
        Ok(sections)
    }
}

impl Default for ReportClient {
    fn default() -> Self {
        Self::from_env()
    }
}
