//! Multipart POST to the analysis service.
//!
//! Converts an [`ExportPayload`] into a `reqwest` multipart form and
//! submits it. One request per call; the caller (the session's
//! in-flight flag) ensures only one submission is outstanding at a
//! time. No explicit timeout — the transport's defaults apply.

use reqwest::multipart::{Form, Part};

use tonemark_export::ExportPayload;

use crate::report::AnalysisResponse;

/// Errors from one analysis request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never completed (connection refused, DNS, ...) or
    /// the form could not be constructed.
    #[error("analysis request failed: {0}")]
    Connection(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("analysis service returned {status}: {body}")]
    Backend {
        /// HTTP status of the response.
        status: reqwest::StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The service answered 2xx but the body was not a valid report.
    #[error("failed to decode analysis report: {0}")]
    InvalidReport(#[from] serde_json::Error),
}

/// Client for the external analysis service.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    endpoint: String,
    http: reqwest::Client,
}

impl Default for AnalysisClient {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ENDPOINT)
    }
}

impl AnalysisClient {
    /// The analysis endpoint of a locally running service.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:8000/analyze";

    /// Create a client posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    /// The configured endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one payload and await the decoded report.
    ///
    /// The report is returned exactly as the service sent it.
    ///
    /// # Errors
    ///
    /// [`ClientError::Connection`] on network failure,
    /// [`ClientError::Backend`] on a non-2xx response (with status and
    /// body), [`ClientError::InvalidReport`] when the response body is
    /// not a valid report.
    pub async fn analyze(&self, payload: ExportPayload) -> Result<AnalysisResponse, ClientError> {
        let form = to_form(payload)?;
        let response = self.http.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Backend { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Convert payload parts into a multipart form, preserving order.
fn to_form(payload: ExportPayload) -> Result<Form, reqwest::Error> {
    let mut form = Form::new();
    for p in payload.into_parts() {
        let mut part = Part::bytes(p.bytes).mime_str(p.mime)?;
        if let Some(filename) = p.filename {
            part = part.file_name(filename);
        }
        form = form.part(p.name, part);
    }
    Ok(form)
}
