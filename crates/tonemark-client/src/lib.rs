//! tonemark-client: HTTP transport to the tone analysis service.
//!
//! Takes the multipart payload assembled by `tonemark-export`, POSTs
//! it to the analysis endpoint, and decodes the JSON report. Errors
//! distinguish connection failures, backend (non-2xx) responses, and
//! undecodable reports so the host can message the user accordingly —
//! annotation state is never touched here, so every failure is
//! retryable.

pub mod client;
pub mod report;

pub use client::{AnalysisClient, ClientError};
pub use report::{AnalysisReport, AnalysisResponse, RecommendedColor};
