//! Analysis report types.
//!
//! Mirrors the JSON the analysis service returns. The client decodes
//! the response and passes it through unchanged — no reshaping, so the
//! result view sees exactly what the service said.

use serde::{Deserialize, Serialize};

/// Top-level response envelope from the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Service-level status string (`"success"` on the happy path).
    pub status: String,
    /// The combined multi-region analysis.
    pub combined_analysis: AnalysisReport,
}

/// The combined palette/undertone report across all analyzed regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Overall undertone verdict (e.g. `"Warm"`, `"Cool"`, `"Neutral"`).
    pub overall_undertone: String,

    /// Dominant color across the selected pixels, as a hex string.
    pub representative_color: String,

    /// Clothing colors ranked by match quality.
    pub recommended_clothing_colors: Vec<RecommendedColor>,

    /// Human-readable reasoning for the verdict.
    pub explanation: String,

    /// Which regions contributed to the analysis.
    #[serde(default)]
    pub regions_analyzed: Vec<String>,
}

/// One recommended clothing color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedColor {
    /// Display name (e.g. `"Olive Green"`).
    pub name: String,
    /// Hex value (e.g. `"#808000"`).
    pub hex: String,
    /// Similarity to the representative color, 0-100.
    pub match_percentage: f64,
}
