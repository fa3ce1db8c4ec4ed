use serde::{Deserialize, Serialize};

/// Result of a legal pack analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub report_markdown: String,
    /// Structured flags raised by the analysis, passed through untouched.
    #[serde(default)]
    pub flags: Vec<serde_json::Value>,
    #[serde(default)]
    pub confidence: Option<f64>,
}
