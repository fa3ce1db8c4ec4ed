use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_RULES_PATH: &str = "/api/rules";
pub const DEFAULT_ANALYZE_PATH: &str = "/api/analyze/pack";

/// Where the rules API and the analysis endpoint live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub rules_path: String,
    pub analyze_path: String,
    /// Whole-request timeout. `None` waits as long as the server takes;
    /// analysis of a large pack can run for minutes.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            rules_path: DEFAULT_RULES_PATH.to_string(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            request_timeout: None,
        }
    }
}
