use std::path::{Path, PathBuf};
use std::time::Duration;

use legalbrain_client::settings::{
    ClientSettings, DEFAULT_ANALYZE_PATH, DEFAULT_BASE_URL, DEFAULT_RULES_PATH,
};
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Overrides `api_base_url` when set to a non-empty value.
pub const API_URL_ENV: &str = "LEGALBRAIN_API_URL";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_rules_path")]
    pub rules_path: String,
    #[serde(default = "default_analyze_path")]
    pub analyze_path: String,
    /// Whole-request timeout. Absent means wait for the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub json_logs: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_rules_path() -> String {
    DEFAULT_RULES_PATH.to_string()
}

fn default_analyze_path() -> String {
    DEFAULT_ANALYZE_PATH.to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_base_url: default_base_url(),
            rules_path: default_rules_path(),
            analyze_path: default_analyze_path(),
            request_timeout_secs: None,
            json_logs: false,
        }
    }
}

impl ConsoleConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base_url.clone(),
            rules_path: self.rules_path.clone(),
            analyze_path: self.analyze_path.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Replace the base URL with `value` when it is non-empty.
    pub fn with_api_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value
            && !url.trim().is_empty()
        {
            tracing::debug!(env = API_URL_ENV, url = %url.trim(), "api base url overridden");
            self.api_base_url = url.trim().to_string();
        }
        self
    }

    /// Apply [`API_URL_ENV`] from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("legalbrain"))
}

/// Load the config from `dir`, writing and returning the defaults when no
/// file exists yet.
pub fn load_or_default(dir: &Path) -> eyre::Result<ConsoleConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        let config = ConsoleConfig::default();
        save_config(dir, &config)?;
        tracing::info!(path = %path.display(), "wrote default config");
        return Ok(config);
    }
    load_config(dir)
}

pub fn load_config(dir: &Path) -> eyre::Result<ConsoleConfig> {
    let path = dir.join(CONFIG_FILE);
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse config JSON, migrating older versions first.
pub fn parse_config(contents: &str) -> eyre::Result<ConsoleConfig> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    Ok(serde_json::from_value(migrated)?)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update legalbrain."
        ));
    }

    let obj = json
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

    // Unversioned (hand-written) files have the v1 shape; missing fields
    // take their defaults.
    if from_version < 1 {
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(CURRENT_VERSION.into()),
        );
        tracing::info!("stamped unversioned config as v{CURRENT_VERSION}");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save_config(dir: &Path, config: &ConsoleConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(&stamped)?;

    // Temp file then rename, so a crash never leaves a half-written config.
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
