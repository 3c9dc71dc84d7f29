//! Configuration loading for the ordex TUI.
//!
//! Everything comes from the environment: the two Supabase values are
//! required, the rest have defaults.

use ordex_core::DatePreset;
use std::path::PathBuf;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_PREFS_PATH: &str = ".ordex/column_prefs.json";
pub const DEFAULT_LOG_PATH: &str = ".ordex/ordex.log";

#[derive(Debug, Clone)]
pub struct TuiConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub request_timeout_ms: u64,
    pub default_preset: DatePreset,
    pub prefs_path: PathBuf,
    pub log_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::from_vars(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let supabase_url =
            lookup("ORDEX_SUPABASE_URL").ok_or(ConfigError::MissingVar("ORDEX_SUPABASE_URL"))?;
        let supabase_anon_key = lookup("ORDEX_SUPABASE_ANON_KEY")
            .ok_or(ConfigError::MissingVar("ORDEX_SUPABASE_ANON_KEY"))?;

        let request_timeout_ms = match lookup("ORDEX_TIMEOUT_MS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: "ORDEX_TIMEOUT_MS",
                reason: format!("not a number: {}", raw),
            })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let default_preset = lookup("ORDEX_DEFAULT_PRESET")
            .map(|raw| DatePreset::parse(&raw))
            .unwrap_or(DatePreset::Week);

        let prefs_path = lookup("ORDEX_PREFS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_PATH));
        let log_path = lookup("ORDEX_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            request_timeout_ms,
            default_preset,
            prefs_path,
            log_path,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.supabase_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ORDEX_SUPABASE_URL",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.supabase_url.starts_with("http://") && !self.supabase_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "ORDEX_SUPABASE_URL",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.supabase_anon_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ORDEX_SUPABASE_ANON_KEY",
                reason: "must not be empty".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ORDEX_TIMEOUT_MS",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Config for running without a remote: the UI still works, fetches
    /// report the configuration problem instead of querying.
    pub fn offline_defaults() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            default_preset: DatePreset::Week,
            prefs_path: PathBuf::from(DEFAULT_PREFS_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}
