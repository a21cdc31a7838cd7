//! Layered, environment-sourced configuration (§3.1, §4.8, §6). Defaults
//! are set in code first, then overridden by `ABACO_CP_*` environment
//! variables, since this is a deployed service rather than an embedded
//! library.

// Layer 1: Standard library imports
use std::net::SocketAddr;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::error::AppError;

/// Response key style, controlled by `web.case` (§4.7, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCase {
    Snake,
    Camel,
}

impl Default for KeyCase {
    fn default() -> Self {
        Self::Snake
    }
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const ENV_PREFIX: &str = "ABACO_CP";

/// Process-wide configuration. All knobs beyond `web.case` (store
/// endpoints, channel backend URL, bind address, log filter) are
/// injected via environment (§6 Configuration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub web_case: KeyCase,
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            web_case: KeyCase::default(),
            bind_addr: DEFAULT_BIND_ADDR.parse().unwrap_or_else(|_| {
                // Unreachable: DEFAULT_BIND_ADDR is a compile-time constant.
                SocketAddr::from(([0, 0, 0, 0], 8000))
            }),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration by layering `ABACO_CP_*` environment variables
    /// (e.g. `ABACO_CP_WEB_CASE=camel`) over [`AppConfig::default`].
    pub fn load() -> Result<Self, AppError> {
        let defaults = Self::default();
        let figure = config::Config::builder()
            .set_default("web_case", "snake")
            .map_err(config_err)?
            .set_default("bind_addr", defaults.bind_addr.to_string())
            .map_err(config_err)?
            .set_default("log_filter", defaults.log_filter.clone())
            .map_err(config_err)?
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("_"))
            .build()
            .map_err(config_err)?;

        let web_case = match figure
            .get_string("web_case")
            .map_err(config_err)?
            .to_ascii_lowercase()
            .as_str()
        {
            "camel" => KeyCase::Camel,
            _ => KeyCase::Snake,
        };
        let bind_addr = figure
            .get_string("bind_addr")
            .map_err(config_err)?
            .parse()
            .map_err(|e| AppError::Internal(format!("invalid bind_addr: {e}")))?;
        let log_filter = figure.get_string("log_filter").map_err(config_err)?;

        Ok(Self {
            web_case,
            bind_addr,
            log_filter,
        })
    }
}

fn config_err(e: config::ConfigError) -> AppError {
    AppError::Internal(format!("configuration error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_case_is_snake() {
        assert_eq!(AppConfig::default().web_case, KeyCase::Snake);
    }

    #[test]
    fn load_without_env_overrides_uses_defaults() {
        let cfg = AppConfig::load().unwrap();
        assert_eq!(cfg.web_case, KeyCase::Snake);
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }
}
