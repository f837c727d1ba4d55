//! # zbx-config
//!
//! Layered configuration loading for zbx-audit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ZBX_*` prefix, `__` as separator)
//! 2. Project-level `.zbx/config.toml`
//! 3. User-level `~/.config/zbx-audit/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are layered on top by the binary.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ZBX_API__URL` -> `api.url`, `ZBX_REPORT__GROUP_BY` ->
//! `report.group_by`, etc. The `__` (double underscore) separates nested
//! config sections.
//!
//! # Usage
//!
//! ```no_run
//! use zbx_config::ZbxConfig;
//!
//! let config = ZbxConfig::load().expect("config");
//! if let Some(base) = config.api.base_url() {
//!     println!("auditing {base}");
//! }
//! ```

mod api;
mod error;
mod report;

pub use api::{API_PATH, ApiConfig, endpoint_for, normalize_base_url};
pub use error::ConfigError;
pub use report::ReportConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Prefix of every environment variable read by the config layer.
pub const ENV_PREFIX: &str = "ZBX_";

/// `[api]` keys that are always strings, even when the value looks numeric.
const VERBATIM_API_KEYS: [&str; 4] = ["url", "username", "password", "token"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ZbxConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl ZbxConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does not read `.env`; the binary does that before calling this.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the binary can layer further providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".zbx/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        // Env parses `123456` as an integer and `007` as 7; credentials keep
        // the raw text.
        let verbatim = verbatim_api_env();
        if !verbatim.is_empty() {
            figment = figment.merge(Serialized::defaults(BTreeMap::from([("api", verbatim)])));
        }
        figment
    }

    /// Reject values that would make every remote call fail.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout or an empty
    /// output directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.report.output_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.output_dir".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zbx-audit").join("config.toml"))
    }
}

fn verbatim_api_env() -> BTreeMap<&'static str, String> {
    VERBATIM_API_KEYS
        .into_iter()
        .filter_map(|key| {
            let var = format!("{ENV_PREFIX}API__{}", key.to_ascii_uppercase());
            std::env::var(var).ok().map(|value| (key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zbx_core::enums::{GroupBy, ReportLayout};

    #[test]
    fn default_config_loads() {
        let config = ZbxConfig::default();
        assert!(config.api.base_url().is_none());
        assert_eq!(config.report.group_by, GroupBy::Host);
        assert_eq!(config.report.layout, ReportLayout::PerKind);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = ZbxConfig::figment();
        let config: ZbxConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = ZbxConfig::default();
        config.api.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.timeout_secs"));
    }
}
