//! Configuration management for terminwatch.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::types::CaseType;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/terminwatch/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Booking portal settings
    pub portal: PortalConfig,
    /// Case type the pipeline checks availability for
    pub case_type: CaseType,
    /// CAPTCHA solver service settings
    pub solver: SolverConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here — the
    /// caller asked for that specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }
        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides applied.
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides in place.
    ///
    /// Supports the following environment variables:
    /// - `TERMINWATCH_CLIENT_KEY`: solver service client key
    /// - `TERMINWATCH_CASE_TYPE_ID`: override the case type id
    /// - `TERMINWATCH_POLL_INTERVAL_SECS`: override the solver poll interval
    /// - `TERMINWATCH_SOLVE_TIMEOUT_SECS`: override the overall solve
    ///   timeout; `0` removes the bound entirely
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("TERMINWATCH_CLIENT_KEY") {
            if !val.is_empty() {
                self.solver.client_key = val;
                tracing::debug!("Override solver.client_key from env");
            }
        }

        if let Ok(val) = std::env::var("TERMINWATCH_CASE_TYPE_ID") {
            if let Ok(id) = val.parse() {
                self.case_type.id = id;
                tracing::debug!("Override case_type.id from env: {}", id);
            }
        }

        if let Ok(val) = std::env::var("TERMINWATCH_POLL_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                self.solver.poll_interval_secs = secs;
                tracing::debug!("Override solver.poll_interval_secs from env: {}", secs);
            }
        }

        if let Ok(val) = std::env::var("TERMINWATCH_SOLVE_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                self.solver.timeout_secs = if secs == 0 { None } else { Some(secs) };
                tracing::debug!("Override solver.timeout_secs from env: {}", secs);
            }
        }
    }

    /// Validate the configuration for a pipeline run.
    pub fn validate(&self) -> ConfigResult<()> {
        self.case_type.validate()?;

        if !self.portal.base_url.starts_with("http") {
            return Err(ConfigError::InvalidValue {
                field: "portal.base_url".to_string(),
                reason: format!("must be an http(s) URL, got '{}'", self.portal.base_url),
            });
        }

        if self.solver.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "solver.poll_interval_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/terminwatch/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("de", "terminwatch", "terminwatch")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Booking portal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Portal base URL, without the `/termin/` suffix
    pub base_url: String,
    /// User agent sent on every portal request
    pub user_agent: String,
    /// Referer sent on the landing page request
    pub landing_referer: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://terminvereinbarung.muenchen.de/abh".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:131.0) \
                         Gecko/20100101 Firefox/131.0"
                .to_string(),
            landing_referer: "https://stadt.muenchen.de/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// CAPTCHA solver service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Solver API base URL
    pub api_base_url: String,
    /// Account client key for the solver service
    pub client_key: String,
    /// Task type submitted with every create-task request
    pub task_type: String,
    /// Delay between result polls in seconds
    pub poll_interval_secs: u64,
    /// Overall bound on the solve wait in seconds; `None` polls until the
    /// solver reaches a terminal state
    pub timeout_secs: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.2captcha.com".to_string(),
            client_key: String::new(),
            task_type: "FriendlyCaptchaTaskProxyless".to_string(),
            poll_interval_secs: 5,
            timeout_secs: Some(180),
        }
    }
}
