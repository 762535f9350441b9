//! # Configuration State
//!
//! Property settings loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     OASIS_PROPERTY_NAME="Oasis Resort"                                 │
//! │     OASIS_NIGHTLY_RATE=30000                                           │
//! │     OASIS_CURRENCY=FCFA                                                │
//! │     OASIS_LOG=info,oasis=debug                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $OASIS_CONFIG, or                                                  │
//! │     ~/.config/oasis/oasis.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.oasis.oasis/oasis.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! property_name = "Oasis Resort"
//! currency = "FCFA"
//! nightly_rate = 25000
//! log_filter = "info,oasis=debug"
//! ```
//!
//! Read-only after startup, so no lock.

use oasis_core::{Money, DEFAULT_NIGHTLY_RATE, MAX_AMOUNT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default tracing filter when neither `RUST_LOG` nor config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,oasis=debug";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "oasis.toml";

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Config State
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shown in the dashboard header.
    pub property_name: String,

    /// Currency label for amounts.
    pub currency: String,

    /// Room rate used to price reservations.
    pub nightly_rate: Money,

    /// Tracing filter directives (`RUST_LOG` syntax).
    pub log_filter: String,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            property_name: "Oasis".to_string(),
            currency: oasis_core::money::CURRENCY.to_string(),
            nightly_rate: DEFAULT_NIGHTLY_RATE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`oasis.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.property_name.trim().is_empty() {
            return Err(ConfigError::Invalid("property_name must not be empty".into()));
        }

        if self.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency must not be empty".into()));
        }

        if self.nightly_rate.is_zero() || self.nightly_rate.is_negative() {
            return Err(ConfigError::Invalid(format!(
                "nightly_rate must be positive, got {}",
                self.nightly_rate.units()
            )));
        }

        if self.nightly_rate > MAX_AMOUNT {
            return Err(ConfigError::Invalid(format!(
                "nightly_rate must not exceed {}, got {}",
                MAX_AMOUNT.units(),
                self.nightly_rate.units()
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("OASIS_PROPERTY_NAME") {
            debug!(property_name = %name, "Overriding property name from environment");
            self.property_name = name;
        }

        if let Ok(rate) = std::env::var("OASIS_NIGHTLY_RATE") {
            match Money::parse(&rate) {
                Some(parsed) => {
                    debug!(
                        nightly_rate = parsed.units(),
                        "Overriding nightly rate from environment"
                    );
                    self.nightly_rate = parsed;
                }
                None => warn!(value = %rate, "Ignoring unparseable OASIS_NIGHTLY_RATE"),
            }
        }

        if let Ok(currency) = std::env::var("OASIS_CURRENCY") {
            self.currency = currency;
        }

        if let Ok(filter) = std::env::var("OASIS_LOG") {
            self.log_filter = filter;
        }
    }

    /// Config file path: `$OASIS_CONFIG`, else the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("OASIS_CONFIG") {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "oasis", "oasis")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Formats an amount with the configured currency label.
    pub fn format_amount(&self, amount: Money) -> String {
        let shown = amount.to_string();
        let digits = shown
            .strip_suffix(oasis_core::money::CURRENCY)
            .unwrap_or(&shown)
            .trim_end();
        format!("{} {}", digits, self.currency)
    }
}
