use crate::benefits::view::{SortKey, Tab};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// User-facing settings, persisted as config.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub expiry: ExpiryConfig,
    #[serde(default)]
    pub charcount: CharCountConfig,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.expiry.due_soon_days > MAX_DUE_SOON_DAYS {
            errors.push(format!(
                "due_soon_days must be at most {MAX_DUE_SOON_DAYS}"
            ));
        }

        if self.charcount.limits.is_empty() {
            errors.push("charcount limits must not be empty".to_string());
        }

        if self.charcount.limits.contains(&0) {
            errors.push("charcount limits must be at least 1".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        let limits_ok =
            !self.charcount.limits.is_empty() && !self.charcount.limits.contains(&0);

        Self {
            expiry: ExpiryConfig {
                due_soon_days: if self.expiry.due_soon_days > MAX_DUE_SOON_DAYS {
                    defaults.expiry.due_soon_days
                } else {
                    self.expiry.due_soon_days
                },
                default_sort: self.expiry.default_sort,
                default_tab: self.expiry.default_tab,
            },
            charcount: CharCountConfig {
                limits: if limits_ok {
                    self.charcount.limits.clone()
                } else {
                    defaults.charcount.limits
                },
            },
        }
    }
}

const MAX_DUE_SOON_DAYS: u32 = 366;

/// Benefit tracker settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpiryConfig {
    /// Dated items expiring within this many days get a countdown badge.
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: u32,
    #[serde(default)]
    pub default_sort: SortKey,
    #[serde(default)]
    pub default_tab: Tab,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            due_soon_days: default_due_soon_days(),
            default_sort: SortKey::default(),
            default_tab: Tab::default(),
        }
    }
}

fn default_due_soon_days() -> u32 {
    7
}

/// Character counter settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharCountConfig {
    /// Post-length limits to show remaining characters for.
    #[serde(default = "default_limits")]
    pub limits: Vec<u32>,
}

impl Default for CharCountConfig {
    fn default() -> Self {
        Self {
            limits: default_limits(),
        }
    }
}

fn default_limits() -> Vec<u32> {
    vec![140, 280]
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests;
