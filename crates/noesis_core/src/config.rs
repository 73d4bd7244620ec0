//! Explicit core configuration.
//!
//! # Responsibility
//! - Carry storage-key and presentation settings into the store and page
//!   controller as a passed-in value instead of ambient globals.
//!
//! # Invariants
//! - `key_prefix` and `default_scope` are never blank.
//! - `spotlight_size` is at least 1.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_KEY_PREFIX: &str = "noesis_memory_";
pub const DEFAULT_SCOPE: &str = "default";
pub const DEFAULT_SPOTLIGHT_SIZE: usize = 5;

#[derive(Debug)]
pub enum ConfigError {
    InvalidJson(serde_json::Error),
    InvalidValue {
        field: &'static str,
        message: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "invalid config json: {err}"),
            Self::InvalidValue { field, message } => {
                write!(f, "invalid config value for `{field}`: {message}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Settings shared by the memory store and page controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Fixed prefix of every memory storage key.
    pub key_prefix: String,
    /// Scope token used when no user id is available.
    pub default_scope: String,
    /// Number of entries shown in the page spotlight list.
    pub spotlight_size: usize,
    /// Log level handed to [`crate::init_logging`].
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            default_scope: DEFAULT_SCOPE.to_string(),
            spotlight_size: DEFAULT_SPOTLIGHT_SIZE,
            log_level: default_log_level().to_string(),
        }
    }
}

impl CoreConfig {
    /// Parses and validates a JSON config; absent fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::InvalidJson)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "key_prefix",
                message: "must not be blank",
            });
        }
        if self.default_scope.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default_scope",
                message: "must not be blank",
            });
        }
        if self.spotlight_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "spotlight_size",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Derives the storage key for `user_id`, falling back to the default
    /// scope when the id is absent or blank.
    pub fn storage_key(&self, user_id: Option<&str>) -> String {
        let scope = user_id
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(self.default_scope.as_str());
        format!("{}{scope}", self.key_prefix)
    }
}
