//! Bridge configuration via `dbbridge.toml`
//!
//! The bridge has one behavioural switch: how strictly the `transactionId`
//! key is read. Hosts that always send the key (null or not) can run in
//! `strict` mode, which turns a missing key into a decode error on every
//! command that reads it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Config file name conventionally placed next to the host's data.
pub const CONFIG_FILE_NAME: &str = "dbbridge.toml";

/// How a missing `transactionId` key is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionIdPolicy {
    /// `GetTableColumnInfos` requires the key; the other commands read a
    /// missing key as null
    #[default]
    PerCommand,
    /// Every command that reads `transactionId` requires the key
    Strict,
}

/// Bridge configuration loaded from `dbbridge.toml`.
///
/// # Example
///
/// ```toml
/// # "per_command" (default) or "strict"
/// transaction_id = "per_command"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Presence rule for the `transactionId` key.
    #[serde(default)]
    pub transaction_id: TransactionIdPolicy,
}

impl BridgeConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# dbbridge configuration
#
# Presence rule for the "transactionId" argument:
#   "per_command" = GetTableColumnInfos requires the key (value may be null),
#                   other commands treat a missing key as null
#   "strict"      = every command that reads the key requires it
transaction_id = "per_command"
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed TOML, unknown keys, or an
    /// unknown policy name.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            reason: format!("Failed to parse config: {}", e),
        })
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        toml::from_str(&content).map_err(|e| Error::Config {
            reason: format!("Failed to parse config file '{}': {}", path.display(), e),
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::Config {
                reason: format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }
}
