//! Store configuration via `shapes.toml`
//!
//! A store needs to know which replication group to join and which
//! transaction its adds are published under. Both can come from code
//! ([`StoreConfig::new`]) or from a TOML file next to the application.

use serde::{Deserialize, Serialize};
use shapecache_core::{Error, GroupAddress, Result};
use std::path::Path;

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "shapes.toml";

/// Transaction every add is published under unless configured otherwise.
pub const DEFAULT_TRANSACTION: &str = "main";

/// Store configuration loaded from `shapes.toml`.
///
/// # Example
///
/// ```toml
/// group = "239.0.0.66"
/// port = 2416
/// transaction = "main"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// IPv4 multicast group, dotted notation
    #[serde(default = "default_group")]
    pub group: String,
    /// Group port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Transaction name used for every add
    #[serde(default = "default_transaction")]
    pub transaction: String,
}

fn default_group() -> String {
    "239.0.0.66".to_string()
}

fn default_port() -> u16 {
    2416
}

fn default_transaction() -> String {
    DEFAULT_TRANSACTION.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            group: default_group(),
            port: default_port(),
            transaction: default_transaction(),
        }
    }
}

impl StoreConfig {
    /// Config for `group:port` with the default transaction.
    pub fn new(group: impl Into<String>, port: u16) -> Self {
        Self {
            group: group.into(),
            port,
            transaction: default_transaction(),
        }
    }

    /// Validated group address.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the group is not an IPv4 multicast address or
    /// the port is 0.
    pub fn address(&self) -> Result<GroupAddress> {
        GroupAddress::parse(&self.group, self.port).map_err(|e| {
            Error::Config(format!(
                "invalid group '{}:{}': {}",
                self.group, self.port, e
            ))
        })
    }

    /// Validate every field.
    pub fn validate(&self) -> Result<()> {
        self.address()?;
        if self.transaction.trim().is_empty() {
            return Err(Error::Config("transaction name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Shape store configuration
#
# IPv4 multicast group the store replicates through
group = "239.0.0.66"

# Group port
port = 2416

# Transaction every add is published under
transaction = "main"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: StoreConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
