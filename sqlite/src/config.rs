//! Store configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! database: /home/user/.local/share/packing/app.db
//! host: desktop
//! ```
//!
//! Both keys are optional; missing keys take their defaults.

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::connection::DbLocation;
use crate::error::Result;
use crate::guard::HostMode;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "app.db";

/// Persistence settings loaded at startup.
///
/// # Examples
///
/// ```
/// use packing_sqlite::{HostMode, StoreConfig};
///
/// let config = StoreConfig::default();
/// assert_eq!(config.database.to_str(), Some("app.db"));
/// assert_eq!(config.host, HostMode::Auto);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file path; `:memory:` selects a private in-memory database.
    pub database: PathBuf,
    /// Which host capability to assume.
    pub host: HostMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            host: HostMode::Auto,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) if the file cannot be read,
    /// or [`YamlError`](crate::StoreError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Returns the database location described by [`database`](Self::database).
    pub fn location(&self) -> DbLocation {
        DbLocation::from_path(&self.database)
    }
}
