//! Error types for persistence operations.
//!
//! [`StoreError`] carries the concrete failure; [`StoreError::kind`] folds
//! it into the three categories callers branch on.

use packing_core::ValidationError;
use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The host does not provide the embedded store.
    #[error("persistence unavailable: {0}")]
    Unavailable(String),

    /// Payload rejected before any store mutation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// SQLite reported a failure (I/O, constraint, malformed statement).
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// The store was reached but returned an unexpected result shape.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Schema creation or teardown failed.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration value could not be interpreted.
    #[error("config error: {0}")]
    ConfigError(String),

    /// Configuration file could not be read or written.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration file is not valid YAML for [`StoreConfig`](crate::StoreConfig).
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Coarse error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Host lacks the persistence capability.
    Unavailable,
    /// Payload broke a business rule; retrying with the same payload fails again.
    Validation,
    /// The store was reached and failed.
    Persistence,
    /// Configuration could not be loaded.
    Config,
}

impl StoreError {
    /// Returns the category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use packing_core::ValidationError;
    /// use packing_sqlite::{ErrorKind, StoreError};
    ///
    /// let err = StoreError::from(ValidationError::EmptyOrderDate);
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unavailable(_) => ErrorKind::Unavailable,
            Self::Validation(_) => ErrorKind::Validation,
            Self::DatabaseError(_) | Self::PersistenceError(_) | Self::MigrationError(_) => {
                ErrorKind::Persistence
            }
            Self::ConfigError(_) | Self::IoError(_) | Self::YamlError(_) => ErrorKind::Config,
        }
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
