//! Lazily opened, shared SQLite connection.
//!
//! A [`ConnectionProvider`] opens its [`DbLocation`] on first use and keeps
//! the handle for its own lifetime. The handle sits behind a mutex so the
//! first-open check and every statement run one caller at a time, whichever
//! thread gets there first.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use crate::error::{Result, StoreError};

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// A database file, created on first open if missing.
    File(PathBuf),
    /// A private in-memory database, discarded with the connection.
    Memory,
}

impl DbLocation {
    /// Interprets `":memory:"` as [`DbLocation::Memory`], anything else as a file.
    ///
    /// # Examples
    ///
    /// ```
    /// use packing_sqlite::DbLocation;
    ///
    /// assert_eq!(DbLocation::from_path(":memory:"), DbLocation::Memory);
    /// assert!(matches!(DbLocation::from_path("app.db"), DbLocation::File(_)));
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path == Path::new(":memory:") {
            Self::Memory
        } else {
            Self::File(path.to_path_buf())
        }
    }

    fn open(&self) -> Result<Connection> {
        let conn = match self {
            Self::File(path) => Connection::open(path)?,
            Self::Memory => Connection::open_in_memory()?,
        };
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        info!(location = ?self, "opened database connection");
        Ok(conn)
    }
}

/// Owns one lazily opened connection.
#[derive(Debug)]
pub struct ConnectionProvider {
    location: DbLocation,
    handle: Mutex<Option<Connection>>,
}

impl ConnectionProvider {
    /// Creates a provider; nothing is opened until the first
    /// [`with_connection`](Self::with_connection) call.
    pub fn new(location: DbLocation) -> Self {
        Self {
            location,
            handle: Mutex::new(None),
        }
    }

    /// Runs `f` with the shared connection, opening it first if needed.
    ///
    /// The connection is only borrowed for the duration of `f`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DatabaseError`] if the database cannot be opened,
    /// or whatever `f` returns.
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|_| StoreError::PersistenceError("connection lock poisoned".to_string()))?;

        if handle.is_none() {
            *handle = Some(self.location.open()?);
        }

        match handle.as_ref() {
            Some(conn) => f(conn),
            None => Err(StoreError::PersistenceError(
                "connection was not opened".to_string(),
            )),
        }
    }

    /// Returns `true` once the connection has been opened.
    pub fn is_open(&self) -> bool {
        self.handle.lock().map(|h| h.is_some()).unwrap_or(false)
    }

    /// Returns the configured location.
    pub fn location(&self) -> &DbLocation {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_is_lazy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lazy.db");
        let provider = ConnectionProvider::new(DbLocation::File(path.clone()));

        assert!(!provider.is_open());
        assert!(!path.exists());

        provider.with_connection(|_| Ok(())).unwrap();
        assert!(provider.is_open());
        assert!(path.exists());
    }

    #[test]
    fn test_connection_is_reused() {
        let provider = ConnectionProvider::new(DbLocation::Memory);
        provider
            .with_connection(|conn| {
                conn.execute_batch("CREATE TABLE t (x INTEGER);")?;
                Ok(())
            })
            .unwrap();

        // A second open of an in-memory location would not see the table.
        let count: i64 = provider
            .with_connection(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let provider = ConnectionProvider::new(DbLocation::Memory);
        let enabled: i64 = provider
            .with_connection(|conn| {
                Ok(conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let provider = std::sync::Arc::new(ConnectionProvider::new(DbLocation::Memory));
        provider
            .with_connection(|conn| {
                conn.execute_batch("CREATE TABLE hits (n INTEGER);")?;
                Ok(())
            })
            .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|n| {
                let provider = std::sync::Arc::clone(&provider);
                std::thread::spawn(move || {
                    provider
                        .with_connection(|conn| {
                            conn.execute("INSERT INTO hits (n) VALUES (?1)", [n])?;
                            Ok(())
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let count: i64 = provider
            .with_connection(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM hits", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 4);
    }
}
