//! Host capability gate for persistence access.
//!
//! The ledger can run inside a reduced host (for instance a browser preview
//! of the desktop UI) that has no embedded store. The capability is chosen
//! once at startup as a [`HostCapability`] and wrapped in a [`Guard`]; every
//! repository operation passes [`Guard::ensure_available`] before it touches
//! the connection, so an absent store surfaces as
//! [`StoreError::Unavailable`] instead of a driver failure.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, StoreError};

/// Environment variable consulted by [`HostMode::Auto`].
pub const HOST_ENV_VAR: &str = "PACKING_HOST";

/// Reports whether the running host exposes the embedded store.
pub trait HostCapability: Send + Sync + fmt::Debug {
    /// `true` when persistence may be used.
    fn has_embedded_store(&self) -> bool;

    /// Short host label used in error messages.
    fn name(&self) -> &str;
}

/// Full desktop host with the embedded store.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopHost;

impl HostCapability for DesktopHost {
    fn has_embedded_store(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "desktop"
    }
}

/// Preview host without persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewHost;

impl HostCapability for PreviewHost {
    fn has_embedded_store(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "preview"
    }
}

/// Configured host selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    /// Read [`HOST_ENV_VAR`]; desktop when unset.
    #[default]
    Auto,
    Desktop,
    Preview,
}

impl HostMode {
    /// Resolves [`HostMode::Auto`] against the environment.
    ///
    /// Unrecognized values fall back to desktop with a warning.
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto => match std::env::var(HOST_ENV_VAR) {
                Ok(value) => match value.parse::<Self>() {
                    Ok(Self::Auto) => Self::Desktop,
                    Ok(mode) => mode,
                    Err(err) => {
                        warn!(%err, "ignoring {HOST_ENV_VAR}");
                        Self::Desktop
                    }
                },
                Err(_) => Self::Desktop,
            },
            mode => mode,
        }
    }

    /// Builds the capability for this mode, resolving `Auto` first.
    pub fn capability(self) -> Arc<dyn HostCapability> {
        match self.resolve() {
            Self::Preview => Arc::new(PreviewHost),
            Self::Desktop | Self::Auto => Arc::new(DesktopHost),
        }
    }
}

impl FromStr for HostMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "desktop" => Ok(Self::Desktop),
            "preview" => Ok(Self::Preview),
            other => Err(StoreError::ConfigError(format!("unknown host mode: {other}"))),
        }
    }
}

/// Gate that every persistence operation passes first.
///
/// # Examples
///
/// ```
/// use packing_sqlite::{ErrorKind, Guard};
///
/// assert!(Guard::desktop().ensure_available().is_ok());
///
/// let err = Guard::preview().ensure_available().unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Unavailable);
/// ```
#[derive(Debug, Clone)]
pub struct Guard {
    host: Arc<dyn HostCapability>,
}

impl Guard {
    /// Wraps a host capability.
    pub fn new(host: Arc<dyn HostCapability>) -> Self {
        Self { host }
    }

    /// Guard for the desktop host.
    pub fn desktop() -> Self {
        Self::new(Arc::new(DesktopHost))
    }

    /// Guard for a host without persistence.
    pub fn preview() -> Self {
        Self::new(Arc::new(PreviewHost))
    }

    /// Guard for a configured [`HostMode`].
    pub fn from_mode(mode: HostMode) -> Self {
        Self::new(mode.capability())
    }

    /// Returns `true` when the host exposes the embedded store.
    pub fn is_available(&self) -> bool {
        self.host.has_embedded_store()
    }

    /// Fails with [`StoreError::Unavailable`] when the store is absent.
    pub fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            return Ok(());
        }
        Err(StoreError::Unavailable(format!(
            "database is only available in the desktop host (running in {})",
            self.host.name()
        )))
    }

    /// Returns the host label.
    pub fn host_name(&self) -> &str {
        self.host.name()
    }
}
