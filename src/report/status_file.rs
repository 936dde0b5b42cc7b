//! JSON status file sink.

use super::NotificationSink;
use crate::resolver::ResolvedAddress;
use crate::time::{Clock, SystemClock};
use serde::Serialize;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error writing the status file.
#[derive(Debug, Error)]
pub enum StatusFileError {
    /// Serializing the record failed.
    #[error("Failed to serialize status: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Creating, writing or renaming the file failed.
    #[error("Failed to write status file {path}: {source}")]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// On-disk record.
#[derive(Debug, Serialize)]
struct StatusRecord {
    /// `null` when there is no connection.
    address: Option<Ipv4Addr>,
    display: String,
    /// Unix seconds.
    updated_at: u64,
}

/// Keeps a JSON file in sync with the current address.
///
/// Each update rewrites the whole file:
///
/// ```json
/// {
///   "address": "192.168.1.42",
///   "display": "192.168.1.42",
///   "updated_at": 1700000000
/// }
/// ```
///
/// Writes go to `{path}.tmp` first and are then renamed over `path`, so a
/// reader never sees a partial record. Failures are logged and otherwise
/// ignored; a broken status file must not stop the watcher.
#[derive(Debug, Clone)]
pub struct StatusFileSink<C = SystemClock> {
    path: PathBuf,
    clock: C,
}

impl StatusFileSink<SystemClock> {
    /// Creates a sink writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> StatusFileSink<C> {
    /// Creates a sink with a custom clock for `updated_at`.
    #[must_use]
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    /// Returns the status file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the record for `address`.
    ///
    /// # Errors
    ///
    /// Returns [`StatusFileError`] if the record cannot be serialized or the
    /// file cannot be written.
    pub fn write(&self, address: &ResolvedAddress) -> Result<(), StatusFileError> {
        let record = StatusRecord {
            address: address.address(),
            display: address.to_string(),
            updated_at: self.clock.unix_seconds(),
        };
        let content = serde_json::to_string_pretty(&record).map_err(StatusFileError::Serialize)?;

        let io_err = |source| StatusFileError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        // state.json -> state.json.tmp, not state.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", self.path.display()));
        std::fs::write(&temp_path, content).map_err(io_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        Ok(())
    }
}

impl<C: Clock> NotificationSink for StatusFileSink<C> {
    fn alert(&self, _address: &ResolvedAddress) {}

    fn update(&self, address: &ResolvedAddress) {
        if let Err(e) = self.write(address) {
            tracing::warn!("{e}");
        }
    }
}
