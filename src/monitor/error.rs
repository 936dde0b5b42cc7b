//! Error types for the monitor layer.

use thiserror::Error;

/// Error type for change sources.
///
/// A source that yields one of these delivers no further events.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// The source stopped unexpectedly.
    ///
    /// Also returned to a [`super::ChangeSender`] whose watcher has
    /// unsubscribed.
    #[error("Change source stopped unexpectedly")]
    Stopped,
}

/// Error type for watcher lifecycle operations.
#[derive(Debug, Error)]
pub enum WatchError {
    /// `start` was called while a session is already running.
    #[error("Watcher is already running")]
    AlreadyWatching,

    /// The session task panicked or was aborted.
    #[error("Watcher task failed: {0}")]
    TaskFailed(#[source] tokio::task::JoinError),
}
