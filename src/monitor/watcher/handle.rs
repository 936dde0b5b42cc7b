//! Handles returned by [`ChangeWatcher::start`](super::ChangeWatcher::start).

use super::state::{PhaseCell, StopReason};
use crate::monitor::WatchError;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub(super) type SharedPhase = Arc<PhaseCell>;

/// Cloneable stop switch for one watcher session.
///
/// Usable from any thread, including ones outside the tokio runtime.
/// A control for an ended session is inert: it cannot stop a later one.
#[derive(Debug, Clone)]
pub struct WatchControl {
    phase: SharedPhase,
    session: u64,
}

impl WatchControl {
    pub(super) const fn new(phase: SharedPhase, session: u64) -> Self {
        Self { phase, session }
    }

    /// Ends the session and unsubscribes from its source.
    ///
    /// Once this returns, the session produces no further reports, even
    /// for a cycle that was already resolving. A report in progress is
    /// waited for, so calling this from inside a reporter deadlocks.
    ///
    /// Returns true if this call ended the session, false if it had
    /// already ended.
    pub fn stop(&self) -> bool {
        self.phase.end(self.session, StopReason::Requested)
    }

    /// Returns true while the session is running.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.phase.current().is_watching(self.session)
    }
}

/// Owner's handle to a running watcher session.
///
/// Dropping the handle does not stop the session; call [`stop`](Self::stop)
/// or [`ChangeWatcher::stop`](super::ChangeWatcher::stop).
#[derive(Debug)]
pub struct WatchHandle {
    control: WatchControl,
    task: JoinHandle<StopReason>,
}

impl WatchHandle {
    pub(super) const fn new(control: WatchControl, task: JoinHandle<StopReason>) -> Self {
        Self { control, task }
    }

    /// Returns a cloneable stop switch for this session.
    #[must_use]
    pub fn control(&self) -> WatchControl {
        self.control.clone()
    }

    /// See [`WatchControl::stop`].
    pub fn stop(&self) -> bool {
        self.control.stop()
    }

    /// Returns true while the session is running.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.control.is_watching()
    }

    /// Waits for the session to end and returns why it ended.
    ///
    /// The source has been unsubscribed by the time this resolves.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::TaskFailed`] if the session task panicked
    /// (typically a panicking reporter) or was aborted.
    pub async fn stopped(self) -> Result<StopReason, WatchError> {
        self.task.await.map_err(WatchError::TaskFailed)
    }
}
