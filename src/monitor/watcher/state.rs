//! Watcher phase shared between the owner, its handles and the session task.

use std::fmt;
use std::sync::{PoisonError, RwLock};
use tokio::sync::watch;

/// Whether a watcher is currently running a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherStatus {
    /// Subscribed to a source and reporting.
    Watching,
    /// Not subscribed; see [`StopReason`] for how the last session ended.
    Stopped,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `stop()` was called on the watcher or one of its handles.
    Requested,
    /// The change source failed or its stream ended.
    SourceTerminated,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => write!(f, "stopped on request"),
            Self::SourceTerminated => write!(f, "change source terminated"),
        }
    }
}

/// Current session id and status.
///
/// Each `begin` hands out a fresh session id; `end` only applies to the
/// session it names, so a task left over from an earlier session can never
/// touch a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Phase {
    pub(super) session: u64,
    pub(super) status: WatcherStatus,
    pub(super) last_stop: Option<StopReason>,
}

impl Phase {
    pub(super) const fn initial() -> Self {
        Self {
            session: 0,
            status: WatcherStatus::Stopped,
            last_stop: None,
        }
    }

    /// Starts a new session, returning its id, or `None` if one is running.
    pub(super) const fn begin(&mut self) -> Option<u64> {
        if matches!(self.status, WatcherStatus::Watching) {
            return None;
        }
        self.session = self.session.wrapping_add(1);
        self.status = WatcherStatus::Watching;
        Some(self.session)
    }

    /// Ends `session` with `reason`. Returns false if it was not running.
    pub(super) fn end(&mut self, session: u64, reason: StopReason) -> bool {
        if !self.is_watching(session) {
            return false;
        }
        self.status = WatcherStatus::Stopped;
        self.last_stop = Some(reason);
        true
    }

    pub(super) fn is_watching(&self, session: u64) -> bool {
        self.status == WatcherStatus::Watching && self.session == session
    }
}

/// Phase channel plus the lock that orders reports against stops.
///
/// Reports run under the read side of `report_gate` and ending a session
/// takes the write side, so once `end` returns the ended session has no
/// report in progress and none to come. The phase value itself is only
/// borrowed for the length of a check, never across a report.
#[derive(Debug)]
pub(super) struct PhaseCell {
    phase: watch::Sender<Phase>,
    report_gate: RwLock<()>,
}

impl PhaseCell {
    pub(super) fn new() -> Self {
        let (phase, _) = watch::channel(Phase::initial());
        Self {
            phase,
            report_gate: RwLock::new(()),
        }
    }

    pub(super) fn current(&self) -> Phase {
        *self.phase.borrow()
    }

    pub(super) fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// See [`Phase::begin`].
    pub(super) fn begin(&self) -> Option<u64> {
        let mut started = None;
        self.phase.send_if_modified(|phase| {
            started = phase.begin();
            started.is_some()
        });
        started
    }

    /// Ends `session`, waiting for a report in progress to finish first.
    pub(super) fn end(&self, session: u64, reason: StopReason) -> bool {
        let _gate = self
            .report_gate
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        self.phase
            .send_if_modified(|phase| phase.end(session, reason))
    }

    /// Ends whichever session is current.
    pub(super) fn end_current(&self, reason: StopReason) -> bool {
        let _gate = self
            .report_gate
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        self.phase.send_if_modified(|phase| {
            let session = phase.session;
            phase.end(session, reason)
        })
    }

    /// Runs `report` if `session` is still watching. Returns whether it ran.
    pub(super) fn report_if_watching(&self, session: u64, report: impl FnOnce()) -> bool {
        let _gate = self
            .report_gate
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if !self.phase.borrow().is_watching(session) {
            return false;
        }
        report();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_stopped_without_reason() {
        let phase = Phase::initial();
        assert_eq!(phase.status, WatcherStatus::Stopped);
        assert_eq!(phase.last_stop, None);
    }

    #[test]
    fn begin_hands_out_fresh_sessions() {
        let mut phase = Phase::initial();

        let first = phase.begin().unwrap();
        assert!(phase.end(first, StopReason::Requested));
        let second = phase.begin().unwrap();

        assert_ne!(first, second);
        assert!(phase.is_watching(second));
        assert!(!phase.is_watching(first));
    }

    #[test]
    fn begin_while_watching_is_refused() {
        let mut phase = Phase::initial();
        let session = phase.begin().unwrap();

        assert_eq!(phase.begin(), None);
        assert!(phase.is_watching(session));
    }

    #[test]
    fn end_records_reason() {
        let mut phase = Phase::initial();
        let session = phase.begin().unwrap();

        assert!(phase.end(session, StopReason::SourceTerminated));
        assert_eq!(phase.status, WatcherStatus::Stopped);
        assert_eq!(phase.last_stop, Some(StopReason::SourceTerminated));
    }

    #[test]
    fn end_is_applied_once() {
        let mut phase = Phase::initial();
        let session = phase.begin().unwrap();

        assert!(phase.end(session, StopReason::Requested));
        assert!(!phase.end(session, StopReason::SourceTerminated));
        assert_eq!(phase.last_stop, Some(StopReason::Requested));
    }

    #[test]
    fn stale_session_cannot_end_newer_one() {
        let mut phase = Phase::initial();
        let old = phase.begin().unwrap();
        phase.end(old, StopReason::Requested);
        let current = phase.begin().unwrap();

        assert!(!phase.end(old, StopReason::SourceTerminated));
        assert!(phase.is_watching(current));
    }

    #[test]
    fn stop_reason_display() {
        assert_eq!(StopReason::Requested.to_string(), "stopped on request");
        assert_eq!(
            StopReason::SourceTerminated.to_string(),
            "change source terminated"
        );
    }

    mod phase_cell {
        use super::*;

        #[test]
        fn report_runs_only_while_watching() {
            let cell = PhaseCell::new();
            let session = cell.begin().unwrap();

            assert!(cell.report_if_watching(session, || ()));
            assert!(cell.end(session, StopReason::Requested));

            let mut ran = false;
            assert!(!cell.report_if_watching(session, || ran = true));
            assert!(!ran);
        }

        #[test]
        fn status_is_readable_during_report() {
            let cell = PhaseCell::new();
            let session = cell.begin().unwrap();

            let mut seen = None;
            cell.report_if_watching(session, || seen = Some(cell.current().status));

            assert_eq!(seen, Some(WatcherStatus::Watching));
        }

        #[test]
        fn end_current_targets_latest_session() {
            let cell = PhaseCell::new();
            let session = cell.begin().unwrap();

            assert!(cell.end_current(StopReason::Requested));
            assert!(!cell.end_current(StopReason::Requested));
            assert!(!cell.current().is_watching(session));
        }

        #[test]
        fn subscribers_see_the_end() {
            let cell = PhaseCell::new();
            let rx = cell.subscribe();
            let session = cell.begin().unwrap();

            cell.end(session, StopReason::SourceTerminated);

            assert_eq!(rx.borrow().last_stop, Some(StopReason::SourceTerminated));
        }
    }
}
