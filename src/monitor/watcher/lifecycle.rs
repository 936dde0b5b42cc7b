//! [`ChangeWatcher`] and its session task.

use super::handle::{SharedPhase, WatchControl, WatchHandle};
use super::state::{Phase, PhaseCell, StopReason, WatcherStatus};
use crate::monitor::{ChangeEvent, ChangeSource, SourceError, WatchError};
use crate::network::InterfaceFetcher;
use crate::report::Reporter;
use crate::resolver::AddressResolver;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::{Stream, StreamExt};

struct Shared<F, R> {
    resolver: AddressResolver<F>,
    reporter: R,
}

/// Re-resolves the primary address whenever a change source fires.
///
/// A watcher alternates between [`WatcherStatus::Stopped`] and
/// [`WatcherStatus::Watching`]; each `start` opens a new session on a fresh
/// source. Within a session every [`ChangeEvent`] produces exactly one
/// resolve-and-report cycle, in arrival order, with no coalescing.
///
/// # Example
///
/// ```ignore
/// use show_my_ip::monitor::{ChangeWatcher, channel};
/// use show_my_ip::network::platform::PlatformFetcher;
/// use show_my_ip::report::{ConsoleSink, NotificationReporter};
/// use show_my_ip::resolver::AddressResolver;
///
/// let watcher = ChangeWatcher::new(
///     AddressResolver::new(PlatformFetcher::new()),
///     NotificationReporter::new(ConsoleSink),
/// );
/// let (sender, source) = channel();
/// let handle = watcher.start(source)?;   // prints the current address
/// sender.notify()?;                      // re-resolves and reports
/// handle.stop();
/// ```
pub struct ChangeWatcher<F, R> {
    shared: Arc<Shared<F, R>>,
    phase: SharedPhase,
}

impl<F, R> fmt::Debug for ChangeWatcher<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = self.phase.current();
        f.debug_struct("ChangeWatcher")
            .field("status", &phase.status)
            .field("session", &phase.session)
            .field("last_stop", &phase.last_stop)
            .finish_non_exhaustive()
    }
}

impl<F, R> ChangeWatcher<F, R>
where
    F: InterfaceFetcher + 'static,
    R: Reporter + 'static,
{
    /// Creates a stopped watcher.
    #[must_use]
    pub fn new(resolver: AddressResolver<F>, reporter: R) -> Self {
        Self {
            shared: Arc::new(Shared { resolver, reporter }),
            phase: Arc::new(PhaseCell::new()),
        }
    }

    /// Subscribes to `source` and starts a session.
    ///
    /// One resolve-and-report cycle runs before this returns, so the
    /// reporter always hears the current address before any event.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::AlreadyWatching`] if a session is running; the
    /// source is dropped without being subscribed.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, or if the reporter panics
    /// during the first cycle. Either way the session is ended first.
    pub fn start<S: ChangeSource>(&self, source: S) -> Result<WatchHandle, WatchError> {
        let Some(session) = self.phase.begin() else {
            return Err(WatchError::AlreadyWatching);
        };
        // Ends the session if the first cycle or the spawn unwinds
        let guard = SessionGuard {
            phase: Arc::clone(&self.phase),
            session,
        };

        let stream = source.into_stream();
        // Subscribed before the first cycle so a stop issued during it is seen
        let phase_rx = self.phase.subscribe();
        tracing::debug!("Watcher session {session} started");

        run_cycle(&self.shared, &self.phase, session);

        let task = tokio::spawn(run_session(
            Arc::clone(&self.shared),
            Arc::clone(&self.phase),
            phase_rx,
            guard,
            stream,
        ));

        Ok(WatchHandle::new(
            WatchControl::new(Arc::clone(&self.phase), session),
            task,
        ))
    }
}

impl<F, R> ChangeWatcher<F, R> {
    /// Stops the running session, if any.
    ///
    /// Waits for a report in progress, like [`WatchControl::stop`].
    /// Returns true if a session was running.
    pub fn stop(&self) -> bool {
        self.phase.end_current(StopReason::Requested)
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> WatcherStatus {
        self.phase.current().status
    }

    /// Returns how the most recent session ended, if one has.
    #[must_use]
    pub fn last_stop(&self) -> Option<StopReason> {
        self.phase.current().last_stop
    }

    /// Returns a reference to the reporter.
    #[must_use]
    pub fn reporter(&self) -> &R {
        &self.shared.reporter
    }
}

/// Ends the session if it unwinds without ending itself.
///
/// Created by `start` before the first cycle and moved into the task.
struct SessionGuard {
    phase: SharedPhase,
    session: u64,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self
            .phase
            .end(self.session, StopReason::SourceTerminated)
        {
            tracing::error!("Watcher session {} aborted", self.session);
        }
    }
}

async fn run_session<F, R, St>(
    shared: Arc<Shared<F, R>>,
    phase: SharedPhase,
    mut phase_rx: watch::Receiver<Phase>,
    guard: SessionGuard,
    mut stream: St,
) -> StopReason
where
    F: InterfaceFetcher,
    R: Reporter,
    St: Stream<Item = Result<ChangeEvent, SourceError>> + Unpin,
{
    let session = guard.session;

    let reason = loop {
        tokio::select! {
            biased;

            () = stop_requested(&mut phase_rx, session) => break StopReason::Requested,

            item = stream.next() => match item {
                Some(Ok(ChangeEvent)) => run_cycle(&shared, &phase, session),
                Some(Err(e)) => {
                    tracing::warn!("Change source failed: {e}");
                    break terminate(&phase, session);
                }
                None => {
                    tracing::warn!("Change source ended");
                    break terminate(&phase, session);
                }
            },
        }
    };

    // Unsubscribe before the owner learns the session is over
    drop(stream);
    drop(guard);
    tracing::debug!("Watcher session {session} ended: {reason}");
    reason
}

async fn stop_requested(phase_rx: &mut watch::Receiver<Phase>, session: u64) {
    // Err means the watcher and all handles are gone, which also ends the session
    let _ = phase_rx.wait_for(|phase| !phase.is_watching(session)).await;
}

fn terminate(phase: &PhaseCell, session: u64) -> StopReason {
    if phase.end(session, StopReason::SourceTerminated) {
        StopReason::SourceTerminated
    } else {
        // A stop raced the failure; it ended the session first
        StopReason::Requested
    }
}

/// Resolves once and reports unless the session ended meanwhile.
fn run_cycle<F, R>(shared: &Shared<F, R>, phase: &PhaseCell, session: u64)
where
    F: InterfaceFetcher,
    R: Reporter,
{
    let resolved = shared.resolver.resolve();

    if !phase.report_if_watching(session, || shared.reporter.report(&resolved)) {
        tracing::debug!("Session {session} stopped during resolution; dropping {resolved}");
    }
}
