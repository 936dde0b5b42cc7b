//! Application execution logic.
//!
//! This module wires the resolver, reporter and change sources together
//! and keeps the watcher running until a shutdown signal arrives.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::signal;

use show_my_ip::config::ValidatedConfig;
use show_my_ip::monitor::{ChangeWatcher, PollingSource, StopReason, WatchError, WatchHandle};
use show_my_ip::network::filter::{FilterChain, FilteredFetcher};
use show_my_ip::network::platform::PlatformFetcher;
use show_my_ip::report::{ConsoleSink, MultiSink, NotificationReporter, Reporter, StatusFileSink};
use show_my_ip::resolver::AddressResolver;

#[cfg(windows)]
use show_my_ip::monitor::platform::PlatformSource;

/// Fetcher shared by the resolver and the polling source.
type AppFetcher = Arc<FilteredFetcher<PlatformFetcher, FilterChain>>;

type AppWatcher = ChangeWatcher<AppFetcher, NotificationReporter<MultiSink>>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The watcher could not be started or its task failed.
    #[error("Watcher failed: {0}")]
    Watch(#[from] WatchError),

    /// The last available change source terminated.
    #[error("Change source terminated unexpectedly")]
    SourceTerminated,
}

/// Where change events come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceMode {
    /// Native notifications; degrades to `Polling` if it terminates.
    #[cfg(windows)]
    Platform,
    /// Periodic re-enumeration.
    Polling,
}

/// Runtime options extracted from validated config.
///
/// Lets the config's `filter` field be moved into the fetcher separately.
struct RuntimeOptions {
    poll_interval: Duration,
    poll_only: bool,
}

impl From<&ValidatedConfig> for RuntimeOptions {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            poll_only: config.poll_only,
        }
    }
}

impl RuntimeOptions {
    #[cfg(windows)]
    const fn initial_mode(&self) -> SourceMode {
        if self.poll_only {
            SourceMode::Polling
        } else {
            SourceMode::Platform
        }
    }

    #[cfg(not(windows))]
    const fn initial_mode(&self) -> SourceMode {
        SourceMode::Polling
    }
}

/// Resolves the address once and reports it through the configured sinks.
///
/// Prints `IP Address: ...` and, if configured, writes the status file.
pub fn resolve_once(config: ValidatedConfig) {
    let sinks = build_sinks(config.status_file.as_deref());
    let fetcher = FilteredFetcher::new(PlatformFetcher::new(), config.filter);

    let resolved = AddressResolver::new(fetcher).resolve();
    NotificationReporter::new(sinks).report(&resolved);
}

/// Executes the main application loop.
///
/// This function:
/// 1. Creates the network fetcher with configured filters
/// 2. Creates the reporter (console, plus status file if configured)
/// 3. Starts the watcher on the platform source, or on polling
/// 4. Restarts on polling if the platform source terminates
/// 5. Runs until shutdown signal (Ctrl+C / SIGTERM)
///
/// # Errors
///
/// Returns an error if:
/// - The polling source terminates
/// - The watcher task fails
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Platform-specific network APIs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let options = RuntimeOptions::from(&config);
    let sinks = build_sinks(config.status_file.as_deref());
    let fetcher: AppFetcher = Arc::new(FilteredFetcher::new(PlatformFetcher::new(), config.filter));

    let watcher = ChangeWatcher::new(
        AddressResolver::new(Arc::clone(&fetcher)),
        NotificationReporter::new(sinks),
    );

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut mode = options.initial_mode();
    log_mode(mode, &options);

    loop {
        let handle = start_watching(&watcher, mode, &fetcher, options.poll_interval)?;
        let control = handle.control();

        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                control.stop();
                return Ok(());
            }

            outcome = handle.stopped() => {
                match next_mode(mode, outcome)? {
                    Some(next) => mode = next,
                    None => return Ok(()),
                }
            }
        }
    }
}

/// Builds the notification fan-out.
fn build_sinks(status_file: Option<&Path>) -> MultiSink {
    let sinks = MultiSink::new().with_sink(ConsoleSink);

    match status_file {
        Some(path) => {
            tracing::info!("Status file: {}", path.display());
            sinks.with_sink(StatusFileSink::new(path))
        }
        None => sinks,
    }
}

fn start_watching(
    watcher: &AppWatcher,
    mode: SourceMode,
    fetcher: &AppFetcher,
    poll_interval: Duration,
) -> Result<WatchHandle, WatchError> {
    match mode {
        #[cfg(windows)]
        SourceMode::Platform => watcher.start(PlatformSource::new()),
        SourceMode::Polling => watcher.start(PollingSource::new(Arc::clone(fetcher), poll_interval)),
    }
}

/// Decides what to do after a session ends.
///
/// Returns the mode to restart in, or `None` if the run is over.
/// Degradation from platform notifications to polling is permanent.
fn next_mode(
    mode: SourceMode,
    outcome: Result<StopReason, WatchError>,
) -> Result<Option<SourceMode>, RunError> {
    match outcome? {
        StopReason::Requested => Ok(None),
        StopReason::SourceTerminated => match mode {
            #[cfg(windows)]
            SourceMode::Platform => {
                tracing::warn!("Platform change notifications failed, degraded to polling-only mode");
                Ok(Some(SourceMode::Polling))
            }
            SourceMode::Polling => Err(RunError::SourceTerminated),
        },
    }
}

fn log_mode(mode: SourceMode, options: &RuntimeOptions) {
    match mode {
        #[cfg(windows)]
        SourceMode::Platform => {
            tracing::info!("Watching platform change notifications");
        }
        SourceMode::Polling => {
            if !options.poll_only && cfg!(not(windows)) {
                tracing::debug!("No platform change notifications on this platform");
            }
            tracing::info!(
                "Polling-only mode enabled (interval: {}s)",
                options.poll_interval.as_secs()
            );
        }
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed, that signal is never reported.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
