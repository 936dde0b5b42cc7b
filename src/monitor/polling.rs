//! Polling change source.
//!
//! This module provides [`PollingSource`], a [`ChangeSource`] that
//! periodically re-enumerates interfaces and fires when the snapshot moves.

use super::{ChangeEvent, ChangeSource, SourceError};
use crate::network::{InterfaceFetcher, InterfaceSnapshot};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tokio_stream::Stream;

/// Change source that polls interface state at a fixed interval.
///
/// Used where no platform notification API is available, and as the
/// fallback when one fails.
///
/// # Example
///
/// ```ignore
/// use show_my_ip::monitor::PollingSource;
/// use show_my_ip::network::platform::PlatformFetcher;
/// use std::time::Duration;
///
/// let source = PollingSource::new(PlatformFetcher::new(), Duration::from_secs(5));
/// ```
#[derive(Debug)]
pub struct PollingSource<F> {
    fetcher: F,
    poll_interval: Duration,
}

/// Shortest period a polling source will tick at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

impl<F: InterfaceFetcher> PollingSource<F> {
    /// Creates a polling source.
    ///
    /// A zero `poll_interval` is raised to [`MIN_POLL_INTERVAL`].
    #[must_use]
    pub const fn new(fetcher: F, poll_interval: Duration) -> Self {
        let poll_interval = if poll_interval.is_zero() {
            MIN_POLL_INTERVAL
        } else {
            poll_interval
        };
        Self {
            fetcher,
            poll_interval,
        }
    }

    /// Returns the configured polling interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl<F> ChangeSource for PollingSource<F>
where
    F: InterfaceFetcher + Unpin + 'static,
{
    type Stream = PollingStream<F>;

    /// Takes the baseline snapshot immediately, so a change that happens
    /// right after subscribing is caught by the first tick.
    fn into_stream(self) -> Self::Stream {
        PollingStream::new(self.fetcher, self.poll_interval)
    }
}

/// Stream of change events produced by polling.
///
/// Yields one [`ChangeEvent`] per tick on which the snapshot differs from
/// the previous one. Never terminates on its own.
#[derive(Debug)]
pub struct PollingStream<F> {
    fetcher: F,
    interval: Interval,
    /// Snapshot seen on the previous tick.
    prev_snapshot: Vec<InterfaceSnapshot>,
}

impl<F: InterfaceFetcher> PollingStream<F> {
    fn new(fetcher: F, poll_interval: Duration) -> Self {
        let prev_snapshot = Self::fetch_or_empty(&fetcher);
        let mut interval = interval(poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            fetcher,
            interval,
            prev_snapshot,
        }
    }

    /// A failed fetch counts as "no interfaces", which resolves the same way.
    fn fetch_or_empty(fetcher: &F) -> Vec<InterfaceSnapshot> {
        fetcher.fetch().unwrap_or_else(|e| {
            tracing::debug!("Poll fetch failed: {e}");
            Vec::new()
        })
    }

    /// Fetches once and returns true if the snapshot moved.
    fn poll_once(&mut self) -> bool {
        let current = Self::fetch_or_empty(&self.fetcher);
        if current == self.prev_snapshot {
            return false;
        }
        self.prev_snapshot = current;
        true
    }
}

impl<F> Stream for PollingStream<F>
where
    F: InterfaceFetcher + Unpin,
{
    type Item = Result<ChangeEvent, SourceError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            // Registers the waker for the next tick when Pending
            if Pin::new(&mut self.interval).poll_tick(cx).is_pending() {
                return Poll::Pending;
            }

            if self.poll_once() {
                tracing::debug!("Interface snapshot changed");
                return Poll::Ready(Some(Ok(ChangeEvent)));
            }
        }
    }
}
