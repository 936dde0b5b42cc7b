//! Alert-once notification policy.

use super::Reporter;
use crate::resolver::ResolvedAddress;
use std::sync::Mutex;

/// Destination for user-visible address notifications.
///
/// `alert` is the interruptive channel (a toast, a printed line) and fires
/// only when the value changes. `update` refreshes a persistent display and
/// fires on every report.
pub trait NotificationSink: Send + Sync {
    /// Announces a new or changed address.
    fn alert(&self, address: &ResolvedAddress);

    /// Refreshes the persistent display with the current address.
    fn update(&self, address: &ResolvedAddress);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn alert(&self, address: &ResolvedAddress) {
        (**self).alert(address);
    }

    fn update(&self, address: &ResolvedAddress) {
        (**self).update(address);
    }
}

/// [`Reporter`] that alerts once per distinct value and updates on every report.
///
/// The first report always alerts. Repeated identical values only refresh
/// the display, so duplicate events from a chatty source never produce
/// duplicate alerts.
#[derive(Debug)]
pub struct NotificationReporter<S> {
    sink: S,
    last: Mutex<Option<ResolvedAddress>>,
}

impl<S: NotificationSink> NotificationReporter<S> {
    /// Creates a reporter that has not reported anything yet.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            last: Mutex::new(None),
        }
    }

    /// Returns a reference to the sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the most recently reported value.
    #[must_use]
    pub fn last(&self) -> Option<ResolvedAddress> {
        *self
            .last
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<S: NotificationSink> Reporter for NotificationReporter<S> {
    fn report(&self, address: &ResolvedAddress) {
        let changed = {
            let mut last = self
                .last
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            last.replace(*address) != Some(*address)
        };

        if changed {
            tracing::debug!("Address changed to {address}");
            self.sink.alert(address);
        }
        self.sink.update(address);
    }
}

/// Sink that forwards to several sinks in order.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl std::fmt::Debug for MultiSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl MultiSink {
    /// Creates an empty fan-out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sink.
    #[must_use]
    pub fn with_sink<S: NotificationSink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Returns the number of sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Returns true if there are no sinks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl NotificationSink for MultiSink {
    fn alert(&self, address: &ResolvedAddress) {
        for sink in &self.sinks {
            sink.alert(address);
        }
    }

    fn update(&self, address: &ResolvedAddress) {
        for sink in &self.sinks {
            sink.update(address);
        }
    }
}
