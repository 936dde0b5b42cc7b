//! Console sink.

use super::NotificationSink;
use crate::resolver::ResolvedAddress;

/// Prints alerts to stdout as `IP Address: <address>`.
///
/// Updates are logged at debug level only, so a stable address keeps the
/// console quiet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Formats the line printed for an alert.
    #[must_use]
    pub fn alert_line(address: &ResolvedAddress) -> String {
        format!("IP Address: {address}")
    }
}

impl NotificationSink for ConsoleSink {
    fn alert(&self, address: &ResolvedAddress) {
        tracing::info!("Primary address is now {address}");
        println!("{}", Self::alert_line(address));
    }

    fn update(&self, address: &ResolvedAddress) {
        tracing::debug!("Address unchanged: {address}");
    }
}
