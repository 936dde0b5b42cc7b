//! Reporting layer: what happens to each resolved address.
//!
//! This module provides:
//! - The watcher-facing seam ([`Reporter`])
//! - Alert-once notification policy ([`NotificationReporter`], [`NotificationSink`])
//! - Sinks for the console ([`ConsoleSink`]) and a JSON status file ([`StatusFileSink`])
//! - Fan-out to several sinks ([`MultiSink`])

mod console;
mod notification;
mod reporter;
mod status_file;


pub use console::ConsoleSink;
pub use notification::{MultiSink, NotificationReporter, NotificationSink};
pub use reporter::Reporter;
pub use status_file::{StatusFileError, StatusFileSink};
