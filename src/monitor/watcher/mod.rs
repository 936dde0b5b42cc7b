//! Change watcher: ties a change source to the resolver and a reporter.
//!
//! [`ChangeWatcher::start`] subscribes to a [`ChangeSource`](super::ChangeSource),
//! reports the current address once, then reports again on every event
//! until the session is stopped or the source terminates.

mod handle;
mod lifecycle;
mod state;

#[cfg(test)]
mod test_fixtures;

pub use handle::{WatchControl, WatchHandle};
pub use lifecycle::ChangeWatcher;
pub use state::{StopReason, WatcherStatus};
