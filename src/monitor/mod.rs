//! Monitor layer: change sources and the watcher that consumes them.
//!
//! This module provides:
//! - The change signal and source abstraction ([`ChangeEvent`], [`ChangeSource`])
//! - Error handling ([`SourceError`], [`WatchError`])
//! - Polling-based detection ([`PollingSource`], [`PollingStream`])
//! - Host-fed events ([`channel`], [`ChangeSender`], [`ChannelSource`])
//! - Native notifications ([`platform`])
//! - The watcher itself ([`ChangeWatcher`], [`WatchHandle`], [`WatchControl`])

mod channel;
mod error;
mod event;
pub mod platform;
mod polling;
mod source;
mod watcher;


pub use channel::{ChangeSender, ChannelSource, ChannelStream, channel};
pub use error::{SourceError, WatchError};
pub use event::ChangeEvent;
pub use polling::{MIN_POLL_INTERVAL, PollingSource, PollingStream};
pub use source::ChangeSource;
pub use watcher::{ChangeWatcher, StopReason, WatchControl, WatchHandle, WatcherStatus};
