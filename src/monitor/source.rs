//! Change source trait for connectivity event notifications.
//!
//! This module provides the [`ChangeSource`] trait that abstracts
//! the mechanism that tells the watcher connectivity may have changed.

use super::{ChangeEvent, SourceError};
use tokio_stream::Stream;

/// Trait for connectivity-change event sources.
///
/// Implementations wrap platform callbacks (e.g. Windows
/// `NotifyIpInterfaceChange`), host-delivered notifications, or periodic
/// re-enumeration, and expose them as an async stream.
///
/// # One-time Semantics
///
/// `into_stream` consumes `self`. Subscribing happens when the stream is
/// created; unsubscribing happens when the stream is dropped.
///
/// # Stream Items
///
/// - `Ok(ChangeEvent)` - connectivity may have changed; re-resolve
/// - `Err(SourceError)` - the source failed; no further events will follow
///
/// Stream end (`None`) also means the source is gone. Sources make no
/// ordering or deduplication promises; they only promise to fire at least
/// once whenever reachability changes.
pub trait ChangeSource: Send {
    /// The stream type returned by `into_stream`.
    type Stream: Stream<Item = Result<ChangeEvent, SourceError>> + Send + Unpin + 'static;

    /// Subscribes to the source and returns its event stream.
    fn into_stream(self) -> Self::Stream;
}
