//! In-process change source fed by the embedding host.
//!
//! Hosts that receive connectivity callbacks on their own thread (a JNI
//! bridge, a GUI event loop, a D-Bus signal handler) forward them through a
//! [`ChangeSender`]. The paired [`ChannelSource`] is what the watcher
//! subscribes to.

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc;
use tokio_stream::Stream;

use super::{ChangeEvent, ChangeSource, SourceError};

/// Creates a connected sender/source pair.
#[must_use]
pub fn channel() -> (ChangeSender, ChannelSource) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChangeSender { tx }, ChannelSource { rx })
}

/// Sending half, cloneable and usable from any thread.
///
/// Dropping every sender ends the source's stream, which a watcher reports
/// as a source termination.
#[derive(Debug, Clone)]
pub struct ChangeSender {
    tx: mpsc::UnboundedSender<ChangeEvent>,
}

impl ChangeSender {
    /// Signals that connectivity may have changed.
    ///
    /// Never blocks; events are not coalesced.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Stopped`] if the subscriber has gone away.
    pub fn notify(&self) -> Result<(), SourceError> {
        self.tx.send(ChangeEvent).map_err(|_| SourceError::Stopped)
    }

    /// Returns true once the subscriber has gone away.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half; subscribe by passing it to a watcher.
#[derive(Debug)]
pub struct ChannelSource {
    rx: mpsc::UnboundedReceiver<ChangeEvent>,
}

impl ChangeSource for ChannelSource {
    type Stream = ChannelStream;

    fn into_stream(self) -> Self::Stream {
        ChannelStream { rx: self.rx }
    }
}

/// Stream of events forwarded through a [`ChangeSender`].
#[derive(Debug)]
pub struct ChannelStream {
    rx: mpsc::UnboundedReceiver<ChangeEvent>,
}

impl Stream for ChannelStream {
    type Item = Result<ChangeEvent, SourceError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx).map(|event| event.map(Ok))
    }
}
