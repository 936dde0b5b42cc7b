//! Shared fixtures for watcher tests.

use super::WatchControl;
use crate::monitor::{ChangeEvent, ChangeSource, SourceError};
use crate::network::{FetchError, InterfaceFetcher, InterfaceSnapshot};
use crate::report::Reporter;
use crate::resolver::ResolvedAddress;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use tokio::sync::mpsc;

pub fn wlan(addr: &str) -> Vec<InterfaceSnapshot> {
    vec![
        InterfaceSnapshot::new("lo", vec!["127.0.0.1".parse().unwrap()]),
        InterfaceSnapshot::new("wlan0", vec![addr.parse().unwrap()]),
    ]
}

pub fn loopback_only() -> Vec<InterfaceSnapshot> {
    vec![InterfaceSnapshot::new(
        "lo",
        vec!["127.0.0.1".parse().unwrap()],
    )]
}

pub fn available(addr: &str) -> ResolvedAddress {
    ResolvedAddress::Available(addr.parse().unwrap())
}

/// Fetcher that replays snapshots in order, then repeats the last one.
pub struct SequenceFetcher {
    snapshots: Mutex<VecDeque<Vec<InterfaceSnapshot>>>,
    last: Mutex<Vec<InterfaceSnapshot>>,
}

impl SequenceFetcher {
    pub fn new(snapshots: Vec<Vec<InterfaceSnapshot>>) -> Self {
        Self {
            snapshots: Mutex::new(snapshots.into()),
            last: Mutex::new(Vec::new()),
        }
    }

    pub fn repeating(snapshot: Vec<InterfaceSnapshot>) -> Self {
        Self::new(vec![snapshot])
    }
}

impl InterfaceFetcher for SequenceFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        let next = self.snapshots.lock().unwrap().pop_front();
        if let Some(snapshot) = next {
            *self.last.lock().unwrap() = snapshot;
        }
        Ok(self.last.lock().unwrap().clone())
    }
}

/// Fetcher that stops the session from inside the given call.
pub struct StoppingFetcher {
    control: Arc<OnceLock<WatchControl>>,
    stop_on_call: usize,
    calls: AtomicUsize,
}

impl StoppingFetcher {
    pub fn new(control: Arc<OnceLock<WatchControl>>, stop_on_call: usize) -> Self {
        Self {
            control,
            stop_on_call,
            calls: AtomicUsize::new(0),
        }
    }
}

impl InterfaceFetcher for StoppingFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.stop_on_call {
            if let Some(control) = self.control.get() {
                control.stop();
            }
        }
        Ok(wlan("192.168.1.42"))
    }
}

/// Reporter that forwards every report to a channel the test reads.
pub struct RecordingReporter {
    tx: mpsc::UnboundedSender<ResolvedAddress>,
}

impl RecordingReporter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ResolvedAddress>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, address: &ResolvedAddress) {
        let _ = self.tx.send(*address);
    }
}

/// Reporter that panics on its first report only.
pub struct PanicOnceReporter {
    calls: AtomicUsize,
}

impl PanicOnceReporter {
    pub const fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl Reporter for PanicOnceReporter {
    fn report(&self, _address: &ResolvedAddress) {
        assert!(
            self.calls.fetch_add(1, Ordering::SeqCst) > 0,
            "reporter failed"
        );
    }
}

/// Reporter that, on the given call, announces itself, lingers so a
/// concurrent `stop()` can queue up, then queries the session status.
pub struct StatusQueryReporter {
    control: Arc<OnceLock<WatchControl>>,
    query_on_call: usize,
    calls: AtomicUsize,
    entered: mpsc::UnboundedSender<()>,
    seen: mpsc::UnboundedSender<bool>,
}

impl StatusQueryReporter {
    pub fn new(
        control: Arc<OnceLock<WatchControl>>,
        query_on_call: usize,
    ) -> (
        Self,
        mpsc::UnboundedReceiver<()>,
        mpsc::UnboundedReceiver<bool>,
    ) {
        let (entered, entered_rx) = mpsc::unbounded_channel();
        let (seen, seen_rx) = mpsc::unbounded_channel();
        let reporter = Self {
            control,
            query_on_call,
            calls: AtomicUsize::new(0),
            entered,
            seen,
        };
        (reporter, entered_rx, seen_rx)
    }
}

impl Reporter for StatusQueryReporter {
    fn report(&self, _address: &ResolvedAddress) {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call != self.query_on_call {
            return;
        }
        let _ = self.entered.send(());
        std::thread::sleep(Duration::from_millis(200));
        if let Some(control) = self.control.get() {
            let _ = self.seen.send(control.is_watching());
        }
    }
}

/// Source that yields a fixed script of items, then ends.
pub struct ScriptedSource {
    items: Vec<Result<ChangeEvent, SourceError>>,
}

impl ScriptedSource {
    pub const fn new(items: Vec<Result<ChangeEvent, SourceError>>) -> Self {
        Self { items }
    }
}

impl ChangeSource for ScriptedSource {
    type Stream = tokio_stream::Iter<std::vec::IntoIter<Result<ChangeEvent, SourceError>>>;

    fn into_stream(self) -> Self::Stream {
        tokio_stream::iter(self.items)
    }
}
