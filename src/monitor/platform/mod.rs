//! Platform change sources.
//!
//! Only Windows has a native notification source. Elsewhere the watcher
//! runs on [`PollingSource`](super::PollingSource) or a host-fed
//! [`ChannelSource`](super::ChannelSource).

#[cfg(windows)]
mod windows;


#[cfg(windows)]
pub use windows::{WindowsChangeSource, WindowsChangeStream};

#[cfg(windows)]
pub use windows::WindowsChangeSource as PlatformSource;
