//! Platform-specific network interface fetcher implementations.
//!
//! # Platform Support
//!
//! - **Linux**: netlink, via `local-ip-address`.
//! - **macOS / OpenBSD**: `getifaddrs`, via `local-ip-address`.
//! - **Windows**: `GetAdaptersAddresses`, via `local-ip-address`.

#[cfg(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "openbsd",
    windows
))]
mod local;

#[cfg(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "openbsd",
    windows
))]
pub use local::LocalIpFetcher;

// Re-export the platform fetcher as PlatformFetcher for convenience
#[cfg(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "openbsd",
    windows
))]
pub use local::LocalIpFetcher as PlatformFetcher;
