//! Interface fetching trait and error types.

use std::sync::Arc;

use super::InterfaceSnapshot;
use thiserror::Error;

/// Error type for interface enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
/// The resolver treats every variant as "no address available".
#[derive(Debug, Error)]
pub enum FetchError {
    /// The platform refused or failed to list interfaces.
    #[error("Interface enumeration failed: {message}")]
    Enumeration {
        /// Error message from the enumeration backend.
        message: String,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

impl From<local_ip_address::Error> for FetchError {
    fn from(error: local_ip_address::Error) -> Self {
        match error {
            local_ip_address::Error::PlatformNotSupported(platform) => Self::Platform {
                message: format!("unsupported platform: {platform}"),
            },
            // Strategy errors carry only the OS message text, not an io::Error
            other => Self::Enumeration {
                message: other.to_string(),
            },
        }
    }
}

/// Trait for fetching the host's network interfaces.
///
/// # Design
///
/// - Every interface source implements this trait
/// - Enables dependency injection for testing with mock implementations
/// - Platform-specific implementations provided in [`super::platform`]
///
/// # Example
///
/// ```ignore
/// use show_my_ip::network::{InterfaceFetcher, InterfaceSnapshot, FetchError};
///
/// struct FixedFetcher(Vec<InterfaceSnapshot>);
///
/// impl InterfaceFetcher for FixedFetcher {
///     fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait InterfaceFetcher: Send + Sync {
    /// Fetches the current state of all network interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the platform cannot list interfaces.
    ///
    /// # Implementation Notes
    ///
    /// - Implementations return interfaces in platform enumeration order
    /// - Address order within each interface must be preserved
    /// - Results are never cached; every call reads live state
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError>;
}

impl<F: InterfaceFetcher + ?Sized> InterfaceFetcher for Arc<F> {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        self.as_ref().fetch()
    }
}
