//! Primary address selection.

use std::net::IpAddr;

use super::ResolvedAddress;
use crate::network::{InterfaceFetcher, InterfaceSnapshot};

/// Selects the first non-loopback IPv4 address from a snapshot.
///
/// Interfaces are walked in the given order and, within each interface,
/// addresses in the given order. The first qualifying address wins; there
/// is no preference between interface types beyond enumeration order.
#[must_use]
pub fn select_address(snapshot: &[InterfaceSnapshot]) -> ResolvedAddress {
    snapshot
        .iter()
        .flat_map(InterfaceSnapshot::candidates)
        .find(|candidate| candidate.qualifies())
        .and_then(|candidate| match candidate.address {
            IpAddr::V4(addr) => Some(ResolvedAddress::Available(addr)),
            IpAddr::V6(_) => None,
        })
        .unwrap_or(ResolvedAddress::Unavailable)
}

/// Resolves the host's primary address from live interface state.
///
/// Holds no state besides its fetcher: every call re-enumerates, so two
/// calls against an unchanged host return the same value.
///
/// # Example
///
/// ```ignore
/// use show_my_ip::network::platform::PlatformFetcher;
/// use show_my_ip::resolver::AddressResolver;
///
/// let resolver = AddressResolver::new(PlatformFetcher::new());
/// println!("{}", resolver.resolve());
/// ```
#[derive(Debug)]
pub struct AddressResolver<F> {
    fetcher: F,
}

impl<F: InterfaceFetcher> AddressResolver<F> {
    /// Creates a resolver reading interfaces through `fetcher`.
    #[must_use]
    pub const fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Returns a reference to the fetcher.
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolves the current primary address.
    ///
    /// Enumeration failures degrade to [`ResolvedAddress::Unavailable`];
    /// losing connectivity is an expected state, not an error.
    pub fn resolve(&self) -> ResolvedAddress {
        match self.fetcher.fetch() {
            Ok(snapshot) => {
                let resolved = select_address(&snapshot);
                tracing::debug!(
                    "Resolved {resolved} from {} interface(s)",
                    snapshot.len()
                );
                resolved
            }
            Err(e) => {
                tracing::warn!("{e}; reporting address as unavailable");
                ResolvedAddress::Unavailable
            }
        }
    }
}
