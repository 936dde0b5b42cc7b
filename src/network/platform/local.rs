//! Cross-platform interface fetcher backed by `local-ip-address`.

use std::net::IpAddr;

use crate::network::{FetchError, InterfaceFetcher, InterfaceSnapshot};

/// [`InterfaceFetcher`] that lists `AF_INET` and `AF_INET6` addresses.
///
/// Uses netlink on Linux, `getifaddrs` on macOS/OpenBSD and the IP Helper
/// adapter table on Windows, all through
/// [`local_ip_address::list_afinet_netifas`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalIpFetcher;

impl LocalIpFetcher {
    /// Creates a new fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InterfaceFetcher for LocalIpFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        let entries = local_ip_address::list_afinet_netifas()?;
        tracing::trace!("Enumerated {} interface address(es)", entries.len());
        Ok(group_by_interface(entries))
    }
}

/// Groups a flat `(name, address)` list into per-interface snapshots.
///
/// Interfaces appear in the order their first address was listed; each
/// interface keeps its addresses in listing order.
pub(crate) fn group_by_interface(
    entries: impl IntoIterator<Item = (String, IpAddr)>,
) -> Vec<InterfaceSnapshot> {
    let mut snapshots: Vec<InterfaceSnapshot> = Vec::new();

    for (name, address) in entries {
        match snapshots.iter_mut().find(|s| s.name == name) {
            Some(snapshot) => snapshot.addresses.push(address),
            None => snapshots.push(InterfaceSnapshot::new(name, vec![address])),
        }
    }

    snapshots
}
