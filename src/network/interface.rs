//! Core network types for interface representation.

use std::net::IpAddr;

/// A snapshot of a single network interface's addresses at a point in time.
///
/// Addresses keep the order the platform reported them in; resolution
/// depends on that order.
///
/// # Equality
///
/// Two snapshots are equal if they have the same name and the same
/// addresses in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSnapshot {
    /// The interface name (e.g., "eth0", "wlan0", "Wi-Fi").
    pub name: String,
    /// All addresses assigned to this interface, IPv4 and IPv6 interleaved.
    pub addresses: Vec<IpAddr>,
}

impl InterfaceSnapshot {
    /// Creates a new interface snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, addresses: Vec<IpAddr>) -> Self {
        Self {
            name: name.into(),
            addresses,
        }
    }

    /// Returns true if this interface has any addresses.
    #[must_use]
    pub fn has_addresses(&self) -> bool {
        !self.addresses.is_empty()
    }

    /// Iterates this interface's addresses as [`AddressCandidate`]s, in order.
    pub fn candidates(&self) -> impl Iterator<Item = AddressCandidate> + '_ {
        self.addresses.iter().copied().map(AddressCandidate::from)
    }
}

/// An address under consideration during a single resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCandidate {
    /// The address itself.
    pub address: IpAddr,
    /// Whether the address belongs to the local host only.
    pub is_loopback: bool,
    /// Whether the address is IPv4.
    pub is_ipv4: bool,
}

impl AddressCandidate {
    /// Returns true if this candidate can be reported as the host's address.
    #[must_use]
    pub const fn qualifies(&self) -> bool {
        !self.is_loopback && self.is_ipv4
    }
}

impl From<IpAddr> for AddressCandidate {
    fn from(address: IpAddr) -> Self {
        Self {
            address,
            is_loopback: address.is_loopback(),
            is_ipv4: address.is_ipv4(),
        }
    }
}
