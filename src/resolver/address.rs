//! The resolver's output type.

use std::fmt;
use std::net::Ipv4Addr;

/// Text shown when no address could be resolved.
pub const UNAVAILABLE_TEXT: &str = "No network connection";

/// The host's primary address, or the "unavailable" sentinel.
///
/// Never holds a loopback address: [`super::select_address`] is the only
/// place that constructs [`ResolvedAddress::Available`] from host state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedAddress {
    /// A concrete, non-loopback IPv4 address.
    Available(Ipv4Addr),
    /// No qualifying address, or enumeration failed.
    Unavailable,
}

impl ResolvedAddress {
    /// Returns the address, if one was resolved.
    #[must_use]
    pub const fn address(&self) -> Option<Ipv4Addr> {
        match self {
            Self::Available(addr) => Some(*addr),
            Self::Unavailable => None,
        }
    }

    /// Returns true if an address was resolved.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(addr) => write!(f, "{addr}"),
            Self::Unavailable => f.write_str(UNAVAILABLE_TEXT),
        }
    }
}
