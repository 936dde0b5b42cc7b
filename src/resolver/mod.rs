//! Primary address resolution.
//!
//! This module provides:
//! - The resolver's output ([`ResolvedAddress`])
//! - Pure selection over a snapshot ([`select_address`])
//! - Live resolution through a fetcher ([`AddressResolver`])

mod address;
mod select;


pub use address::{ResolvedAddress, UNAVAILABLE_TEXT};
pub use select::{AddressResolver, select_address};
