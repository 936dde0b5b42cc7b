//! Network layer for fetching and representing interface information.
//!
//! This module provides types and traits for:
//! - Representing interface snapshots ([`InterfaceSnapshot`])
//! - Classifying individual addresses ([`AddressCandidate`])
//! - Fetching interface information ([`InterfaceFetcher`])
//! - Filtering interfaces by name ([`filter`])
//! - Platform-specific implementations ([`platform`])

mod fetcher;
pub mod filter;
mod interface;
pub mod platform;


pub use fetcher::{FetchError, InterfaceFetcher};
pub use interface::{AddressCandidate, InterfaceSnapshot};
