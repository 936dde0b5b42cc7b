//! show-my-ip: primary local IPv4 address display
//!
//! A library for resolving the host's primary local IPv4 address and
//! re-reporting it whenever network connectivity changes.

pub mod config;
pub mod monitor;
pub mod network;
pub mod report;
pub mod resolver;
pub mod time;
