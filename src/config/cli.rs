//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// show-my-ip: primary local IPv4 address display
///
/// Prints the host's first non-loopback IPv4 address and prints it again
/// whenever network connectivity changes it.
#[derive(Debug, Parser)]
#[command(name = "show-my-ip")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Regex pattern for interfaces to include (can be specified multiple times)
    #[arg(long = "include-interface", value_name = "PATTERN")]
    pub include_interfaces: Vec<String>,

    /// Regex pattern for interfaces to exclude (can be specified multiple times)
    #[arg(long = "exclude-interface", value_name = "PATTERN")]
    pub exclude_interfaces: Vec<String>,

    /// Seconds between interface snapshots when polling [default: 5]
    #[arg(long = "poll-interval")]
    pub poll_interval: Option<u64>,

    /// Disable platform change notifications, use polling only
    #[arg(long = "poll-only")]
    pub poll_only: bool,

    /// Write the current address as JSON to this file on every refresh
    #[arg(long = "status-file")]
    pub status_file: Option<PathBuf>,

    /// Resolve and print the address once, then exit
    #[arg(long)]
    pub once: bool,

    /// TOML configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a commented configuration template
    Init {
        /// Where to write the template
        #[arg(long, short, default_value = defaults::CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses `std::env::args`, exiting with usage on error.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses an explicit argument list; the first item is the binary name.
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// True when invoked as `show-my-ip init`.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
