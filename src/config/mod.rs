//! Configuration: command line, optional TOML file, built-in defaults.
//!
//! [`ValidatedConfig::load`] merges the three sources. A value given on the
//! command line wins over the file, which wins over [`defaults`].
//!
//! Interface patterns are the exception to per-value merging: any
//! `--include-interface` replaces the file's whole `include` list, and
//! likewise for excludes. The two lists are resolved independently.
//!
//! `poll_only` is enabled if either source enables it. `--once` and
//! `--verbose` exist only on the command line.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
