//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading the command line and
/// having a [`ValidatedConfig`](super::ValidatedConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `--config` file could not be read.
    #[error("Cannot read config file '{}': {source}", path.display())]
    FileRead {
        /// Path passed to `--config`
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown/mistyped keys.
    #[error("Invalid config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `init` could not write the template.
    #[error("Cannot write config template to '{}': {source}", path.display())]
    FileWrite {
        /// Output path of `init`
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An include/exclude interface pattern is not a valid regex.
    #[error("Invalid interface pattern '{pattern}': {source}")]
    InvalidRegex {
        /// Pattern as written by the user
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A duration setting is out of range.
    #[error("Invalid {field}: {reason}")]
    InvalidDuration {
        /// Setting name as it appears in the TOML file
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The status file path names an existing directory.
    #[error("Status file '{}' is a directory", path.display())]
    StatusFileIsDirectory {
        /// Path after `~` expansion
        path: PathBuf,
    },
}
