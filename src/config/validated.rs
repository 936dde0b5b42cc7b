//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::network::filter::{FilterChain, NameRegexFilter};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Interface filter applied before address selection
    pub filter: FilterChain,

    /// Polling interval
    pub poll_interval: Duration,

    /// Whether to skip platform notifications
    pub poll_only: bool,

    /// JSON status file, `~` already expanded.
    /// If `None`, only the console is updated.
    pub status_file: Option<PathBuf>,

    /// Resolve once and exit
    pub once: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_file_str = self
            .status_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ poll_interval: {}s, poll_only: {}, status_file: {}, \
             filters: {} include/{} exclude }}",
            self.poll_interval.as_secs(),
            self.poll_only,
            status_file_str,
            self.filter.include_count(),
            self.filter.exclude_count(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Regex patterns are invalid
    /// - The poll interval is zero
    /// - The status file path is an existing directory
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let filter = Self::build_filter(cli, toml)?;

        // Merge poll interval (default: 5)
        let poll_interval = Self::resolve_poll_interval(cli, toml)?;

        // Merge poll_only (CLI wins if true)
        let poll_only = cli.poll_only || toml.is_some_and(|t| t.monitor.poll_only);

        let status_file = Self::resolve_status_file(cli, toml);
        if let Some(path) = status_file.as_ref().filter(|p| p.is_dir()) {
            return Err(ConfigError::StatusFileIsDirectory { path: path.clone() });
        }

        Ok(Self {
            filter,
            poll_interval,
            poll_only,
            status_file,
            once: cli.once,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn build_filter(cli: &Cli, toml: Option<&TomlConfig>) -> Result<FilterChain, ConfigError> {
        // CLI lists replace TOML lists, include and exclude independently
        let includes = pick_patterns(&cli.include_interfaces, toml.map(|t| &t.filter.include));
        let excludes = pick_patterns(&cli.exclude_interfaces, toml.map(|t| &t.filter.exclude));

        let mut filter = FilterChain::new();
        for pattern in includes {
            filter = filter.include(compile_pattern(pattern)?);
        }
        for pattern in excludes {
            filter = filter.exclude(compile_pattern(pattern)?);
        }

        Ok(filter)
    }

    fn resolve_poll_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .poll_interval
            .or_else(|| toml.and_then(|t| t.monitor.poll_interval))
            .unwrap_or(defaults::POLL_INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "poll_interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_status_file(cli: &Cli, toml: Option<&TomlConfig>) -> Option<PathBuf> {
        // CLI takes precedence
        if let Some(ref path) = cli.status_file {
            return Some(expand_tilde(path));
        }

        toml.and_then(|t| t.report.status_file.as_deref())
            .map(|raw| expand_tilde(Path::new(raw)))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn pick_patterns<'a>(cli: &'a [String], toml: Option<&'a Vec<String>>) -> &'a [String] {
    if cli.is_empty() {
        toml.map(Vec::as_slice).unwrap_or_default()
    } else {
        cli
    }
}

fn compile_pattern(pattern: &str) -> Result<NameRegexFilter, ConfigError> {
    NameRegexFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, and all paths when no home directory is
/// known, are returned unchanged.
pub(crate) fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
