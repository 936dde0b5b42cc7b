//! On-disk configuration format.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Parsed config file. Every key is optional; missing ones fall back to
/// the command line or defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Monitoring configuration
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Interface filter configuration
    #[serde(default)]
    pub filter: FilterSection,

    /// Output configuration
    #[serde(default)]
    pub report: ReportSection,
}

/// Monitoring configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Polling interval in seconds
    pub poll_interval: Option<u64>,

    /// Disable platform change notifications, use polling only
    #[serde(default)]
    pub poll_only: bool,
}

/// Interface filter configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Regex patterns for interfaces to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for interfaces to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Output configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    /// JSON status file path; `~` expands to the home directory
    pub status_file: Option<String>,
}

impl TomlConfig {
    /// Reads and parses `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# show-my-ip configuration file

[monitor]
# Polling interval in seconds (default: 5)
# Used when platform notifications are unavailable or disabled
poll_interval = 5

# Disable platform change notifications, use polling only
# poll_only = false

[filter]
# Regex patterns for interfaces to consider (empty = all)
# Note: CLI patterns REPLACE these entirely (not merged)
# include = ["^eth", "^wlan", "^en"]

# Regex patterns for interfaces to skip
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["^docker", "^veth", "^vEthernet"]

[report]
# Write {"address", "display", "updated_at"} JSON here on every refresh
# status_file = "~/.cache/show-my-ip/status.json"
"#
    .to_string()
}
