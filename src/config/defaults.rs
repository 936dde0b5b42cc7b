//! Built-in values used when neither the CLI nor the config file sets one.

/// Seconds between interface snapshots when polling.
pub const POLL_INTERVAL_SECS: u64 = 5;

/// Where `init` writes the template unless `--output` is given.
pub const CONFIG_FILE_NAME: &str = "show-my-ip.toml";
