//! Process-level helpers for `main`: exit codes, log setup and
//! configuration hints.

use show_my_ip::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, unreadable config file, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - change source gone, watcher task failed, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns a hint for common configuration errors, if there is one.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            Some("Run 'show-my-ip init' to generate a configuration template.")
        }
        ConfigError::InvalidRegex { .. } => {
            Some("Interface patterns are regular expressions, e.g. '^eth' or '^(en|wl)'.")
        }
        ConfigError::InvalidDuration { .. } => {
            Some("poll_interval is a whole number of seconds, at least 1.")
        }
        ConfigError::StatusFileIsDirectory { .. } => {
            Some("--status-file takes a file path, e.g. '~/.cache/show-my-ip/status.json'.")
        }
        ConfigError::FileWrite { .. } => None,
    }
}

/// Prints the hint for `error` to stderr, if any.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Sets up the tracing subscriber for logging.
///
/// `RUST_LOG` overrides the default level.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_suggests_init() {
        let error = ConfigError::FileRead {
            path: PathBuf::from("show-my-ip.toml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert!(config_hint(&error).unwrap().contains("show-my-ip init"));
    }

    #[test]
    fn bad_interval_explains_unit() {
        let error = ConfigError::InvalidDuration {
            field: "poll_interval",
            reason: "must be greater than 0".to_string(),
        };

        assert!(config_hint(&error).unwrap().contains("seconds"));
    }

    #[test]
    fn directory_status_file_shows_example_path() {
        let error = ConfigError::StatusFileIsDirectory {
            path: PathBuf::from("/tmp"),
        };

        assert!(config_hint(&error).unwrap().contains("status.json"));
    }

    #[test]
    fn write_failure_has_no_hint() {
        let error = ConfigError::FileWrite {
            path: PathBuf::from("/nope/show-my-ip.toml"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };

        assert_eq!(config_hint(&error), None);
    }
}
