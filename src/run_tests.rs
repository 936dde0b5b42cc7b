//! Tests for the run module.

use super::*;

mod run_error {
    use super::*;

    #[test]
    fn source_terminated_displays_message() {
        let error = RunError::SourceTerminated;
        assert_eq!(error.to_string(), "Change source terminated unexpectedly");
    }

    #[test]
    fn watch_error_displays_source() {
        let error = RunError::from(WatchError::AlreadyWatching);
        assert!(error.to_string().contains("Watcher failed"));
        assert!(error.to_string().contains("already running"));
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::SourceTerminated;
        let debug_str = format!("{error:?}");
        assert!(debug_str.contains("SourceTerminated"));
    }
}

mod runtime_options {
    use super::*;
    use show_my_ip::config::{Cli, ValidatedConfig};

    fn make_test_config(args: &[&str]) -> ValidatedConfig {
        let mut full_args = vec!["show-my-ip"];
        full_args.extend(args);
        ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
    }

    #[test]
    fn from_config_extracts_poll_settings() {
        let config = make_test_config(&["--poll-interval", "120", "--poll-only"]);
        let options = RuntimeOptions::from(&config);

        assert_eq!(options.poll_interval, Duration::from_secs(120));
        assert!(options.poll_only);
    }

    #[test]
    fn poll_only_starts_in_polling_mode() {
        let options = RuntimeOptions::from(&make_test_config(&["--poll-only"]));
        assert_eq!(options.initial_mode(), SourceMode::Polling);
    }

    #[cfg(windows)]
    #[test]
    fn default_starts_on_platform_notifications() {
        let options = RuntimeOptions::from(&make_test_config(&[]));
        assert_eq!(options.initial_mode(), SourceMode::Platform);
    }

    #[cfg(not(windows))]
    #[test]
    fn default_starts_in_polling_mode_without_native_source() {
        let options = RuntimeOptions::from(&make_test_config(&[]));
        assert_eq!(options.initial_mode(), SourceMode::Polling);
    }
}

mod mode_transitions {
    use super::*;

    #[test]
    fn requested_stop_ends_run() {
        let next = next_mode(SourceMode::Polling, Ok(StopReason::Requested)).unwrap();
        assert_eq!(next, None);
    }

    #[test]
    fn polling_termination_is_fatal() {
        let result = next_mode(SourceMode::Polling, Ok(StopReason::SourceTerminated));
        assert!(matches!(result, Err(RunError::SourceTerminated)));
    }

    #[test]
    fn watcher_error_is_propagated() {
        let result = next_mode(SourceMode::Polling, Err(WatchError::AlreadyWatching));
        assert!(matches!(
            result,
            Err(RunError::Watch(WatchError::AlreadyWatching))
        ));
    }

    #[cfg(windows)]
    #[test]
    fn platform_termination_degrades_to_polling() {
        let next = next_mode(SourceMode::Platform, Ok(StopReason::SourceTerminated)).unwrap();
        assert_eq!(next, Some(SourceMode::Polling));
    }
}

mod sinks {
    use super::*;

    #[test]
    fn console_only_by_default() {
        assert_eq!(build_sinks(None).len(), 1);
    }

    #[test]
    fn status_file_adds_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");

        assert_eq!(build_sinks(Some(&path)).len(), 2);
    }
}
