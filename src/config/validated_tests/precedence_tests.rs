//! Tests for CLI vs TOML precedence rules.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::super::validated::expand_tilde;
use super::*;

mod cli_precedence {
    use super::*;

    #[test]
    fn cli_poll_interval_overrides_toml() {
        let toml = toml("[monitor]\npoll_interval = 30\n");

        let config =
            ValidatedConfig::from_raw(&cli(&["--poll-interval", "2"]), Some(&toml)).unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn toml_poll_interval_overrides_default() {
        let toml = toml("[monitor]\npoll_interval = 30\n");

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn cli_status_file_overrides_toml() {
        let toml = toml("[report]\nstatus_file = \"/toml/status.json\"\n");

        let config =
            ValidatedConfig::from_raw(&cli(&["--status-file", "/cli/status.json"]), Some(&toml))
                .unwrap();

        assert_eq!(config.status_file, Some(PathBuf::from("/cli/status.json")));
    }

    #[test]
    fn cli_include_replaces_toml_include_only() {
        use crate::network::InterfaceSnapshot;
        use crate::network::filter::InterfaceFilter;

        let toml = toml(
            r#"
            [filter]
            include = ["^wlan"]
            exclude = ["^eth1$"]
        "#,
        );

        let config =
            ValidatedConfig::from_raw(&cli(&["--include-interface", "^eth"]), Some(&toml))
                .unwrap();

        assert_eq!(config.filter.include_count(), 1);
        assert_eq!(config.filter.exclude_count(), 1);
        assert!(config.filter.matches(&InterfaceSnapshot::new("eth0", vec![])));
        assert!(!config.filter.matches(&InterfaceSnapshot::new("eth1", vec![])));
        assert!(!config.filter.matches(&InterfaceSnapshot::new("wlan0", vec![])));
    }
}

mod boolean_flags {
    use super::*;

    #[test]
    fn poll_only_from_toml() {
        let toml = toml("[monitor]\npoll_only = true\n");

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(config.poll_only);
    }

    #[test]
    fn poll_only_from_cli() {
        let toml = toml("[monitor]\npoll_only = false\n");

        let config = ValidatedConfig::from_raw(&cli(&["--poll-only"]), Some(&toml)).unwrap();

        assert!(config.poll_only);
    }

    #[test]
    fn once_and_verbose_are_cli_only() {
        let config = ValidatedConfig::from_raw(&cli(&["--once", "-v"]), None).unwrap();

        assert!(config.once);
        assert!(config.verbose);
    }
}

mod tilde {
    use super::*;

    #[test]
    fn expands_leading_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        assert_eq!(
            expand_tilde(Path::new("~/status.json")),
            home.join("status.json")
        );
    }

    #[test]
    fn leaves_other_paths_alone() {
        assert_eq!(
            expand_tilde(Path::new("/var/status.json")),
            PathBuf::from("/var/status.json")
        );
        assert_eq!(
            expand_tilde(Path::new("~other/status.json")),
            PathBuf::from("~other/status.json")
        );
    }

    #[test]
    fn toml_status_file_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let toml = toml("[report]\nstatus_file = \"~/.cache/status.json\"\n");

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.status_file, Some(home.join(".cache/status.json")));
    }
}
