//! Tests for CLI argument parsing.

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from_iter(["netchange"]);

        assert!(cli.command.is_none());
        assert!(cli.heartbeat_interval.is_none());
        assert!(cli.max_events.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_monitor_options() {
        let cli = Cli::parse_from_iter([
            "netchange",
            "--heartbeat-interval",
            "3600",
            "--max-events",
            "5",
        ]);

        assert_eq!(cli.heartbeat_interval, Some(3600));
        assert_eq!(cli.max_events, Some(5));
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from_iter(["netchange", "-v", "-c", "custom.toml"]);

        assert!(cli.verbose);
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("custom.toml"))
        );
    }

    #[test]
    fn rejects_non_numeric_interval() {
        use clap::Parser;

        let result = Cli::try_parse_from(["netchange", "--heartbeat-interval", "soon"]);
        assert!(result.is_err());
    }
}

mod init_command {
    use super::*;

    #[test]
    fn init_uses_default_output() {
        let cli = Cli::parse_from_iter(["netchange", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, std::path::PathBuf::from("netchange.toml"));
            }
            None => panic!("expected init command"),
        }
    }

    #[test]
    fn init_accepts_custom_output() {
        let cli = Cli::parse_from_iter(["netchange", "init", "-o", "out.toml"]);

        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, std::path::PathBuf::from("out.toml"));
            }
            None => panic!("expected init command"),
        }
    }

    #[test]
    fn run_mode_is_not_init() {
        let cli = Cli::parse_from_iter(["netchange", "--max-events", "1"]);
        assert!(!cli.is_init());
    }
}
