//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.monitor.heartbeat_interval.is_none());
        assert!(config.monitor.max_events.is_none());
    }

    #[test]
    fn parse_monitor_section() {
        let toml = r"
            [monitor]
            heartbeat_interval = 7200
            max_events = 3
        ";

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.monitor.heartbeat_interval, Some(7200));
        assert_eq!(config.monitor.max_events, Some(3));
    }

    #[test]
    fn rejects_unknown_section() {
        let toml = r#"
            [logging]
            level = "debug"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn rejects_unknown_monitor_field() {
        let toml = r"
            [monitor]
            refresh_interval = 60
        ";

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn rejects_negative_interval() {
        let toml = r"
            [monitor]
            heartbeat_interval = -1
        ";

        assert!(TomlConfig::parse(toml).is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let template = default_config_template();
        assert!(TomlConfig::parse(&template).is_ok());
    }

    #[test]
    fn template_documents_every_option() {
        let template = default_config_template();

        assert!(template.contains("[monitor]"));
        assert!(template.contains("heartbeat_interval"));
        assert!(template.contains("max_events"));
    }
}
