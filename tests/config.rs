#[cfg(test)]
mod tests {
    use kairos::libs::config::{Config, TrackerConfig};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_config(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert!(config.tracker.is_none());
        assert_eq!(config.tracker(), TrackerConfig::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_tracker_defaults(_ctx: &mut ConfigTestContext) {
        let tracker = TrackerConfig::default();
        assert_eq!(tracker.tick_interval, 1000);
        assert_eq!(tracker.retry_delay, 2000);
        assert_eq!(tracker.max_tick_failures, 5);
        assert_eq!(tracker.backup_interval, 30);
        assert_eq!(tracker.stop_timeout, 1000);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_missing_file_falls_back_to_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_round_trip(_ctx: &mut ConfigTestContext) {
        let config = Config {
            tracker: Some(TrackerConfig {
                tick_interval: 500,
                retry_delay: 1000,
                max_tick_failures: 10,
                backup_interval: 60,
                stop_timeout: 2000,
            }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.tracker().tick_interval, 500);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_config_fills_missing_fields(_ctx: &mut ConfigTestContext) {
        // Older config files may predate newer fields; serde defaults apply.
        let partial: TrackerConfig =
            serde_json::from_str(r#"{"tick_interval": 250}"#).unwrap();
        assert_eq!(partial.tick_interval, 250);
        assert_eq!(partial.retry_delay, 2000);
        assert_eq!(partial.max_tick_failures, 5);
    }
}
