#[cfg(test)]
mod tests {
    use doable::libs::category::DEFAULT_COLOR;
    use doable::libs::config::{parse_database_url, Config, DatabaseConfig, DisplayConfig, CONFIG_FILE_NAME};
    use doable::libs::data_storage::DataStorage;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert!(config.database.is_none());
        assert!(config.display.is_none());
        assert!(!config.hide_completed());
        assert_eq!(config.default_color(), DEFAULT_COLOR);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_missing_file_is_default(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        let config = Config {
            database: Some(DatabaseConfig {
                path: PathBuf::from("/tmp/tasks.db"),
            }),
            display: Some(DisplayConfig {
                hide_completed: true,
                default_color: "#112233".to_string(),
            }),
        };

        config.save_to(&path).unwrap();
        let loaded = Config::read_from(&path).unwrap();

        assert_eq!(loaded, config);
        assert!(loaded.hide_completed());
        assert_eq!(loaded.default_color(), "#112233");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_display_section(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"display": {"hide_completed": true}}"#).unwrap();

        let config = Config::read_from(&path).unwrap();
        assert!(config.hide_completed());
        assert_eq!(config.default_color(), DEFAULT_COLOR);
    }

    #[test]
    fn test_show_completed_overrides_config() {
        let hiding = Config {
            display: Some(DisplayConfig {
                hide_completed: true,
                default_color: DEFAULT_COLOR.to_string(),
            }),
            ..Default::default()
        };
        assert!(hiding.resolve_hide_completed(false, false));
        assert!(!hiding.resolve_hide_completed(false, true));

        let showing = Config::default();
        assert!(!showing.resolve_hide_completed(false, false));
        assert!(showing.resolve_hide_completed(true, false));
    }

    #[test]
    fn test_invalid_default_color_falls_back() {
        let config = Config {
            display: Some(DisplayConfig {
                hide_completed: false,
                default_color: "teal".to_string(),
            }),
            ..Default::default()
        };
        assert_eq!(config.default_color(), DEFAULT_COLOR);
    }

    #[test]
    fn test_parse_database_url() {
        assert_eq!(parse_database_url("sqlite:///var/lib/doable.db"), Some(PathBuf::from("/var/lib/doable.db")));
        assert_eq!(parse_database_url("sqlite://todo.db"), Some(PathBuf::from("todo.db")));
        assert_eq!(parse_database_url("./local.db"), Some(PathBuf::from("./local.db")));
        assert_eq!(parse_database_url("sqlite://"), None);
        assert_eq!(parse_database_url("postgres://localhost/db"), None);
        assert_eq!(parse_database_url("   "), None);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_data_storage_creates_base_dir(ctx: &mut ConfigTestContext) {
        let base = ctx.temp_dir.path().join("nested").join("doable");
        let storage = DataStorage::with_base(&base);

        let path = storage.get_path("doable.db").unwrap();
        assert!(base.exists());
        assert_eq!(path, base.join("doable.db"));
    }
}
