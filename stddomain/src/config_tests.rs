#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::io::Write;

    use crate::config::{Config, ConfigError, LogLevel, load_config};
    use tempfile::NamedTempFile;
    use tracing::level_filters::LevelFilter;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config("/nonexistent/stddomain.toml").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log.level, LogLevel::Warn);
        assert!(!config.suffix.include_private);
    }

    #[test]
    fn test_partial_file() {
        let file = write_config("[log]\nlevel = \"debug\"\n");
        let config = load_config(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.suffix.path, None);
    }

    #[test]
    fn test_full_file() {
        let file = write_config(
            "[log]\nlevel = \"trace\"\n\n[suffix]\npath = \"/tmp/psl.dat\"\ninclude_private = true\n",
        );
        let config = load_config(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.log.level, LogLevel::Trace);
        assert_eq!(config.suffix.path.as_deref(), Some("/tmp/psl.dat"));
        assert!(config.suffix.include_private);
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("[log]\nlevel = \"loud\"\n");
        assert!(load_config(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Read(_))
        ));
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
    }

    #[test]
    fn test_suffix_list_selection() {
        let mut config = Config::default();
        assert!(matches!(config.suffix.load().unwrap(), Cow::Borrowed(_)));

        config.suffix.include_private = true;
        let list = config.suffix.load().unwrap();
        assert_eq!(list.split("me.github.io").suffix, "github.io");

        let file = write_config("com\n");
        config.suffix.path = Some(file.path().to_str().unwrap().to_string());
        let list = config.suffix.load().unwrap();
        assert!(matches!(list, Cow::Owned(_)));
        assert_eq!(list.split("www.example.co.uk").suffix, "uk");

        config.suffix.path = Some("/nonexistent/psl.dat".into());
        assert!(config.suffix.load().is_err());
    }
}
