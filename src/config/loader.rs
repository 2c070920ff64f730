//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LogConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LogConfig, ConfigError> {
    let config: LogConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::debug!(path = ?path, "Logging configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.colors);
        assert!(config.prefixes);
        assert_eq!(config.stderr_level, "debug");
        assert_eq!(config.files.directory, "logs");
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"
            colors = false
            stderr_level = "warn"

            [files]
            enabled = false

            [styles]
            path = { color = "magenta", underlined = true }
            "#,
        )
        .unwrap();

        assert!(!config.colors);
        assert_eq!(config.stderr_level, "warn");
        assert!(!config.files.enabled);
        // untouched keys keep their defaults
        assert_eq!(config.files.plain_file, "logweave-plain.log");
        assert!(config.styles.path.underlined);
        assert!(config.styles.command.dim);
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_config("colors = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors_are_collected() {
        let err = parse_config(
            r#"
            stderr_level = "loud"
            timestamp_format = ""
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "replace_newlines = false").unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(!config.replace_newlines);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/logweave.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
