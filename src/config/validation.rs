//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check level names and filter directives parse
//! - Check the timestamp format is a valid `strftime` pattern
//! - Check log file names when file output is enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LogConfig → Result<(), Vec<ValidationError>>

use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::schema::LogConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown stderr_level '{0}'")]
    UnknownLevel(String),

    #[error("invalid filter directives '{directives}': {reason}")]
    InvalidFilter { directives: String, reason: String },

    #[error("timestamp_format must not be empty")]
    EmptyTimestampFormat,

    #[error("invalid timestamp_format '{0}'")]
    InvalidTimestampFormat(String),

    #[error("files.{0} must not be empty")]
    EmptyFileName(&'static str),

    #[error("files.color_file and files.plain_file must differ")]
    SameLogFile,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if Level::from_str(&config.stderr_level).is_err() {
        errors.push(ValidationError::UnknownLevel(config.stderr_level.clone()));
    }

    if let Err(e) = EnvFilter::try_new(&config.filter) {
        errors.push(ValidationError::InvalidFilter {
            directives: config.filter.clone(),
            reason: e.to_string(),
        });
    }

    if config.timestamp_format.is_empty() {
        errors.push(ValidationError::EmptyTimestampFormat);
    } else if StrftimeItems::new(&config.timestamp_format).any(|item| matches!(item, Item::Error)) {
        errors.push(ValidationError::InvalidTimestampFormat(
            config.timestamp_format.clone(),
        ));
    }

    let files = &config.files;
    if files.enabled {
        if files.color_file.is_empty() {
            errors.push(ValidationError::EmptyFileName("color_file"));
        }
        if files.plain_file.is_empty() {
            errors.push(ValidationError::EmptyFileName("plain_file"));
        }
        if !files.color_file.is_empty() && files.color_file == files.plain_file {
            errors.push(ValidationError::SameLogFile);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&LogConfig::default()).is_ok());
    }

    #[test]
    fn test_level_names() {
        let mut config = LogConfig::default();
        for level in ["trace", "DEBUG", "info", "warn", "error"] {
            config.stderr_level = level.to_string();
            assert!(validate_config(&config).is_ok(), "{level} should be accepted");
        }

        config.stderr_level = "verbose".to_string();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::UnknownLevel("verbose".to_string())]
        );
    }

    #[test]
    fn test_bad_timestamp_format() {
        let mut config = LogConfig::default();
        config.timestamp_format = "%Y-%".to_string();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidTimestampFormat("%Y-%".to_string())]
        );
    }

    #[test]
    fn test_file_names_checked_only_when_enabled() {
        let mut config = LogConfig::default();
        config.files.plain_file = config.files.color_file.clone();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::SameLogFile]
        );

        config.files.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_bad_filter() {
        let mut config = LogConfig::default();
        config.filter = "logweave=notalevel".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidFilter { .. }));
    }
}
