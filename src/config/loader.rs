//! Configuration loading from disk.
//!
//! # Responsibilities
//! - Load and parse TOML config files
//! - Semantic validation (serde handles syntactic)
//! - Build a ready-to-use logger from a validated config
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: LoggingConfig → Result<(), Vec<ValidationError>>

use std::fs;
use std::path::Path;
use thiserror::Error;

use rusqlite::Connection;

use crate::config::schema::{HandlerConfig, LoggingConfig};
use crate::handler::{DatabaseHandler, DisplayHandler, FileHandler, HandlerError};
use crate::logger::Logger;

/// One semantic violation found in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("handler {index}: file path is empty")]
    EmptyFilePath { index: usize },

    #[error("handler {index}: database path is empty")]
    EmptyDatabasePath { index: usize },

    #[error("handler {index}: '{name}' is not a valid table or column name")]
    InvalidTableName { index: usize, name: String },
}

/// Table and column names end up inside SQL statements, so they are
/// restricted to `[A-Za-z_][A-Za-z0-9_]*`.
fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let leading_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    leading_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Error type for configuration loading and logger construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("database open failed: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("handler setup failed: {0}")]
    Handler(#[from] HandlerError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoggingConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: LoggingConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        handlers = config.handlers.len(),
        collect = config.collect_messages,
        "configuration loaded"
    );
    Ok(config)
}

/// Check semantic constraints, collecting every violation.
pub fn validate_config(config: &LoggingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, handler) in config.handlers.iter().enumerate() {
        match handler {
            HandlerConfig::File { path } => {
                if path.is_empty() {
                    errors.push(ValidationError::EmptyFilePath { index });
                }
            }
            HandlerConfig::Display => {}
            HandlerConfig::Database { path, options } => {
                if path.is_empty() {
                    errors.push(ValidationError::EmptyDatabasePath { index });
                }
                let names = [
                    &options.table,
                    &options.datetime_column,
                    &options.level_column,
                    &options.message_column,
                    &options.context_column,
                ];
                for name in names {
                    if !is_sql_identifier(name) {
                        errors.push(ValidationError::InvalidTableName {
                            index,
                            name: name.clone(),
                        });
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Construct a logger with the configured handlers, in config order.
///
/// Database handlers get their connection opened here and their table
/// created if missing; the logger owns the connections from then on.
pub fn build_logger(config: &LoggingConfig) -> Result<Logger, ConfigError> {
    let mut builder = Logger::builder().collect_messages(config.collect_messages);

    for handler in &config.handlers {
        match handler {
            HandlerConfig::File { path } => {
                builder = builder.handler(FileHandler::new(path));
            }
            HandlerConfig::Display => {
                builder = builder.handler(DisplayHandler::new());
            }
            HandlerConfig::Database { path, options } => {
                let connection = Connection::open(path)?;
                let database = DatabaseHandler::new(connection, options.clone());
                database.ensure_schema()?;
                builder = builder.handler(database);
            }
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Context;

    #[test]
    fn test_validate_reports_all_errors() {
        let config: LoggingConfig = toml::from_str(
            r#"
            [[handlers]]
            kind = "file"
            path = ""

            [[handlers]]
            kind = "database"
            path = ""

            [handlers.options]
            table = ""
            "#,
        )
        .unwrap();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyFilePath { index: 0 },
                ValidationError::EmptyDatabasePath { index: 1 },
                ValidationError::InvalidTableName {
                    index: 1,
                    name: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_validate_rejects_non_identifier_names() {
        let config: LoggingConfig = toml::from_str(
            r#"
            [[handlers]]
            kind = "database"
            path = "logs.db"

            [handlers.options]
            table = "logs; DROP TABLE logs"
            level_column = "lev el"
            "#,
        )
        .unwrap();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidTableName {
                    index: 0,
                    name: "logs; DROP TABLE logs".to_string(),
                },
                ValidationError::InvalidTableName {
                    index: 0,
                    name: "lev el".to_string(),
                },
            ]
        );

        // Ordinary identifiers, leading underscores included, still pass.
        let config: LoggingConfig = toml::from_str(
            r#"
            [[handlers]]
            kind = "database"
            path = "logs.db"

            [handlers.options]
            table = "_audit_2024"
            "#,
        )
        .unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/logger.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let path = std::env::temp_dir().join("fanout_loader_bad.toml");
        fs::write(&path, "handlers = not-a-list").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_build_logger_from_config() {
        let log_path = std::env::temp_dir().join("fanout_loader_build.log");
        std::fs::remove_file(&log_path).unwrap_or_default();

        let config: LoggingConfig = toml::from_str(&format!(
            r#"
            [[handlers]]
            kind = "file"
            path = "{}"
            "#,
            log_path.display()
        ))
        .unwrap();

        let mut logger = build_logger(&config).unwrap();
        assert_eq!(logger.handler_count(), 1);

        logger.info("configured and working", Context::new()).unwrap();
        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("info: configured and working"));
        assert_eq!(logger.collection().map(|c| c.len()), Some(1));

        fs::remove_file(&log_path).unwrap_or_default();
    }
}
