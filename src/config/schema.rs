//! Configuration schema definitions.
//!
//! This module defines the configuration structure for building a logger
//! from a file. All types derive Serde traits for deserialization from
//! TOML config files.

use serde::{Deserialize, Serialize};

use crate::handler::TableOptions;

/// Root configuration for a logger.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether emitted messages are retained in memory for inspection.
    pub collect_messages: bool,

    /// Handler definitions, in dispatch order.
    pub handlers: Vec<HandlerConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            collect_messages: true,
            handlers: Vec::new(),
        }
    }
}

/// One handler definition, tagged by kind.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HandlerConfig {
    /// Append formatted lines to a file.
    File {
        /// Log file path; created on first write.
        path: String,
    },

    /// Write formatted lines to stdout.
    Display,

    /// Insert rows into an SQLite database.
    Database {
        /// Database file path.
        path: String,

        /// Table and column names.
        #[serde(default)]
        options: TableOptions,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: LoggingConfig = toml::from_str("").unwrap();
        assert!(config.collect_messages);
        assert!(config.handlers.is_empty());
    }

    #[test]
    fn test_parse_handler_kinds() {
        let config: LoggingConfig = toml::from_str(
            r#"
            collect_messages = false

            [[handlers]]
            kind = "file"
            path = "app.log"

            [[handlers]]
            kind = "display"

            [[handlers]]
            kind = "database"
            path = "logs.db"

            [handlers.options]
            table = "audit"
            "#,
        )
        .unwrap();

        assert!(!config.collect_messages);
        assert_eq!(config.handlers.len(), 3);
        assert_eq!(
            config.handlers[0],
            HandlerConfig::File {
                path: "app.log".to_string()
            }
        );
        assert_eq!(config.handlers[1], HandlerConfig::Display);
        match &config.handlers[2] {
            HandlerConfig::Database { path, options } => {
                assert_eq!(path, "logs.db");
                assert_eq!(options.table, "audit");
                // Unspecified columns keep their defaults.
                assert_eq!(options.level_column, "level");
            }
            other => panic!("unexpected handler config: {other:?}"),
        }
    }
}
