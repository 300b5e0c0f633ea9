//! Database log handler.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::handler::{Handler, HandlerError};
use crate::message::LogMessage;

/// Table and column names used by [`DatabaseHandler`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableOptions {
    pub table: String,
    pub datetime_column: String,
    pub level_column: String,
    pub message_column: String,
    pub context_column: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            table: "logs".to_string(),
            datetime_column: "datetime".to_string(),
            level_column: "level".to_string(),
            message_column: "message".to_string(),
            context_column: "context".to_string(),
        }
    }
}

/// Inserts one row per message via a caller-supplied connection.
///
/// The handler never opens or closes the connection; the caller owns its
/// lifecycle and its schema (primary keys included). Each row stores the
/// message timestamp as RFC 3339 text and the context as JSON text.
pub struct DatabaseHandler {
    connection: Connection,
    options: TableOptions,
    insert_sql: String,
}

impl DatabaseHandler {
    pub fn new(connection: Connection, options: TableOptions) -> Self {
        // Identifiers cannot be bound as parameters, so the statement is
        // assembled once from the configured names.
        let insert_sql = format!(
            "INSERT INTO {} ({}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4)",
            options.table,
            options.datetime_column,
            options.level_column,
            options.message_column,
            options.context_column,
        );
        Self {
            connection,
            options,
            insert_sql,
        }
    }

    /// Handler with the default table layout (`logs` table, `datetime`,
    /// `level`, `message`, `context` columns).
    pub fn with_defaults(connection: Connection) -> Self {
        Self::new(connection, TableOptions::default())
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Create the configured table if it does not exist. Convenience for
    /// callers without a migration step; the columns are all TEXT and no
    /// primary key is imposed.
    pub fn ensure_schema(&self) -> Result<(), HandlerError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({} TEXT NOT NULL, {} TEXT NOT NULL, {} TEXT NOT NULL, {} TEXT NOT NULL)",
            self.options.table,
            self.options.datetime_column,
            self.options.level_column,
            self.options.message_column,
            self.options.context_column,
        );
        self.connection.execute_batch(&sql)?;
        Ok(())
    }
}

impl std::fmt::Debug for DatabaseHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseHandler")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Handler for DatabaseHandler {
    fn name(&self) -> &str {
        "database"
    }

    fn handle(&mut self, message: &LogMessage) -> Result<(), HandlerError> {
        let stamp = message
            .timestamp()
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        self.connection.execute(
            &self.insert_sql,
            params![
                stamp,
                message.level().as_str(),
                message.text(),
                message.context().to_json(),
            ],
        )?;
        Ok(())
    }
}
