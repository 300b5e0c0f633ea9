//! Message handlers.
//!
//! # Responsibilities
//! - Define the capability every handler implements
//! - Classify handler delivery failures
//!
//! # Design Decisions
//! - One trait with one method; variants are separate types chosen at
//!   configuration time, never via runtime type inspection
//! - Handlers own their resources (file handle, writer); the database
//!   handler borrows a caller-supplied connection and never manages its
//!   lifecycle
//! - `handle` takes `&mut self` so handlers can keep stateful resources
//!   without interior mutability

pub mod custom;
pub mod database;
pub mod display;
pub mod file;

pub use custom::FnHandler;
pub use database::{DatabaseHandler, TableOptions};
pub use display::DisplayHandler;
pub use file::FileHandler;

use thiserror::Error;

use crate::message::LogMessage;

/// Errors a handler can raise while delivering a message.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// File or stream write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database insert failed (connection or constraint).
    #[error("query error: {0}")]
    Query(#[from] rusqlite::Error),

    /// Failure reported by a custom handler.
    #[error("handler error: {0}")]
    Custom(String),
}

/// A consumer of log messages producing an external side effect.
///
/// Handlers are invoked once per `log` call, in registration order, each
/// receiving the same constructed message.
pub trait Handler: Send {
    /// Stable name used in dispatch failure reports and diagnostics.
    fn name(&self) -> &str;

    /// Deliver one message. A failure here is isolated by the logger and
    /// does not stop dispatch to the remaining handlers.
    fn handle(&mut self, message: &LogMessage) -> Result<(), HandlerError>;
}
