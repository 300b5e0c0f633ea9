//! In-memory retention of emitted messages.
//!
//! # Responsibilities
//! - Append-only storage of every message the owning logger emits
//! - Ordered read access for inspection (tests, batch export)
//!
//! # Design Decisions
//! - Insertion order equals emission order
//! - Readers get a slice view, never a mutable handle into the store
//! - No capacity bound or eviction; a long-lived logger with collection
//!   enabled grows without limit

use std::sync::Arc;

use crate::message::LogMessage;

/// Append-only, ordered store of emitted messages.
///
/// Owned by a single [`Logger`](crate::Logger); messages are shared with
/// handlers via `Arc`, never copied.
#[derive(Debug, Default)]
pub struct MessageCollection {
    messages: Vec<Arc<LogMessage>>,
}

impl MessageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Order of calls is preserved.
    pub fn add(&mut self, message: Arc<LogMessage>) {
        self.messages.push(message);
    }

    /// All messages emitted so far, in emission order.
    pub fn all(&self) -> &[Arc<LogMessage>] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
