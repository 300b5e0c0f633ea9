//! Closure-backed handler.

use crate::handler::{Handler, HandlerError};
use crate::message::LogMessage;

/// Adapts any closure matching the handler capability into a [`Handler`].
///
/// The closure is invoked once per `log` call with the same constructed
/// message the built-in handlers receive; no further guarantees apply.
pub struct FnHandler {
    name: String,
    func: Box<dyn FnMut(&LogMessage) -> Result<(), HandlerError> + Send>,
}

impl FnHandler {
    pub fn new(
        name: impl Into<String>,
        func: impl FnMut(&LogMessage) -> Result<(), HandlerError> + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

impl std::fmt::Debug for FnHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Handler for FnHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&mut self, message: &LogMessage) -> Result<(), HandlerError> {
        (self.func)(message)
    }
}
