//! Display log handler.

use std::io::{self, Write};

use crate::handler::{Handler, HandlerError};
use crate::message::LogMessage;

/// Writes one formatted line per message to an output stream.
///
/// Defaults to stdout; any `Write + Send` target can be injected, which
/// is how tests capture the output. Write errors are surfaced as-is and
/// never retried.
pub struct DisplayHandler {
    writer: Box<dyn Write + Send>,
}

impl DisplayHandler {
    /// Handler writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Handler writing to an arbitrary stream.
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }
}

impl Default for DisplayHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DisplayHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayHandler").finish_non_exhaustive()
    }
}

impl Handler for DisplayHandler {
    fn name(&self) -> &str {
        "display"
    }

    fn handle(&mut self, message: &LogMessage) -> Result<(), HandlerError> {
        writeln!(self.writer, "{}", message.formatted_line())?;
        self.writer.flush()?;
        Ok(())
    }
}
