//! File log handler.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::handler::{Handler, HandlerError};
use crate::message::LogMessage;

/// Appends one formatted line per message to a log file.
///
/// The file is opened (and created if missing) on the first message and
/// the handle is kept for the handler's lifetime.
#[derive(Debug)]
pub struct FileHandler {
    path: PathBuf,
    file: Option<File>,
}

impl FileHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Handler for FileHandler {
    fn name(&self) -> &str {
        "file"
    }

    fn handle(&mut self, message: &LogMessage) -> Result<(), HandlerError> {
        let line = message.formatted_line();
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.file = Some(file);
        }
        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::message::{Context, MessageFactory, RecordFactory};

    #[test]
    fn test_appends_one_line_per_message() {
        let path = std::env::temp_dir().join("fanout_file_handler_test.log");
        std::fs::remove_file(&path).unwrap_or_default();

        let mut handler = FileHandler::new(&path);
        assert_eq!(handler.path(), path.as_path());

        let first = RecordFactory.create(Level::Info, "first entry", Context::new());
        let second = RecordFactory.create(
            Level::Error,
            "second entry",
            Context::new().with("code", 7),
        );
        handler.handle(&first).unwrap();
        handler.handle(&second).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("info: first entry"));
        assert!(lines[1].contains("error: second entry"));
        assert!(lines[1].ends_with("{\"code\":7}"));

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_unwritable_path_surfaces_io_error() {
        let mut handler = FileHandler::new("/nonexistent-dir/fanout.log");
        let message = RecordFactory.create(Level::Debug, "x", Context::new());
        let err = handler.handle(&message).unwrap_err();
        assert!(matches!(err, HandlerError::Io(_)));
    }
}
