//! Logger orchestration.
//!
//! # Responsibilities
//! - Validate levels arriving as strings
//! - Build messages through the configured factory
//! - Retain messages in the optional collection
//! - Fan out to every handler in registration order
//!
//! # Design Decisions
//! - Configuration (factory, collection policy) is fixed by the builder;
//!   a built logger has no mutable configuration to guard with a lock flag
//! - Handler failures are isolated: every handler is always invoked, the
//!   failures are reported together afterwards
//! - Synchronous and single-threaded; a multi-threaded embedding must
//!   serialize access externally

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::collection::MessageCollection;
use crate::handler::{Handler, HandlerError};
use crate::level::{InvalidLevelError, Level};
use crate::message::{Context, LogMessage, MessageFactory, RecordFactory};

/// One handler's delivery failure within a dispatch.
#[derive(Debug)]
pub struct HandlerFailure {
    /// Name of the failing handler.
    pub handler: String,
    pub error: HandlerError,
}

/// Raised when at least one handler failed to deliver a message.
///
/// The message was still built, collected, and delivered to every other
/// handler; this error reports which deliveries were lost.
#[derive(Debug)]
pub struct DispatchError {
    pub failures: Vec<HandlerFailure>,
    /// Total handlers invoked, failing ones included.
    pub handlers_invoked: usize,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} handlers failed: ",
            self.failures.len(),
            self.handlers_invoked
        )?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", failure.handler, failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for DispatchError {}

/// Errors raised by the string-level entry point.
#[derive(Debug, Error)]
pub enum LogError {
    #[error(transparent)]
    InvalidLevel(#[from] InvalidLevelError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Successful dispatch summary.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    /// The message as built by the factory.
    pub message: Arc<LogMessage>,
    pub handlers_invoked: usize,
}

/// Configures and produces a [`Logger`].
///
/// The factory and collection policy become immutable once `build` runs;
/// there is no post-build reconfiguration to reject at runtime.
pub struct LoggerBuilder {
    factory: Box<dyn MessageFactory>,
    collect: bool,
    handlers: Vec<Box<dyn Handler>>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            factory: Box::new(RecordFactory),
            collect: true,
            handlers: Vec::new(),
        }
    }
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the message construction strategy.
    pub fn message_factory(mut self, factory: impl MessageFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    /// Enable or disable in-memory retention of emitted messages.
    /// Enabled by default.
    pub fn collect_messages(mut self, collect: bool) -> Self {
        self.collect = collect;
        self
    }

    /// Append a handler. Duplicates are permitted; registration order is
    /// dispatch order.
    pub fn handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            factory: self.factory,
            collection: self.collect.then(MessageCollection::new),
            handlers: self.handlers,
        }
    }
}

/// The logging facade: validates, builds, retains, and fans out.
pub struct Logger {
    factory: Box<dyn MessageFactory>,
    collection: Option<MessageCollection>,
    handlers: Vec<Box<dyn Handler>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("handlers", &self.handlers.len())
            .field("collecting", &self.collection.is_some())
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Logger with default configuration and no handlers.
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Append a handler after construction. The handler list is ordered
    /// and not part of the fixed configuration.
    pub fn add_handler(&mut self, handler: impl Handler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// The retained messages, if collection is enabled.
    pub fn collection(&self) -> Option<&MessageCollection> {
        self.collection.as_ref()
    }

    /// Build and dispatch one message.
    ///
    /// Every handler is invoked in registration order regardless of
    /// earlier failures; if any fail, the combined failures are returned
    /// after dispatch completes.
    pub fn log(
        &mut self,
        level: Level,
        template: &str,
        context: Context,
    ) -> Result<DispatchReport, DispatchError> {
        let message = Arc::new(self.factory.create(level, template, context));

        if let Some(collection) = self.collection.as_mut() {
            collection.add(Arc::clone(&message));
        }

        let mut failures = Vec::new();
        for handler in &mut self.handlers {
            if let Err(error) = handler.handle(&message) {
                tracing::warn!(
                    handler = handler.name(),
                    %error,
                    "handler failed, continuing dispatch"
                );
                failures.push(HandlerFailure {
                    handler: handler.name().to_string(),
                    error,
                });
            }
        }

        let handlers_invoked = self.handlers.len();
        if failures.is_empty() {
            Ok(DispatchReport {
                message,
                handlers_invoked,
            })
        } else {
            Err(DispatchError {
                failures,
                handlers_invoked,
            })
        }
    }

    /// Entry point for callers holding the level as a string. An
    /// unrecognized level fails before anything is built, collected, or
    /// dispatched.
    pub fn log_str(
        &mut self,
        level: &str,
        template: &str,
        context: Context,
    ) -> Result<DispatchReport, LogError> {
        let level: Level = level.parse()?;
        Ok(self.log(level, template, context)?)
    }

    pub fn debug(&mut self, template: &str, context: Context) -> Result<DispatchReport, DispatchError> {
        self.log(Level::Debug, template, context)
    }

    pub fn info(&mut self, template: &str, context: Context) -> Result<DispatchReport, DispatchError> {
        self.log(Level::Info, template, context)
    }

    pub fn notice(&mut self, template: &str, context: Context) -> Result<DispatchReport, DispatchError> {
        self.log(Level::Notice, template, context)
    }

    pub fn warning(&mut self, template: &str, context: Context) -> Result<DispatchReport, DispatchError> {
        self.log(Level::Warning, template, context)
    }

    pub fn error(&mut self, template: &str, context: Context) -> Result<DispatchReport, DispatchError> {
        self.log(Level::Error, template, context)
    }

    pub fn critical(&mut self, template: &str, context: Context) -> Result<DispatchReport, DispatchError> {
        self.log(Level::Critical, template, context)
    }

    pub fn alert(&mut self, template: &str, context: Context) -> Result<DispatchReport, DispatchError> {
        self.log(Level::Alert, template, context)
    }

    pub fn emergency(&mut self, template: &str, context: Context) -> Result<DispatchReport, DispatchError> {
        self.log(Level::Emergency, template, context)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
