//! Fanout Logger Library
//!
//! A minimal synchronous logging facade: callers submit leveled messages
//! with contextual data and the logger fans each message out to an
//! ordered set of handlers (file, display, database, custom).
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                   LOGGER                      │
//!                    │                                               │
//!   log(level, ...)  │  ┌─────────┐   ┌──────────┐   ┌────────────┐ │
//!   ─────────────────┼─▶│  level  │──▶│ message  │──▶│ collection │ │
//!                    │  │ check   │   │ factory  │   │ (optional) │ │
//!                    │  └─────────┘   └──────────┘   └─────┬──────┘ │
//!                    │                                     │        │
//!                    │                                     ▼        │
//!                    │             ┌──────────────────────────────┐ │
//!                    │             │       handler fan-out        │ │
//!                    │             │ file │ display │ db │ custom │ │
//!                    │             └──────────────────────────────┘ │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! Dispatch is strictly sequential and per-handler failures are isolated:
//! every handler runs, and the failures are reported together afterwards.

pub mod collection;
pub mod config;
pub mod handler;
pub mod level;
pub mod logger;
pub mod message;

pub use collection::MessageCollection;
pub use handler::{
    DatabaseHandler, DisplayHandler, FileHandler, FnHandler, Handler, HandlerError, TableOptions,
};
pub use level::{InvalidLevelError, Level};
pub use logger::{DispatchError, DispatchReport, HandlerFailure, LogError, Logger, LoggerBuilder};
pub use message::{Context, ContextValue, ErrorDetails, LogMessage, MessageFactory, RecordFactory};
