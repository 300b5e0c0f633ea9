//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs semantic validation
//!     → LoggingConfig (validated, immutable)
//!     → build_logger constructs the handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every violation, not just the first

pub mod loader;
pub mod schema;

pub use loader::{build_logger, load_config, ConfigError, ValidationError};
pub use schema::{HandlerConfig, LoggingConfig};
