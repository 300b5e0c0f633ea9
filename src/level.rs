//! Log severity levels.
//!
//! # Responsibilities
//! - Define the fixed, ordered severity set
//! - Parse level names (case-sensitive exact match)
//! - Render level names for output formats
//!
//! # Design Decisions
//! - Severity comparisons use the derived `Ord` (debug lowest, emergency highest)
//! - Parsing rejects anything outside the eight lowercase names, including
//!   casing variants ("INFO" is not a level)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of log severities, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Level {
    /// All levels in severity order.
    pub const ALL: [Level; 8] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Alert,
        Level::Emergency,
    ];

    /// The lowercase name used in output formats and parsing.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Alert => "alert",
            Level::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a level string is not one of the recognized names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("log level '{0}' is not recognized")]
pub struct InvalidLevelError(pub String);

impl FromStr for Level {
    type Err = InvalidLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Exact match only: the level vocabulary is an API contract, so a
        // miscased or unknown name is a programmer error, not an alias.
        match s {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "notice" => Ok(Level::Notice),
            "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            "alert" => Ok(Level::Alert),
            "emergency" => Ok(Level::Emergency),
            other => Err(InvalidLevelError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_levels() {
        for level in Level::ALL {
            let parsed: Level = level.as_str().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("INFO".parse::<Level>().is_err());
        assert!("Warning".parse::<Level>().is_err());
        assert!("".parse::<Level>().is_err());
        assert!("fatal".parse::<Level>().is_err());
    }

    #[test]
    fn test_invalid_level_error_carries_input() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert_eq!(err, InvalidLevelError("verbose".to_string()));
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Error < Level::Critical);
        assert!(Level::Alert < Level::Emergency);

        let mut shuffled = vec![Level::Emergency, Level::Debug, Level::Error];
        shuffled.sort();
        assert_eq!(shuffled, vec![Level::Debug, Level::Error, Level::Emergency]);
    }

    #[test]
    fn test_display_matches_parse_vocabulary() {
        assert_eq!(Level::Notice.to_string(), "notice");
        assert_eq!(Level::Emergency.to_string(), "emergency");
    }
}
