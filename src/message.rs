//! Log message construction.
//!
//! # Responsibilities
//! - Model context data attached to a log call
//! - Interpolate `{placeholder}` tokens from context into the template
//! - Render an attached exception into the message text
//! - Produce the immutable message record handed to handlers
//!
//! # Design Decisions
//! - Interpolation is a pure, single-pass function of (template, context);
//!   only values with an unambiguous string form are substituted,
//!   everything else keeps the literal token, and substituted values are
//!   never re-scanned for tokens
//! - Errors are rendered into plain text at attachment time so a message
//!   never borrows the original error value
//! - Message construction goes through a factory trait so embedders can
//!   swap the strategy at build time instead of passing runtime callables

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use crate::level::Level;

/// Context key given special treatment: its error value is rendered into
/// the message text and removed from the context passed onward.
pub const EXCEPTION_KEY: &str = "exception";

/// Rendered form of an error captured into a log context.
///
/// The display text and source chain are snapshotted at attachment time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
    description: String,
    chain: Vec<String>,
}

impl ErrorDetails {
    /// Capture an error's display text and its `source()` chain.
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let description = error.to_string();
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        Self { description, chain }
    }

    /// Build directly from already-rendered text.
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            chain: Vec::new(),
        }
    }

    /// The full rendered text: description plus causes, if any.
    pub fn render(&self) -> String {
        if self.chain.is_empty() {
            return self.description.clone();
        }
        let mut out = self.description.clone();
        for cause in &self.chain {
            out.push_str(": ");
            out.push_str(cause);
        }
        out
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A value attached to a log call under a context key.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A captured error, rendered at attachment time.
    Error(ErrorDetails),
    /// Arbitrary structured data.
    Other(serde_json::Value),
}

impl ContextValue {
    /// The string form used for placeholder substitution, if this value
    /// has an unambiguous one. Structured values and errors do not.
    pub fn as_display_string(&self) -> Option<String> {
        match self {
            ContextValue::Str(s) => Some(s.clone()),
            ContextValue::Int(n) => Some(n.to_string()),
            ContextValue::Float(x) => Some(x.to_string()),
            ContextValue::Bool(b) => Some(b.to_string()),
            ContextValue::Error(_) => None,
            ContextValue::Other(value) => match value {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::Bool(b) => Some(b.to_string()),
                _ => None,
            },
        }
    }
}

impl Serialize for ContextValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContextValue::Str(s) => serializer.serialize_str(s),
            ContextValue::Int(n) => serializer.serialize_i64(*n),
            ContextValue::Float(x) => serializer.serialize_f64(*x),
            ContextValue::Bool(b) => serializer.serialize_bool(*b),
            ContextValue::Error(details) => serializer.serialize_str(&details.render()),
            ContextValue::Other(value) => value.serialize(serializer),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        ContextValue::Str(s.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        ContextValue::Str(s)
    }
}

impl From<i64> for ContextValue {
    fn from(n: i64) -> Self {
        ContextValue::Int(n)
    }
}

impl From<i32> for ContextValue {
    fn from(n: i32) -> Self {
        ContextValue::Int(n.into())
    }
}

impl From<u32> for ContextValue {
    fn from(n: u32) -> Self {
        ContextValue::Int(n.into())
    }
}

impl From<f64> for ContextValue {
    fn from(x: f64) -> Self {
        ContextValue::Float(x)
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        ContextValue::Bool(b)
    }
}

impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        ContextValue::Other(value)
    }
}

impl From<ErrorDetails> for ContextValue {
    fn from(details: ErrorDetails) -> Self {
        ContextValue::Error(details)
    }
}

impl From<&(dyn StdError + 'static)> for ContextValue {
    fn from(error: &(dyn StdError + 'static)) -> Self {
        ContextValue::Error(ErrorDetails::from_error(error))
    }
}

/// Ordered key/value data attached to one log call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context {
    entries: BTreeMap<String, ContextValue>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for inline construction at call sites.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContextValue)> {
        self.entries.iter()
    }

    /// Serialize to a JSON object string. Infallible in practice since
    /// every `ContextValue` has a JSON form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Substitute `{key}` tokens in `template` with the string form of the
/// matching context value. Missing keys and values without a string form
/// keep the literal token.
///
/// The template is scanned once, left to right; replacement values are
/// emitted verbatim and never re-scanned, so a value containing another
/// key's token stays literal in the output.
pub fn interpolate(template: &str, context: &Context) -> String {
    let mut text = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        text.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match candidate.find('}') {
            Some(end) => {
                let key = &candidate[1..end];
                match context.get(key).and_then(ContextValue::as_display_string) {
                    Some(replacement) => text.push_str(&replacement),
                    None => text.push_str(&candidate[..=end]),
                }
                rest = &candidate[end + 1..];
            }
            None => {
                // Unclosed brace: no further tokens possible.
                text.push_str(candidate);
                rest = "";
            }
        }
    }

    text.push_str(rest);
    text
}

/// Immutable record of one log event.
#[derive(Debug, Clone)]
pub struct LogMessage {
    level: Level,
    template: String,
    context: Context,
    text: String,
    timestamp: DateTime<Utc>,
}

impl LogMessage {
    /// Assemble a message from already-processed parts. Most callers want
    /// [`RecordFactory`] instead, which runs the interpolation pipeline.
    pub fn from_parts(
        level: Level,
        template: String,
        context: Context,
        text: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            level,
            template,
            context,
            text,
            timestamp,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// The raw template as passed to `log`, placeholders intact.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The context after exception extraction.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The interpolated text, computed once at construction.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The line format shared by the file and display handlers:
    /// `[<rfc3339>] <level>: <text> <context-json>`, context omitted
    /// when empty.
    pub fn formatted_line(&self) -> String {
        let stamp = self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        if self.context.is_empty() {
            format!("[{}] {}: {}", stamp, self.level, self.text)
        } else {
            format!(
                "[{}] {}: {} {}",
                stamp,
                self.level,
                self.text,
                self.context.to_json()
            )
        }
    }
}

/// Strategy for turning a log call into a [`LogMessage`].
///
/// Fixed at logger build time; swapping the strategy is a compile-time
/// checked operation rather than a runtime callable contract.
pub trait MessageFactory: Send {
    fn create(&self, level: Level, template: &str, context: Context) -> LogMessage;
}

/// Default factory: interpolates placeholders, renders an `exception`
/// context entry into the text, and stamps the current time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFactory;

impl MessageFactory for RecordFactory {
    fn create(&self, level: Level, template: &str, mut context: Context) -> LogMessage {
        let mut text = interpolate(template, &context);

        // An `exception` entry only gets special treatment when it actually
        // holds an error; anything else is ordinary context.
        let is_error = matches!(context.get(EXCEPTION_KEY), Some(ContextValue::Error(_)));
        if is_error {
            if let Some(ContextValue::Error(details)) = context.remove(EXCEPTION_KEY) {
                text.push(' ');
                text.push_str(&details.render());
            }
        }

        LogMessage::from_parts(level, template.to_string(), context, text, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_substitutes_known_keys() {
        let context = Context::new().with("username", "Alice");
        let text = interpolate("User '{username}' created.", &context);
        assert_eq!(text, "User 'Alice' created.");
    }

    #[test]
    fn test_interpolate_leaves_missing_keys_verbatim() {
        let text = interpolate("Hello {name}", &Context::new());
        assert_eq!(text, "Hello {name}");
    }

    #[test]
    fn test_interpolate_handles_numeric_and_bool_values() {
        let context = Context::new()
            .with("count", 3)
            .with("ratio", 0.5)
            .with("ok", true);
        let text = interpolate("{count} items, ratio {ratio}, ok={ok}", &context);
        assert_eq!(text, "3 items, ratio 0.5, ok=true");
    }

    #[test]
    fn test_interpolate_skips_structured_values() {
        let context = Context::new().with("data", serde_json::json!({"a": 1}));
        let text = interpolate("payload: {data}", &context);
        assert_eq!(text, "payload: {data}");
    }

    #[test]
    fn test_replacement_values_are_not_resubstituted() {
        // A value that happens to contain another key's token must land
        // in the output verbatim, not trigger a second substitution.
        let context = Context::new().with("a", "{b}").with("b", "X");
        assert_eq!(interpolate("value: {a}", &context), "value: {b}");

        // Both tokens in the template itself still substitute normally.
        assert_eq!(interpolate("{a} and {b}", &context), "{b} and X");
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        let context = Context::new().with("name", "Alice");
        assert_eq!(interpolate("hello {name", &context), "hello {name");
        assert_eq!(interpolate("{name} {", &context), "Alice {");
    }

    #[test]
    fn test_interpolate_is_pure() {
        let context = Context::new().with("who", "world");
        let first = interpolate("hello {who} {missing}", &context);
        let second = interpolate("hello {who} {missing}", &context);
        assert_eq!(first, second);
        assert_eq!(first, "hello world {missing}");
    }

    #[test]
    fn test_factory_renders_exception_and_strips_key() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let context = Context::new()
            .with("exception", ErrorDetails::from_error(&io_err))
            .with("attempt", 2);

        let message = RecordFactory.create(Level::Critical, "Unexpected failure.", context);

        assert!(message.text().ends_with("disk on fire"));
        assert!(!message.context().contains_key("exception"));
        assert!(message.context().contains_key("attempt"));
    }

    #[test]
    fn test_non_error_exception_key_is_plain_context() {
        let context = Context::new().with("exception", "just a string");
        let message = RecordFactory.create(Level::Info, "note", context);

        assert_eq!(message.text(), "note");
        assert!(message.context().contains_key("exception"));
    }

    #[test]
    fn test_error_details_render_includes_source_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let details = ErrorDetails {
            description: "load failed".to_string(),
            chain: vec![inner.to_string()],
        };
        assert_eq!(details.render(), "load failed: file missing");
    }

    #[test]
    fn test_formatted_line_shape() {
        let message = LogMessage::from_parts(
            Level::Warning,
            "low disk".to_string(),
            Context::new().with("free_mb", 12),
            "low disk".to_string(),
            Utc::now(),
        );
        let line = message.formatted_line();
        assert!(line.contains("warning: low disk"));
        assert!(line.ends_with("{\"free_mb\":12}"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn test_formatted_line_omits_empty_context() {
        let message = RecordFactory.create(Level::Info, "plain", Context::new());
        assert!(!message.formatted_line().contains("{}"));
    }

    #[test]
    fn test_context_serializes_error_as_string() {
        let context = Context::new().with(
            "cause",
            ErrorDetails::from_description("boom"),
        );
        assert_eq!(context.to_json(), "{\"cause\":\"boom\"}");
    }
}
