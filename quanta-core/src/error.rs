//! Structured errors for callers at the edge of the library
//!
//! Inside the engine, expected outcomes (unparsable text, unconvertible
//! units) are plain result variants. They become a `QuantaError` only when
//! they have to leave the process, e.g. as a JSON response.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNCONVERTIBLE: &str = "UNCONVERTIBLE";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const UNKNOWN_OPERATION: &str = "UNKNOWN_OPERATION";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const REGISTRY: &str = "REGISTRY";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Structured error with a code, message and optional hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantaError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl QuantaError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(input: &str) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Cannot parse quantity: '{}'", input))
            .with_suggestion("Use forms like '2', '1/2 cup', '2 1/2 cups' or '0.5 qt'")
    }

    pub fn unknown_unit(unit: &str, class: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unit '{}' is not part of class {}", unit, class))
            .with_suggestion("Use the 'classes' operation to list the units of each class")
    }

    pub fn unconvertible(details: impl Into<String>) -> Self {
        Self::new(codes::UNCONVERTIBLE, format!("Cannot convert: {}", details.into()))
    }

    pub fn arg_count(op: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", op, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", op))
    }

    pub fn arg_type(op: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", op, arg, expected, got))
    }

    pub fn unknown_operation(name: &str) -> Self {
        Self::new(codes::UNKNOWN_OPERATION, format!("Unknown operation: {}", name))
            .with_suggestion("Use help to list available operations")
    }

    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_REQUEST, format!("Invalid request: {}", details.into()))
            .with_suggestion(r#"Send one JSON object per line: {"op": "best", "args": ["2 pints"]}"#)
    }

    pub fn registry(details: impl Into<String>) -> Self {
        Self::new(codes::REGISTRY, format!("Invalid unit table: {}", details.into()))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
    }
}

impl std::fmt::Display for QuantaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for QuantaError {}
