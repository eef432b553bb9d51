//! Error handling for hadith.
//!
//! This module provides:
//! - [`HadithError`]: The main error enum for all hadith operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context

mod codes;
mod suggestions;

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::suggest_for_error;

/// Main error type for hadith operations.
#[derive(Error, Debug)]
pub enum HadithError {
    #[error("read books dir {}: {source}", .path.display())]
    ReadBooksDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("open {}: {source}", .path.display())]
    OpenDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate book '{book}': {} and {}", .first.display(), .second.display())]
    DuplicateBook {
        book: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("not found: {book} #{number}")]
    HadithNotFound { book: String, number: i64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Search timed out after {0} ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HadithError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ReadBooksDir { .. } => ErrorCode::BooksDirUnreadable,
            Self::OpenDocument { .. } => ErrorCode::DocumentUnreadable,
            Self::Decode { .. } => ErrorCode::DocumentInvalid,
            Self::DuplicateBook { .. } => ErrorCode::DuplicateBook,
            Self::HadithNotFound { .. } => ErrorCode::HadithNotFound,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Timeout(_) => ErrorCode::SearchTimeout,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::ReadBooksDir { path, .. } | Self::OpenDocument { path, .. } => {
                Some(serde_json::json!({ "path": path.display().to_string() }))
            }
            Self::Decode { path, source } => Some(serde_json::json!({
                "path": path.display().to_string(),
                "line": source.line(),
                "column": source.column(),
            })),
            Self::DuplicateBook { book, first, second } => Some(serde_json::json!({
                "book": book,
                "documents": [first.display().to_string(), second.display().to_string()],
            })),
            Self::HadithNotFound { book, number } => {
                Some(serde_json::json!({ "book": book, "number": number }))
            }
            Self::Timeout(ms) => Some(serde_json::json!({ "timeout_ms": ms })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
///
/// Emitted in robot mode and attached to JSON-RPC error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "HADITH_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 201)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "corpus", "lookup")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a [`HadithError`].
    #[must_use]
    pub fn from_error(err: &HadithError) -> Self {
        let code = err.code();
        let context = err.context();
        let suggestion = suggest_for_error(code, context.as_ref());

        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Result type alias using HadithError.
pub type Result<T> = std::result::Result<T, HadithError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            HadithError::HadithNotFound { book: "muslim".into(), number: 3 }.code(),
            ErrorCode::HadithNotFound
        );
        assert_eq!(HadithError::Config("bad".into()).code(), ErrorCode::ConfigInvalid);
        assert_eq!(HadithError::Timeout(10).code(), ErrorCode::SearchTimeout);
    }

    #[test]
    fn test_not_found_message_matches_cli_wording() {
        let err = HadithError::HadithNotFound { book: "bukhari".into(), number: 42 };
        assert_eq!(err.to_string(), "not found: bukhari #42");
    }

    #[test]
    fn test_decode_error_carries_path_and_position() {
        let source = serde_json::from_str::<Vec<u8>>("[1, 2,").unwrap_err();
        let err = HadithError::Decode { path: PathBuf::from("books/abu-daud.json"), source };

        assert!(err.to_string().contains("books/abu-daud.json"));
        assert!(err.to_string().contains("line 1"));
        assert_eq!(err.code().category(), "corpus");

        let ctx = err.context().unwrap();
        assert_eq!(ctx["path"], "books/abu-daud.json");
        assert_eq!(ctx["line"], 1);
    }

    #[test]
    fn test_structured_error_from_error() {
        let err = HadithError::HadithNotFound { book: "bukhari".into(), number: 1 };
        let structured = err.to_structured();

        assert_eq!(structured.code, ErrorCode::HadithNotFound);
        assert_eq!(structured.numeric_code, 201);
        assert_eq!(structured.category, "lookup");
        assert!(structured.suggestion.contains("bukhari"));
        assert!(structured.recoverable);
    }

    #[test]
    fn test_structured_error_serialization() {
        let err = StructuredError::new(ErrorCode::InvalidArgument, "invalid number");
        let json = serde_json::to_string(&err).unwrap();

        assert!(json.contains("INVALID_ARGUMENT"));
        assert!(json.contains("\"numeric_code\":801"));
        assert!(!json.contains("context"));
    }

    #[test]
    fn test_structured_error_display() {
        let err = StructuredError::new(ErrorCode::HadithNotFound, "not found: muslim #9");
        assert_eq!(err.to_string(), "[E201] not found: muslim #9");
    }
}
