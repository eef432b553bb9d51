//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Corpus load errors
//! - 2xx: Lookup errors
//! - 3xx: Config errors
//! - 4xx: Search errors
//! - 8xx: Validation errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for robot mode output.
///
/// Each variant maps to a numeric code (e.g., `HadithNotFound` -> E201).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Corpus load errors (1xx)
    // ========================================
    /// E101: The books directory could not be read
    BooksDirUnreadable,
    /// E102: A book document could not be opened
    DocumentUnreadable,
    /// E103: A book document is not an array of hadith records
    DocumentInvalid,
    /// E104: Two documents resolve to the same book name
    DuplicateBook,

    // ========================================
    // Lookup errors (2xx)
    // ========================================
    /// E201: No hadith with the requested book and number
    HadithNotFound,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file or override has invalid syntax or values
    ConfigInvalid,

    // ========================================
    // Search errors (4xx)
    // ========================================
    /// E401: Search did not finish before the request deadline
    SearchTimeout,

    // ========================================
    // Validation errors (8xx)
    // ========================================
    /// E801: A command argument or request parameter is malformed
    InvalidArgument,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Serialization/deserialization failed
    SerializationError,
    /// E902: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `HadithNotFound` -> 201).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::BooksDirUnreadable => 101,
            Self::DocumentUnreadable => 102,
            Self::DocumentInvalid => 103,
            Self::DuplicateBook => 104,

            Self::HadithNotFound => 201,

            Self::ConfigInvalid => 301,

            Self::SearchTimeout => 401,

            Self::InvalidArgument => 801,

            Self::SerializationError => 901,
            Self::IoError => 902,
        }
    }

    /// Get the error code as a formatted string (e.g., "E201").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::BooksDirUnreadable => "Check that the books directory exists, or pass --books-dir <path>",
            Self::DocumentUnreadable => "Check file permissions on the book document",
            Self::DocumentInvalid => "Each book document must be a JSON array of {\"number\", \"arab\", \"id\"} records",
            Self::DuplicateBook => "Remove or rename one of the documents so every book name is unique",
            Self::HadithNotFound => "Run `hadith books` to list books, or `hadith search <query>` to find the entry",
            Self::ConfigInvalid => "Check TOML syntax in the config file and the HADITH_* environment variables",
            Self::SearchTimeout => "Narrow the query or filter by book, or raise search.timeout_ms",
            Self::InvalidArgument => "Run the command with --help to see the expected arguments",
            Self::SerializationError => "The data format may be corrupted. Check input data for validity",
            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SerializationError)
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "corpus",
            2 => "lookup",
            3 => "config",
            4 => "search",
            8 => "validation",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::BooksDirUnreadable,
            Self::DocumentUnreadable,
            Self::DocumentInvalid,
            Self::DuplicateBook,
            Self::HadithNotFound,
            Self::ConfigInvalid,
            Self::SearchTimeout,
            Self::InvalidArgument,
            Self::SerializationError,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
