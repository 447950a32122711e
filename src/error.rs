//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Parsing errors** ([`EmptyInput`](ChatlensError::EmptyInput),
//!   [`MalformedTimestamp`](ChatlensError::MalformedTimestamp),
//!   [`NoMessagesFound`](ChatlensError::NoMessagesFound)) abort the whole
//!   load. No partial index is ever returned.
//! - **Query errors** ([`UnsupportedParticipant`](ChatlensError::UnsupportedParticipant))
//!   are a defined "not found" answer the caller can match on.
//! - **Statistics** never fail: analyzers degrade to `0`, an empty sequence
//!   or "not applicable" instead.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// The transcript was empty or contained only whitespace.
    #[error("Transcript is empty")]
    EmptyInput,

    /// A line matched a timestamp grammar but its date or time did not
    /// resolve to a real point in time.
    #[error("Malformed timestamp on line {line_number} ({reason}): {line}")]
    MalformedTimestamp {
        /// 1-based line number in the transcript
        line_number: usize,
        /// The offending line, verbatim
        line: String,
        /// What was wrong with it
        reason: String,
    },

    /// Tokenization produced zero messages from non-empty input.
    #[error("No messages found in {lines} non-empty lines. Make sure the file is a chat export.")]
    NoMessagesFound {
        /// Number of non-blank lines that were scanned
        lines: usize,
    },

    /// A query referenced a participant that is not in the index.
    ///
    /// Names are matched exactly (case- and whitespace-sensitive).
    #[error("Participant '{name}' not found")]
    UnsupportedParticipant {
        /// The name that was looked up
        name: String,
    },

    /// The sentiment scorer is missing or failed.
    ///
    /// Analyzers recover from this locally; it only surfaces when a caller
    /// asks for a score directly.
    #[error("Sentiment scoring unavailable: {reason}")]
    SentimentUnavailable {
        /// Why scoring failed
        reason: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization or config deserialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Io(io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a malformed timestamp error for the given line.
    pub fn malformed_timestamp(
        line_number: usize,
        line: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ChatlensError::MalformedTimestamp {
            line_number,
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown participant error.
    pub fn unsupported_participant(name: impl Into<String>) -> Self {
        ChatlensError::UnsupportedParticipant { name: name.into() }
    }

    /// Creates a sentiment unavailable error.
    pub fn sentiment_unavailable(reason: impl Into<String>) -> Self {
        ChatlensError::SentimentUnavailable {
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this error aborts a transcript load.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ChatlensError::EmptyInput
                | ChatlensError::MalformedTimestamp { .. }
                | ChatlensError::NoMessagesFound { .. }
        )
    }

    /// Returns `true` if this is a participant lookup miss.
    pub fn is_unsupported_participant(&self) -> bool {
        matches!(self, ChatlensError::UnsupportedParticipant { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }
}
