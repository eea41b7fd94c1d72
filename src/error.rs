//! Unified error types for bayesky.
//!
//! This module provides a single [`BayeskyError`] enum that covers all error
//! cases in the library, from reading raw lines to decoding a post.
//!
//! # Error Classes
//!
//! - **Skippable**: [`NotACommit`](BayeskyError::NotACommit) and
//!   [`UnexpectedCommit`](BayeskyError::UnexpectedCommit) occur routinely in a
//!   real stream; callers drop the record and move on.
//! - **Malformed**: [`MalformedInput`](BayeskyError::MalformedInput) means the
//!   record is corrupt. Whether that ends the run is a caller policy.
//! - **Fatal**: [`Io`](BayeskyError::Io) and friends come from the record
//!   source or the output side, never from the extractor.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for bayesky operations.
///
/// # Example
///
/// ```rust
/// use bayesky::error::Result;
/// use bayesky::Post;
///
/// fn my_function() -> Result<Vec<Post>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, BayeskyError>;

/// The error type for all bayesky operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BayeskyError {
    /// The record's top-level `kind` is not `"commit"`.
    ///
    /// Identity and account events share the stream with commits, so this is
    /// expected and callers normally skip the record.
    #[error("Unexpected kind '{kind}': expected 'commit'")]
    NotACommit {
        /// The `kind` value found in the record
        kind: String,
    },

    /// The commit is not the creation of a post record.
    ///
    /// Only produced when the extractor is configured with
    /// [`require_post_create`](crate::config::ExtractorConfig::require_post_create).
    #[error("Unexpected commit: operation '{operation}' on collection '{collection}'")]
    UnexpectedCommit {
        /// The commit operation (`create`, `update`, `delete`)
        operation: String,
        /// The collection the commit touches
        collection: String,
    },

    /// The payload is not valid JSON, or a required field is missing, has the
    /// wrong type, or holds a number that does not fit an unsigned 64-bit integer.
    #[error("Malformed input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    /// An I/O error occurred while reading records or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A single input line exceeded the configured maximum size.
    #[error("Record too large: {actual_size} bytes (maximum: {max_size} bytes)")]
    RecordTooLarge {
        /// Maximum allowed size in bytes
        max_size: usize,
        /// Size of the offending line
        actual_size: usize,
    },

    /// A language code handed to the language filter is not well formed.
    #[error("Invalid language code '{input}'. Expected a BCP-47 tag such as 'en' or 'pt-BR'")]
    InvalidLanguage {
        /// The rejected code
        input: String,
    },

    /// A string is not a `scheme://authority/collection/record_key` URI.
    #[error("Invalid resource URI: '{input}'")]
    InvalidUri {
        /// The rejected string
        input: String,
    },

    /// Failed to serialize a post for output.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl BayeskyError {
    /// Creates a wrong-kind error.
    pub fn not_a_commit(kind: impl Into<String>) -> Self {
        BayeskyError::NotACommit { kind: kind.into() }
    }

    /// Creates an unexpected-commit error.
    pub fn unexpected_commit(operation: impl Into<String>, collection: impl Into<String>) -> Self {
        BayeskyError::UnexpectedCommit {
            operation: operation.into(),
            collection: collection.into(),
        }
    }

    /// Creates a record-too-large error.
    pub fn record_too_large(max_size: usize, actual_size: usize) -> Self {
        BayeskyError::RecordTooLarge {
            max_size,
            actual_size,
        }
    }

    /// Creates an invalid language error.
    pub fn invalid_language(input: impl Into<String>) -> Self {
        BayeskyError::InvalidLanguage {
            input: input.into(),
        }
    }

    /// Creates an invalid URI error.
    pub fn invalid_uri(input: impl Into<String>) -> Self {
        BayeskyError::InvalidUri {
            input: input.into(),
        }
    }

    /// Returns `true` if this is a wrong-kind error.
    pub fn is_not_a_commit(&self) -> bool {
        matches!(self, BayeskyError::NotACommit { .. })
    }

    /// Returns `true` if this is a malformed-input error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, BayeskyError::MalformedInput(_))
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, BayeskyError::Io(_))
    }

    /// Returns `true` for errors that describe a well-formed record the caller
    /// did not ask for, as opposed to a corrupt one.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            BayeskyError::NotACommit { .. } | BayeskyError::UnexpectedCommit { .. }
        )
    }
}

impl From<serde_json::Error> for BayeskyError {
    fn from(err: serde_json::Error) -> Self {
        BayeskyError::MalformedInput(err)
    }
}

// ============================================================================
// Tests
// ============================================================================
