//! Unified error types for disparo.
//!
//! This module provides a single [`SyncError`] enum that covers every failure
//! the library can report. Content parsing never fails (malformed envelopes
//! degrade to plain text) and dispatch responses of an unknown shape are
//! classified rather than rejected, so neither appears here.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for disparo operations.
///
/// # Example
///
/// ```rust
/// use disparo::error::Result;
/// use disparo::MessageGroup;
///
/// fn load() -> Result<Vec<MessageGroup>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SyncError>;

/// The error type for all disparo operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    /// The declared media type of an attachment is not accepted.
    #[error("Unsupported media type '{mime}'. Allowed: {}", allowed.join(", "))]
    UnsupportedMedia {
        /// The declared media type
        mime: String,
        /// The media types that would have been accepted
        allowed: Vec<String>,
    },

    /// The attachment is larger than the configured limit.
    #[error("Attachment too large: {actual_size} bytes (maximum: {max_size} bytes)")]
    OversizedMedia {
        /// Maximum allowed size in bytes
        max_size: usize,
        /// Actual size of the attachment
        actual_size: usize,
    },

    /// A media payload is not valid base64.
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// JSON parsing/serialization error.
    #[error("JSON error in {context}: {source}")]
    Json {
        /// What was being read or written
        context: String,
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Spreadsheet rows could not be read.
    #[cfg(feature = "cli")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A new group was requested with no non-blank message.
    #[error("At least one category must have content to create a group")]
    EmptyGroup,

    /// The referenced group is not in the collection.
    #[error("No message group with disparo_id {0}")]
    UnknownGroup(u64),

    /// Input that does not fit any other variant.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Json {
            context: "payload".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SyncError {
    /// Creates a JSON error with a description of what was being processed.
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        SyncError::Json {
            context: context.into(),
            source,
        }
    }

    /// Creates an unsupported media error.
    pub fn unsupported_media(mime: impl Into<String>, allowed: &[String]) -> Self {
        SyncError::UnsupportedMedia {
            mime: mime.into(),
            allowed: allowed.to_vec(),
        }
    }

    /// Creates an oversized media error.
    pub fn oversized_media(max_size: usize, actual_size: usize) -> Self {
        SyncError::OversizedMedia {
            max_size,
            actual_size,
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SyncError::InvalidInput(message.into())
    }

    /// Returns `true` if this is a media validation failure.
    pub fn is_media_rejection(&self) -> bool {
        matches!(
            self,
            SyncError::UnsupportedMedia { .. } | SyncError::OversizedMedia { .. }
        )
    }

    /// Returns `true` if this is a JSON error.
    pub fn is_json(&self) -> bool {
        matches!(self, SyncError::Json { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, SyncError::Io(_))
    }
}
