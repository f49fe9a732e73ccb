//! Error types for Tapedeck

use thiserror::Error;

/// Result type for Tapedeck operations
pub type Result<T> = std::result::Result<T, TapeError>;

/// Errors that can occur while using a tape
#[derive(Debug, Error)]
pub enum TapeError {
    /// `play` called on a tape whose mode is not readable
    #[error("Tape '{tape}' is not readable")]
    NotReadable {
        /// Tape name
        tape: String,
    },

    /// `record` called on a tape whose mode is not writable
    #[error("Tape '{tape}' is not writable")]
    NotWritable {
        /// Tape name
        tape: String,
    },

    /// No recorded interaction matches the request
    #[error("Tape '{tape}': no matching recording found for {request}")]
    NoMatch {
        /// Tape name
        tape: String,
        /// Request rendered as `METHOD URL`
        request: String,
    },

    /// Every interaction recorded for the request has already been played
    #[error("Tape '{tape}': recorded sequence exhausted for {request}")]
    SequenceExhausted {
        /// Tape name
        tape: String,
        /// Request rendered as `METHOD URL`
        request: String,
    },

    /// A matched key has no usable interaction group.
    ///
    /// This is a programming error and is never retried.
    #[error("Interaction index inconsistent: {0}")]
    IndexInconsistency(String),

    /// Request/response body too large
    #[error("Data too large: {size} bytes exceeds limit of {limit} bytes")]
    DataTooLarge {
        /// Actual size
        size: usize,
        /// Size limit
        limit: usize,
    },

    /// Invalid tape name
    #[error("Invalid tape name: {0}")]
    InvalidTapeName(String),

    /// Registry already holds the maximum number of tapes
    #[error("Tape limit reached: {0}")]
    TapeLimitReached(usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
