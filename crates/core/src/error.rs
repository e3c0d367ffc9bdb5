//! Error types for shapecache
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for shapecache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for shapecache
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Operation issued before a successful `open` or after `close`
    #[error("Store not open: call open first")]
    NotOpen,

    /// A record or one of its buffers could not be allocated
    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    /// The sink rejected a write while encoding a record
    #[error("Encode failure: {0}")]
    EncodeFailure(String),

    /// The source was exhausted or malformed while decoding a record
    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    /// Caller passed an argument the operation cannot accept
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Type tag with no registered codec
    #[error("Unknown variant: no codec registered for type tag {0}")]
    UnknownVariant(u32),

    /// Record handed to a codec or iterator of another variant
    #[error("Variant mismatch: type tag {tag} does not describe a {found} record")]
    VariantMismatch {
        /// Tag the record was stored or dispatched under
        tag: u32,
        /// Variant actually found
        found: &'static str,
    },

    /// The replicated cache reported a failure (join, put, publish, teardown)
    #[error("Collaborator failure: {0}")]
    CollaboratorFailure(String),

    /// Invalid operation for the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Shorthand for [`Error::CollaboratorFailure`]
    pub fn collaborator(message: impl Into<String>) -> Self {
        Error::CollaboratorFailure(message.into())
    }

    /// Whether this error comes from the wire codecs (encode, decode or allocation)
    pub fn is_codec_error(&self) -> bool {
        matches!(
            self,
            Error::AllocationFailure(_) | Error::EncodeFailure(_) | Error::DecodeFailure(_)
        )
    }
}
