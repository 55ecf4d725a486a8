//! Error types for command execution.
//!
//! Every failure a command can report is an [`Error`]. Errors are reported
//! exactly once, through the failure side of the command's result, and never
//! reach the success path.
//!
//! | Category | Variants | Raised by |
//! |----------|----------|-----------|
//! | Malformed input | `Decode`, `UnknownColumnType` | Handler, before any store call |
//! | Routing | `UnknownCommand` | Registry |
//! | Backend | `Store` | The data store, forwarded verbatim |
//! | Setup | `Config` | Configuration loading and bridge construction |
//! | System | `Internal` | A handler panicked |

use dbbridge_core::{StoreError, UnknownColumnType};

/// Command execution errors.
///
/// # Example
///
/// ```ignore
/// use dbbridge_executor::{Bridge, Error};
///
/// match bridge.call("Query_Execute", Some(args)).await {
///     Ok(_) => { /* done */ }
///     Err(Error::Decode(e)) => eprintln!("bad arguments: {}", e),
///     Err(Error::Store(e)) => eprintln!("store failed: {}", e),
///     Err(e) => eprintln!("error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    // ==================== Malformed Input ====================
    /// The argument payload is missing a key or carries the wrong type
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A declared column type index is outside the enumeration
    #[error("unknown column type: {index}")]
    UnknownColumnType { index: i64 },

    // ==================== Routing ====================
    /// No handler is registered under this name
    #[error("unknown command: {name}")]
    UnknownCommand { name: String },

    // ==================== Backend ====================
    /// Error raised by the data store, untouched
    #[error(transparent)]
    Store(#[from] StoreError),

    // ==================== Setup ====================
    /// Invalid configuration or bridge construction failure
    #[error("configuration error: {reason}")]
    Config { reason: String },

    // ==================== System ====================
    /// Internal error (a handler panicked)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl From<UnknownColumnType> for Error {
    fn from(err: UnknownColumnType) -> Self {
        Error::UnknownColumnType { index: err.0 }
    }
}

/// Payload shape errors.
///
/// Raised while extracting typed arguments; decoding never consults the
/// store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The command needs arguments but none were sent
    #[error("args not set")]
    MissingArgs,

    /// A required key is absent
    #[error("'{key}' not set")]
    Missing { key: String },

    /// A key is present with a value of the wrong type
    #[error("'{key}' has wrong type: expected {expected}, got {actual}")]
    WrongType {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// An element of a sequence has the wrong type
    #[error("'{key}[{index}]' has wrong type: expected {expected}, got {actual}")]
    WrongElementType {
        key: String,
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// A JSON transport delivered text that is not a JSON object
    #[error("cannot parse JSON: {reason}")]
    InvalidJson { reason: String },
}

impl DecodeError {
    /// The payload key this error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            DecodeError::Missing { key }
            | DecodeError::WrongType { key, .. }
            | DecodeError::WrongElementType { key, .. } => Some(key),
            DecodeError::MissingArgs | DecodeError::InvalidJson { .. } => None,
        }
    }
}
