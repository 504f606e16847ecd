//! Error types for the reference bridge

use thiserror::Error;

/// Result type alias for bridge calls
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Error type for bridge calls.
///
/// Each variant corresponds to a failure the emitted wrappers surface as a
/// JavaScript exception or a rejected promise.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// No export with this boundary name exists in the schema
    #[error("unknown export: {0}")]
    UnknownExport(String),

    /// The export exists but no handler was registered for it
    #[error("export '{0}' has no implementation")]
    Unimplemented(String),

    /// Sync call of an async export or the reverse
    #[error("export '{export}' is {}", call_mode(.is_async))]
    CallMode { export: String, is_async: bool },

    /// Argument missing or of the wrong shape
    #[error("{export}: expected {expected}")]
    BadArgument { export: String, expected: String },

    /// Value could not be converted across the boundary
    #[error("Failed to parse {type_name}: {message}")]
    Marshal { type_name: String, message: String },

    /// The implementation reported a failure
    #[error("{export} failed: {message}")]
    Handler { export: String, message: String },

    /// The implementation panicked
    #[error("{export} panicked: {message}")]
    Panic { export: String, message: String },

    /// The worker task ended without settling its completion
    #[error("worker for '{0}' ended without a result")]
    WorkerLost(String),

    /// The async runtime could not be created
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl BridgeError {
    /// Stable numeric code for each failure kind
    pub fn error_code(&self) -> u32 {
        match self {
            BridgeError::UnknownExport(_) => 1,
            BridgeError::Unimplemented(_) => 2,
            BridgeError::CallMode { .. } => 3,
            BridgeError::BadArgument { .. } => 4,
            BridgeError::Marshal { .. } => 5,
            BridgeError::Handler { .. } => 6,
            BridgeError::Panic { .. } => 7,
            BridgeError::WorkerLost(_) => 8,
            BridgeError::Runtime(_) => 9,
        }
    }

    /// Whether the JavaScript side would see a `TypeError`
    pub fn is_type_error(&self) -> bool {
        matches!(self, BridgeError::BadArgument { .. })
    }
}

fn call_mode(is_async: &bool) -> &'static str {
    if *is_async { "async" } else { "sync" }
}
