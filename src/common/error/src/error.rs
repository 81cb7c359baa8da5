//! Core error types for Folio.

use thiserror::Error;

/// Result type alias using `FolioError`.
pub type FolioResult<T> = std::result::Result<T, FolioError>;

/// Core error type for Folio operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FolioError {
    /// Storage could not be obtained, either from the allocator or from the
    /// configured memory budget.
    #[error("AllocationError: {0}")]
    AllocationError(String),

    /// Negative or inconsistent count, malformed title, bad pointer.
    #[error("InvalidArgument: {0}")]
    InvalidArgument(String),

    /// Handle is unknown or was already destroyed.
    #[error("InvalidHandle: {0}")]
    InvalidHandle(String),

    /// Internal error (bug in Folio).
    #[error("InternalError: {0}")]
    InternalError(String),

    /// IO error while rendering.
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[cfg(feature = "python")]
    /// Python interop error.
    #[error("PyO3Error: {0}")]
    PyO3Error(#[from] pyo3::PyErr),
}

impl FolioError {
    /// Create a new `AllocationError`.
    pub fn allocation<S: Into<String>>(msg: S) -> Self {
        Self::AllocationError(msg.into())
    }

    /// Create a new `InvalidArgument` error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new `InvalidHandle` error.
    pub fn invalid_handle<S: Into<String>>(msg: S) -> Self {
        Self::InvalidHandle(msg.into())
    }

    /// Create a new `InternalError`.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }

    /// Whether this error reports exhausted storage.
    pub fn is_allocation(&self) -> bool {
        matches!(self, Self::AllocationError(_))
    }

    /// Whether this error reports a rejected argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<std::collections::TryReserveError> for FolioError {
    fn from(err: std::collections::TryReserveError) -> Self {
        Self::AllocationError(err.to_string())
    }
}

/// Ensure a condition holds, returning an `InvalidArgument` error if not.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::FolioError::$variant(format!($($msg)*)));
        }
    };
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::FolioError::InvalidArgument($msg.to_string()));
        }
    };
}

/// Return early with an `InvalidArgument` error.
#[macro_export]
macro_rules! invalid_arg {
    ($($arg:tt)*) => {
        return Err($crate::FolioError::InvalidArgument(format!($($arg)*)))
    };
}
