//! Python bindings for Folio errors.

use pyo3::exceptions::{PyMemoryError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::FolioError;

impl From<FolioError> for PyErr {
    fn from(err: FolioError) -> Self {
        match err {
            FolioError::AllocationError(msg) => PyMemoryError::new_err(msg),
            FolioError::InvalidArgument(msg) => PyValueError::new_err(msg),
            FolioError::InvalidHandle(msg) => PyValueError::new_err(msg),
            FolioError::PyO3Error(err) => err,
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}
