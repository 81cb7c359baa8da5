//! Status codes returned across the C boundary.

use common_error::FolioError;

/// Result of every fallible C entry point. `Ok` is zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolioStatus {
    Ok = 0,
    InvalidArgument = 1,
    AllocationError = 2,
    InvalidHandle = 3,
    InternalError = 4,
}

impl From<&FolioError> for FolioStatus {
    fn from(err: &FolioError) -> Self {
        match err {
            FolioError::AllocationError(_) => FolioStatus::AllocationError,
            FolioError::InvalidArgument(_) => FolioStatus::InvalidArgument,
            FolioError::InvalidHandle(_) => FolioStatus::InvalidHandle,
            _ => FolioStatus::InternalError,
        }
    }
}
