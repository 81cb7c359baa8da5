//! Error types and result aliases for Folio.
//!
//! Every fallible operation in the workspace returns [`FolioResult`]. The
//! foreign boundaries translate [`FolioError`] into Python exceptions
//! (feature `python`) or C status codes (`folio-ffi`).

mod error;
#[cfg(feature = "python")]
pub mod python;

pub use error::{FolioError, FolioResult};
