//! Folio - native article record store
//!
//! Folio owns fixed-length collections of heap-allocated article records and
//! hands them across foreign-function boundaries: a C ABI (`folio-ffi`) and a
//! Python extension module (feature `python`).

#![cfg_attr(not(feature = "python"), forbid(unsafe_code))]
#![allow(clippy::module_name_repetitions)]

// Re-export workspace crates
pub use common_config as config;
pub use common_display as display;
pub use common_error as error;
pub use folio_ffi as ffi;
pub use folio_store as store;

pub use common_error::{FolioError, FolioResult};
pub use folio_store::{Article, ArticleCollection, RecordStore};

/// Folio version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "python")]
mod python;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module for Folio
///
/// The module is named `_folio` to allow a Python wrapper package to
/// re-export it with additional convenience functions.
#[cfg(feature = "python")]
#[pymodule]
fn _folio(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", VERSION)?;

    python::register_module(m)?;

    Ok(())
}
