//! Python bindings for Folio.
//!
//! The Python side only ever holds wrapper objects; the records themselves
//! stay owned by Rust until `destroy()` or garbage collection.

mod collection;

use common_config::FolioConfig;
use pyo3::prelude::*;

pub use collection::{PyArticleCollection, PyArticleIterator};

/// Register all Python bindings with the module.
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyArticleCollection>()?;
    m.add_class::<PyArticleIterator>()?;
    m.add_class::<FolioConfig>()?;

    m.add_function(wrap_pyfunction!(collection::read_articles, m)?)?;

    Ok(())
}
