//! Python bindings for Folio configuration.

use pyo3::prelude::*;

use crate::FolioConfig;

#[pymethods]
impl FolioConfig {
    #[new]
    fn py_new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `FOLIO_*` environment variables.
    #[staticmethod]
    #[pyo3(name = "from_env")]
    fn py_from_env() -> PyResult<Self> {
        Ok(Self::from_env()?)
    }

    #[getter]
    fn memory_limit(&self) -> Option<usize> {
        self.store.memory_limit
    }

    #[setter]
    fn set_memory_limit(&mut self, limit: Option<usize>) {
        self.store.memory_limit = limit;
    }

    #[getter]
    fn max_records(&self) -> Option<usize> {
        self.store.max_records
    }

    #[setter]
    fn set_max_records(&mut self, max: Option<usize>) {
        self.store.max_records = max;
    }

    fn __repr__(&self) -> String {
        format!(
            "FolioConfig(memory_limit={:?}, max_records={:?}, log_level='{}')",
            self.store.memory_limit,
            self.store.max_records,
            self.logging.level.as_str()
        )
    }
}
