//! Python bindings for article collections.

use std::sync::OnceLock;

use common_config::FolioConfig;
use common_display::{ArticleLine, truncate_string};
use common_error::FolioError;
use folio_store::{ArticleCollection, RecordStore};
use pyo3::exceptions::PyIndexError;
use pyo3::prelude::*;

/// Store shared by collections built without an explicit config.
fn default_store() -> &'static RecordStore {
    static STORE: OnceLock<RecordStore> = OnceLock::new();
    STORE.get_or_init(|| {
        let config = FolioConfig::from_env().unwrap_or_else(|err| {
            log::warn!("ignoring invalid environment configuration: {err}");
            FolioConfig::default()
        });
        RecordStore::from_config(&config.store)
    })
}

/// Python wrapper owning one collection until `destroy()`.
#[pyclass(name = "ArticleCollection")]
pub struct PyArticleCollection {
    inner: Option<ArticleCollection>,
}

impl PyArticleCollection {
    fn live(&self) -> PyResult<&ArticleCollection> {
        self.inner
            .as_ref()
            .ok_or_else(|| FolioError::invalid_handle("collection has been destroyed").into())
    }

    fn snapshot(&self) -> PyResult<Vec<(String, i32)>> {
        Ok(self
            .live()?
            .iter()
            .map(|(title, year)| (title.to_string(), year))
            .collect())
    }
}

#[pymethods]
impl PyArticleCollection {
    /// Build a collection from parallel title and year lists.
    ///
    /// `count` defaults to the shorter list; a larger count raises
    /// `ValueError`, as does a negative one.
    #[new]
    #[pyo3(signature = (titles, years, count=None, config=None))]
    fn new(
        titles: Vec<String>,
        years: Vec<i32>,
        count: Option<i64>,
        config: Option<PyRef<'_, FolioConfig>>,
    ) -> PyResult<Self> {
        let count = count.unwrap_or_else(|| titles.len().min(years.len()) as i64);
        let collection = match config {
            Some(config) => {
                RecordStore::from_config(&config.store).construct(&titles, &years, count)?
            }
            None => default_store().construct(&titles, &years, count)?,
        };
        Ok(Self {
            inner: Some(collection),
        })
    }

    fn __len__(&self) -> PyResult<usize> {
        Ok(self.live()?.len())
    }

    /// Iterate `(title, year)` tuples; each call starts from the beginning.
    fn __iter__(&self) -> PyResult<PyArticleIterator> {
        Ok(PyArticleIterator {
            items: self.snapshot()?.into_iter(),
        })
    }

    fn __getitem__(&self, index: isize) -> PyResult<(String, i32)> {
        let collection = self.live()?;
        let len = collection.len() as isize;
        let resolved = if index < 0 { index + len } else { index };
        if resolved < 0 || resolved >= len {
            return Err(PyIndexError::new_err(format!(
                "index {index} out of range for {len} articles"
            )));
        }
        let article = &collection.articles()[resolved as usize];
        Ok((article.title().to_string(), article.year()))
    }

    /// Print every record to standard output.
    fn render(&self) -> PyResult<()> {
        Ok(self.live()?.render_stdout()?)
    }

    /// Rendered lines, without trailing newlines.
    fn lines(&self) -> PyResult<Vec<String>> {
        Ok(self
            .live()?
            .iter()
            .map(|(title, year)| ArticleLine::new(title, year).to_string())
            .collect())
    }

    /// Bytes drawn from the memory budget.
    #[getter]
    fn memory_usage(&self) -> PyResult<usize> {
        Ok(self.live()?.memory_usage())
    }

    /// Release every record. Any later call raises `ValueError`.
    fn destroy(&mut self) -> PyResult<()> {
        let collection = self
            .inner
            .take()
            .ok_or_else(|| FolioError::invalid_handle("collection already destroyed"))?;
        collection.destroy();
        Ok(())
    }

    #[getter]
    fn is_destroyed(&self) -> bool {
        self.inner.is_none()
    }

    fn __repr__(&self) -> String {
        match &self.inner {
            None => "ArticleCollection(destroyed)".to_string(),
            Some(collection) => {
                let titles: Vec<String> = collection
                    .iter()
                    .take(3)
                    .map(|(title, _)| format!("'{}'", truncate_string(title, 24)))
                    .collect();
                let more = if collection.len() > 3 { ", ..." } else { "" };
                format!(
                    "ArticleCollection(len={}, titles=[{}{}])",
                    collection.len(),
                    titles.join(", "),
                    more
                )
            }
        }
    }
}

/// Iterator over a snapshot of `(title, year)` tuples.
#[pyclass(name = "ArticleIterator")]
pub struct PyArticleIterator {
    items: std::vec::IntoIter<(String, i32)>,
}

#[pymethods]
impl PyArticleIterator {
    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(mut slf: PyRefMut<'_, Self>) -> Option<(String, i32)> {
        slf.items.next()
    }
}

/// Functional form of `ArticleCollection(titles, years, count)`.
#[pyfunction]
#[pyo3(signature = (titles, years, count=None))]
pub fn read_articles(
    titles: Vec<String>,
    years: Vec<i32>,
    count: Option<i64>,
) -> PyResult<PyArticleCollection> {
    PyArticleCollection::new(titles, years, count, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::exceptions::{PyIndexError, PyValueError};

    fn sample() -> PyArticleCollection {
        PyArticleCollection::new(
            vec!["Foo".to_string(), "Bar".to_string()],
            vec![2001, 1999],
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_len_getitem_and_lines() {
        let collection = sample();
        assert_eq!(collection.__len__().unwrap(), 2);
        assert_eq!(collection.__getitem__(0).unwrap(), ("Foo".to_string(), 2001));
        assert_eq!(collection.__getitem__(-1).unwrap(), ("Bar".to_string(), 1999));
        assert_eq!(
            collection.lines().unwrap(),
            vec![
                "Article \"Foo\" is published on 2001".to_string(),
                "Article \"Bar\" is published on 1999".to_string(),
            ]
        );
    }

    #[test]
    fn test_getitem_out_of_range() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let collection = sample();
            let err = collection.__getitem__(2).unwrap_err();
            assert!(err.is_instance_of::<PyIndexError>(py));
            let err = collection.__getitem__(-3).unwrap_err();
            assert!(err.is_instance_of::<PyIndexError>(py));
        });
    }

    #[test]
    fn test_count_beyond_inputs() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let err = PyArticleCollection::new(
                vec!["Foo".to_string(), "Bar".to_string()],
                vec![2001, 1999],
                Some(3),
                None,
            )
            .err()
            .unwrap();
            assert!(err.is_instance_of::<PyValueError>(py));

            let err = read_articles(vec!["Foo".to_string()], vec![2001], Some(-1))
                .err()
                .unwrap();
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }

    #[test]
    fn test_destroy_twice() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let mut collection = sample();
            assert!(!collection.is_destroyed());

            collection.destroy().unwrap();
            assert!(collection.is_destroyed());

            let err = collection.destroy().unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }

    #[test]
    fn test_use_after_destroy() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let mut collection = sample();
            collection.destroy().unwrap();

            let err = collection.__len__().unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
            let err = collection.__getitem__(0).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
            assert!(collection.lines().is_err());
            assert!(collection.__iter__().is_err());
            assert!(collection.memory_usage().is_err());
            assert_eq!(collection.__repr__(), "ArticleCollection(destroyed)");
        });
    }

    #[test]
    fn test_repr() {
        let collection = sample();
        assert_eq!(
            collection.__repr__(),
            "ArticleCollection(len=2, titles=['Foo', 'Bar'])"
        );
    }
}
