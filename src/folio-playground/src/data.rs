//! Sample data for playground demos.

use common_error::{FolioError, FolioResult};

/// Parallel title and year arrays, the shape foreign callers hand over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleArticles {
    pub titles: Vec<String>,
    pub years: Vec<i32>,
}

impl SampleArticles {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Append one record.
    pub fn push(&mut self, title: String, year: i32) {
        self.titles.push(title);
        self.years.push(year);
    }
}

/// The two articles the original interop sample prints.
pub fn sample_articles() -> SampleArticles {
    SampleArticles {
        titles: vec!["Foo".to_string(), "Bar".to_string()],
        years: vec![2001, 1999],
    }
}

/// Parse `TITLE=YEAR`. The split is on the last `=`, so titles may contain `=`.
pub fn parse_article(spec: &str) -> FolioResult<(String, i32)> {
    let (title, year) = spec.rsplit_once('=').ok_or_else(|| {
        FolioError::invalid_argument(format!("expected TITLE=YEAR, got {spec:?}"))
    })?;
    let year = year
        .trim()
        .parse()
        .map_err(|err| FolioError::invalid_argument(format!("bad year in {spec:?}: {err}")))?;
    Ok((title.to_string(), year))
}
