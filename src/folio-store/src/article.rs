//! The article record.

use std::fmt;

use common_display::ArticleLine;

/// A titled, dated catalog entry.
///
/// The title buffer is owned exclusively by the record and never contains an
/// interior NUL, so it always converts to a C string.
#[derive(Debug, PartialEq, Eq)]
pub struct Article {
    title: String,
    year: i32,
}

impl Article {
    pub(crate) fn from_owned(title: String, year: i32) -> Self {
        Self { title, year }
    }

    /// The article title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The publication year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// `(title, year)` view of the record.
    pub fn as_pair(&self) -> (&str, i32) {
        (&self.title, self.year)
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ArticleLine::new(&self.title, self.year).fmt(f)
    }
}
