//! Line rendering for article records.

use std::fmt;
use std::io::{self, Write};

/// One rendered record: `Article "<title>" is published on <year>`.
///
/// The title is written verbatim, without escaping embedded quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleLine<'a> {
    title: &'a str,
    year: i32,
}

impl<'a> ArticleLine<'a> {
    /// Create a line for a title/year pair.
    pub fn new(title: &'a str, year: i32) -> Self {
        Self { title, year }
    }
}

impl fmt::Display for ArticleLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Article \"{}\" is published on {}", self.title, self.year)
    }
}

/// Write one line per record, in iteration order, each followed by `\n`.
///
/// Writes nothing for an empty iterator. The writer is flushed at the end.
pub fn render_lines<'a, W, I>(writer: &mut W, records: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = (&'a str, i32)>,
{
    for (title, year) in records {
        writeln!(writer, "{}", ArticleLine::new(title, year))?;
    }
    writer.flush()
}
