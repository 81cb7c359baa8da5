//! Fixed-length, exclusively owned collections of articles.

use std::io::{self, Write};
use std::iter::FusedIterator;
use std::mem::size_of;
use std::sync::Arc;

use common_display::render_lines;
use common_error::{FolioError, FolioResult, ensure};

use crate::article::Article;
use crate::memory::{MemoryManager, MemoryReservation, NoopMemoryManager};

/// An ordered, fixed-length sequence of articles.
///
/// Built atomically by [`ArticleCollection::construct`] and released by
/// [`ArticleCollection::destroy`]. The collection is deliberately not `Clone`:
/// exactly one owner can destroy it, and once destroyed the value is gone.
#[derive(Debug)]
pub struct ArticleCollection {
    articles: Box<[Article]>,
    reservation: MemoryReservation,
}

impl ArticleCollection {
    /// Build a collection from parallel title and year sequences without a
    /// memory budget.
    ///
    /// Fails with `InvalidArgument` if `count` exceeds either input length or
    /// a title contains an interior NUL, and with `AllocationError` if the
    /// allocator refuses a buffer.
    pub fn construct<T: AsRef<str>>(
        titles: &[T],
        years: &[i32],
        count: usize,
    ) -> FolioResult<Self> {
        Self::construct_in(Arc::new(NoopMemoryManager::new()), titles, years, count)
    }

    /// Build a collection whose bytes are drawn from `manager`.
    ///
    /// Only the first `count` entries of each input are read. Titles are
    /// deep-copied; nothing in the result borrows from the inputs.
    pub fn construct_in<T: AsRef<str>>(
        manager: Arc<dyn MemoryManager>,
        titles: &[T],
        years: &[i32],
        count: usize,
    ) -> FolioResult<Self> {
        ensure!(
            count <= titles.len(),
            InvalidArgument: "count {} exceeds the {} titles provided", count, titles.len()
        );
        ensure!(
            count <= years.len(),
            InvalidArgument: "count {} exceeds the {} years provided", count, years.len()
        );

        let records = titles[..count]
            .iter()
            .map(AsRef::as_ref)
            .zip(years[..count].iter().copied());
        Self::build(manager, count, records)
    }

    /// Build a collection from `(title, year)` pairs.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, i32)]) -> FolioResult<Self> {
        Self::from_pairs_in(Arc::new(NoopMemoryManager::new()), pairs)
    }

    /// Build a collection from `(title, year)` pairs against `manager`.
    pub fn from_pairs_in<S: AsRef<str>>(
        manager: Arc<dyn MemoryManager>,
        pairs: &[(S, i32)],
    ) -> FolioResult<Self> {
        let records = pairs.iter().map(|(title, year)| (title.as_ref(), *year));
        Self::build(manager, pairs.len(), records)
    }

    /// Allocate slots, then copy titles one by one.
    ///
    /// Every early return drops the partially filled vector and the
    /// reservation, so a failed build leaves nothing allocated or reserved.
    fn build<'a, I>(manager: Arc<dyn MemoryManager>, count: usize, records: I) -> FolioResult<Self>
    where
        I: Iterator<Item = (&'a str, i32)>,
    {
        let slot_bytes = count.checked_mul(size_of::<Article>()).ok_or_else(|| {
            FolioError::allocation(format!("{count} article slots overflow the address space"))
        })?;
        let mut reservation = MemoryReservation::try_new(manager, slot_bytes)?;

        let mut articles: Vec<Article> = Vec::new();
        articles.try_reserve_exact(count)?;

        for (index, (title, year)) in records.enumerate() {
            ensure!(
                !title.contains('\0'),
                InvalidArgument: "title at index {} contains an interior NUL byte", index
            );
            reservation.grow(title.len())?;

            let mut owned = String::new();
            owned.try_reserve_exact(title.len())?;
            owned.push_str(title);
            articles.push(Article::from_owned(owned, year));
        }

        debug_assert_eq!(articles.len(), count);
        log::debug!(
            "constructed {} articles ({} bytes reserved)",
            count,
            reservation.size()
        );

        Ok(Self {
            articles: articles.into_boxed_slice(),
            reservation,
        })
    }

    /// Release every title buffer, then the record slots, then the
    /// reservation. Consumes the collection, so it cannot be used again.
    pub fn destroy(self) {
        let Self {
            articles,
            reservation,
        } = self;
        let count = articles.len();
        let bytes = reservation.size();

        drop(articles);
        reservation.free();

        log::debug!("destroyed {count} articles ({bytes} bytes released)");
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Article> {
        self.articles.get(index)
    }

    /// All records, in construction order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Bytes drawn from the memory manager for this collection.
    pub fn memory_usage(&self) -> usize {
        self.reservation.size()
    }

    /// Iterate `(title, year)` pairs in construction order.
    ///
    /// Borrowing only; call again to restart from the first record.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.articles.iter(),
        }
    }

    /// Write one `Article "<title>" is published on <year>` line per record.
    pub fn render<W: Write + ?Sized>(&self, writer: &mut W) -> FolioResult<()> {
        render_lines(writer, self.iter())?;
        Ok(())
    }

    /// Render to standard output.
    pub fn render_stdout(&self) -> FolioResult<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.render(&mut lock)
    }
}

impl<'a> IntoIterator for &'a ArticleCollection {
    type Item = (&'a str, i32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over `(title, year)` pairs.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Article>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, i32);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Article::as_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Article::as_pair)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{FailingMemoryManager, TrackingMemoryManager};

    fn render_to_string(collection: &ArticleCollection) -> String {
        let mut out = Vec::new();
        collection.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_construct_and_iterate() {
        let collection = ArticleCollection::construct(&["Foo", "Bar"], &[2001, 1999], 2).unwrap();

        assert_eq!(collection.len(), 2);
        let pairs: Vec<_> = collection.iter().collect();
        assert_eq!(pairs, vec![("Foo", 2001), ("Bar", 1999)]);
    }

    #[test]
    fn test_iterate_is_restartable() {
        let collection = ArticleCollection::construct(&["A", "B", "C"], &[1, 2, 3], 3).unwrap();

        let first: Vec<_> = collection.iter().collect();
        let second: Vec<_> = (&collection).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(collection.iter().len(), 3);
        assert_eq!(collection.iter().rev().next(), Some(("C", 3)));
    }

    #[test]
    fn test_render_round_trip() {
        let collection = ArticleCollection::construct(&["Foo", "Bar"], &[2001, 1999], 2).unwrap();
        assert_eq!(
            render_to_string(&collection),
            "Article \"Foo\" is published on 2001\nArticle \"Bar\" is published on 1999\n"
        );
    }

    #[test]
    fn test_empty_collection() {
        let titles: [&str; 0] = [];
        let collection = ArticleCollection::construct(&titles, &[], 0).unwrap();

        assert!(collection.is_empty());
        assert_eq!(collection.iter().next(), None);
        assert_eq!(render_to_string(&collection), "");
        collection.destroy();
    }

    #[test]
    fn test_count_prefix_only() {
        let collection =
            ArticleCollection::construct(&["Foo", "Bar", "Baz"], &[1, 2, 3, 4], 2).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(1).map(Article::title), Some("Bar"));
        assert!(collection.get(2).is_none());
    }

    #[test]
    fn test_count_exceeds_titles() {
        let err = ArticleCollection::construct(&["Foo"], &[2001, 1999], 2).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("titles"));
    }

    #[test]
    fn test_count_exceeds_years() {
        let err = ArticleCollection::construct(&["Foo", "Bar"], &[2001], 2).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("years"));
    }

    #[test]
    fn test_interior_nul_rejected() {
        let err = ArticleCollection::construct(&["Foo", "B\0r"], &[1, 2], 2).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_from_pairs() {
        let collection = ArticleCollection::from_pairs(&[("Foo", 2001), ("Bar", 1999)]).unwrap();
        assert_eq!(collection.get(0).map(Article::year), Some(2001));
        assert_eq!(collection.get(0).unwrap().to_string(), "Article \"Foo\" is published on 2001");
    }

    #[test]
    fn test_memory_accounting() {
        let manager: Arc<dyn MemoryManager> = Arc::new(TrackingMemoryManager::unlimited());
        let collection =
            ArticleCollection::construct_in(Arc::clone(&manager), &["Foo", "Quux"], &[1, 2], 2)
                .unwrap();

        let expected = 2 * size_of::<Article>() + 3 + 4;
        assert_eq!(collection.memory_usage(), expected);
        assert_eq!(manager.used(), expected);

        collection.destroy();
        assert_eq!(manager.used(), 0);
    }

    #[test]
    fn test_failed_build_releases_everything() {
        let failing = Arc::new(FailingMemoryManager::fail_on(3));
        let manager: Arc<dyn MemoryManager> = failing.clone();

        let err = ArticleCollection::construct_in(manager, &["One", "Two", "Three"], &[1, 2, 3], 3)
            .unwrap_err();

        assert!(err.is_allocation());
        assert_eq!(failing.calls(), 3);
        assert_eq!(failing.used(), 0);
    }
}
