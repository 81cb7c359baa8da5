//! Record store: construction against a configured memory budget.

use std::sync::Arc;

use common_config::StoreConfig;
use common_error::{FolioError, FolioResult, ensure};

use crate::collection::ArticleCollection;
use crate::memory::{MemoryManager, TrackingMemoryManager};

/// Validate a signed count coming from a foreign caller.
pub fn checked_count(count: i64) -> FolioResult<usize> {
    usize::try_from(count).map_err(|_| {
        FolioError::invalid_argument(format!("count must be non-negative, got {count}"))
    })
}

/// Factory for [`ArticleCollection`]s sharing one memory manager.
///
/// Cloning a store shares the manager, so every clone draws from the same
/// budget.
#[derive(Debug, Clone)]
pub struct RecordStore {
    manager: Arc<dyn MemoryManager>,
    max_records: Option<usize>,
}

impl RecordStore {
    /// Create a store backed by `manager`.
    pub fn new(manager: Arc<dyn MemoryManager>) -> Self {
        Self {
            manager,
            max_records: None,
        }
    }

    /// Store with accounting but no limit.
    pub fn unlimited() -> Self {
        Self::new(Arc::new(TrackingMemoryManager::unlimited()))
    }

    /// Store honoring `memory_limit` and `max_records` from configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        let manager = TrackingMemoryManager::with_limit(config.memory_limit);
        Self {
            manager: Arc::new(manager),
            max_records: config.max_records,
        }
    }

    /// Cap the number of records per collection.
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }

    /// The memory manager collections draw from.
    pub fn manager(&self) -> &Arc<dyn MemoryManager> {
        &self.manager
    }

    /// Build a collection from parallel inputs.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `count` is negative, exceeds either input
    ///   length or the store's record cap, or a title contains NUL.
    /// * `AllocationError` if the budget or the allocator refuses storage.
    pub fn construct<T: AsRef<str>>(
        &self,
        titles: &[T],
        years: &[i32],
        count: i64,
    ) -> FolioResult<ArticleCollection> {
        let count = checked_count(count)?;
        self.check_cap(count)?;
        ArticleCollection::construct_in(Arc::clone(&self.manager), titles, years, count)
    }

    /// Build a collection from `(title, year)` pairs.
    pub fn from_pairs<S: AsRef<str>>(&self, pairs: &[(S, i32)]) -> FolioResult<ArticleCollection> {
        self.check_cap(pairs.len())?;
        ArticleCollection::from_pairs_in(Arc::clone(&self.manager), pairs)
    }

    fn check_cap(&self, count: usize) -> FolioResult<()> {
        if let Some(max) = self.max_records {
            ensure!(
                count <= max,
                InvalidArgument: "count {} exceeds the limit of {} records", count, max
            );
        }
        Ok(())
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::unlimited()
    }
}
