//! Table of live collections addressed by opaque handles.
//!
//! Foreign callers never see a pointer into Rust memory. They hold a `u64`
//! that is looked up here on every call; once a handle is destroyed it is
//! gone from the table and every later use is `InvalidHandle`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};

use common_config::FolioConfig;
use common_error::{FolioError, FolioResult};
use folio_store::{ArticleCollection, RecordStore};

/// Opaque handle to a live collection. Zero is never issued.
pub type FolioHandle = u64;

/// Live collections keyed by handle.
#[derive(Debug)]
pub struct HandleRegistry {
    store: RecordStore,
    next: FolioHandle,
    live: HashMap<FolioHandle, ArticleCollection>,
}

impl HandleRegistry {
    /// Create an empty registry building collections with `store`.
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            next: 1,
            live: HashMap::new(),
        }
    }

    /// The store new collections are built with.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Take ownership of `collection` and issue a fresh handle for it.
    ///
    /// Handles are never reused within a process.
    pub fn insert(&mut self, collection: ArticleCollection) -> FolioResult<FolioHandle> {
        self.live.try_reserve(1)?;
        let handle = self.next;
        self.next = self
            .next
            .checked_add(1)
            .ok_or_else(|| FolioError::internal("handle space exhausted"))?;
        self.live.insert(handle, collection);
        Ok(handle)
    }

    /// Borrow the collection behind `handle`.
    pub fn get(&self, handle: FolioHandle) -> FolioResult<&ArticleCollection> {
        self.live.get(&handle).ok_or_else(|| stale(handle))
    }

    /// Remove the collection behind `handle`, handing ownership back.
    pub fn remove(&mut self, handle: FolioHandle) -> FolioResult<ArticleCollection> {
        self.live.remove(&handle).ok_or_else(|| stale(handle))
    }

    /// Number of live handles.
    pub fn live(&self) -> usize {
        self.live.len()
    }
}

fn stale(handle: FolioHandle) -> FolioError {
    FolioError::invalid_handle(format!("handle {handle} is unknown or already destroyed"))
}

static REGISTRY: OnceLock<Mutex<HandleRegistry>> = OnceLock::new();

/// Lock the process-wide registry, creating it from `FOLIO_*` on first use.
pub(crate) fn global() -> FolioResult<MutexGuard<'static, HandleRegistry>> {
    REGISTRY
        .get_or_init(|| {
            let config = FolioConfig::from_env().unwrap_or_else(|err| {
                log::warn!("ignoring invalid environment configuration: {err}");
                FolioConfig::default()
            });
            Mutex::new(HandleRegistry::new(RecordStore::from_config(&config.store)))
        })
        .lock()
        .map_err(|_| FolioError::internal("handle registry lock poisoned"))
}
