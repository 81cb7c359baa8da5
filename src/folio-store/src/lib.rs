//! Record store for Folio.
//!
//! This crate owns the article data model:
//! - [`Article`]: one title/year record with an exclusively owned title buffer
//! - [`ArticleCollection`]: a fixed-length, move-only collection built
//!   all-or-nothing from parallel inputs and released by `destroy`
//! - [`MemoryManager`] implementations that account for, limit, or
//!   deliberately fail the storage a collection draws
//! - [`RecordStore`]: a factory binding collections to one memory budget

#![forbid(unsafe_code)]

mod article;
mod collection;
mod memory;
mod store;

pub use article::Article;
pub use collection::{ArticleCollection, Iter};
pub use memory::{
    FailingMemoryManager, MemoryManager, MemoryReservation, NoopMemoryManager,
    TrackingMemoryManager,
};
pub use store::{RecordStore, checked_count};
