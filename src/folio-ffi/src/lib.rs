//! C ABI for Folio.
//!
//! Exposes article collections to foreign callers (C, or managed runtimes
//! through their native interop layers) as opaque `u64` handles:
//!
//! ```c
//! const char *titles[] = {"Foo", "Bar"};
//! int32_t years[] = {2001, 1999};
//! uint64_t handle = 0;
//!
//! if (folio_articles_new(titles, 2, years, 2, 2, &handle) == FOLIO_OK) {
//!     folio_articles_print(handle, 2);
//!     folio_articles_free(handle, 2);
//! }
//! ```
//!
//! Every entry point returns a [`FolioStatus`]; the message behind the last
//! failure on the calling thread is available from
//! `folio_last_error_message`. The matching declarations live in
//! `include/folio.h`.

mod api;
mod error;
mod registry;
mod status;

pub use api::{
    folio_article_title, folio_article_year, folio_articles_free, folio_articles_len,
    folio_articles_new, folio_articles_print, folio_init_logging, folio_last_error_message,
    folio_string_free,
};
pub use registry::{FolioHandle, HandleRegistry};
pub use status::FolioStatus;
