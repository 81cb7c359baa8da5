//! C entry points.
//!
//! Ownership contract: every collection stays owned by this library from
//! `folio_articles_new` until `folio_articles_free`. Callers hold only the
//! numeric handle and never free collection memory themselves. Strings
//! returned by `folio_article_title` and `folio_last_error_message` are
//! owned by the caller and must be released with `folio_string_free`.

use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;
use std::slice;

use common_config::FolioConfig;
use common_error::{FolioError, FolioResult, ensure, invalid_arg};
use folio_store::{Article, ArticleCollection, checked_count};

use crate::error::{ffi_call, last_error};
use crate::registry::{FolioHandle, global};
use crate::status::FolioStatus;

/// Borrow a caller array, accepting null only when it is empty.
///
/// # Safety
///
/// A non-null `data` must point to `len` initialized values that outlive
/// the returned slice.
unsafe fn caller_slice<'a, T>(data: *const T, len: usize, what: &str) -> FolioResult<&'a [T]> {
    if len == 0 {
        return Ok(&[]);
    }
    ensure!(!data.is_null(), InvalidArgument: "{} is null but {} long", what, len);
    // SAFETY: non-null and `len` elements long per the caller contract.
    Ok(unsafe { slice::from_raw_parts(data, len) })
}

/// Borrow the first `count` titles as UTF-8.
///
/// # Safety
///
/// Every non-null pointer among the first `count` entries must reference a
/// NUL-terminated string that stays valid for the returned borrow.
unsafe fn borrow_titles<'a>(
    titles: &'a [*const c_char],
    count: usize,
) -> FolioResult<Vec<&'a str>> {
    let mut borrowed = Vec::new();
    borrowed.try_reserve_exact(count)?;
    for (index, &title) in titles.iter().take(count).enumerate() {
        ensure!(!title.is_null(), InvalidArgument: "title {} is null", index);
        // SAFETY: non-null and NUL-terminated per the caller contract.
        let title = unsafe { CStr::from_ptr(title) };
        let title = title.to_str().map_err(|err| {
            FolioError::invalid_argument(format!("title {index} is not UTF-8: {err}"))
        })?;
        borrowed.push(title);
    }
    Ok(borrowed)
}

fn checked_len(collection: &ArticleCollection, count: c_int) -> FolioResult<()> {
    let count = checked_count(i64::from(count))?;
    ensure!(
        count == collection.len(),
        InvalidArgument: "count {} does not match the {} records held", count, collection.len()
    );
    Ok(())
}

fn article_at(collection: &ArticleCollection, index: usize) -> FolioResult<&Article> {
    match collection.get(index) {
        Some(article) => Ok(article),
        None => invalid_arg!("index {} out of range for {} records", index, collection.len()),
    }
}

/// Build a collection from parallel arrays and return its handle.
///
/// Reads the first `count` entries of `titles` (`titles_len` long) and
/// `years` (`years_len` long). `count` larger than either length is
/// rejected instead of reading past the arrays. On any error no memory
/// stays allocated and `*out_handle` is set to 0.
///
/// # Safety
///
/// `titles` and `years` must each be null or point to arrays of the stated
/// lengths; every title among the first `count` must be a NUL-terminated
/// string. `out_handle` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn folio_articles_new(
    titles: *const *const c_char,
    titles_len: usize,
    years: *const i32,
    years_len: usize,
    count: c_int,
    out_handle: *mut FolioHandle,
) -> FolioStatus {
    ffi_call("folio_articles_new", || {
        ensure!(!out_handle.is_null(), "out_handle is null");
        // SAFETY: checked non-null above; writable per the caller contract.
        unsafe { out_handle.write(0) };

        let count = checked_count(i64::from(count))?;
        ensure!(
            count <= titles_len && count <= years_len,
            InvalidArgument: "count {} exceeds the arrays provided ({} titles, {} years)",
            count, titles_len, years_len
        );

        // SAFETY: lengths and pointers come from the caller contract above.
        let titles = unsafe { caller_slice(titles, titles_len, "titles") }?;
        let years = unsafe { caller_slice(years, years_len, "years") }?;
        let titles = unsafe { borrow_titles(titles, count) }?;

        let mut registry = global()?;
        let collection = registry.store().construct(&titles, years, count as i64)?;
        let handle = registry.insert(collection)?;

        // SAFETY: checked non-null above.
        unsafe { out_handle.write(handle) };
        log::debug!("issued handle {handle} for {count} articles");
        Ok(())
    })
}

/// Destroy the collection behind `handle`.
///
/// `count` must equal the number of records; on mismatch the collection
/// stays live. After success the handle is invalid and any further call
/// with it returns `InvalidHandle`.
#[unsafe(no_mangle)]
pub extern "C" fn folio_articles_free(handle: FolioHandle, count: c_int) -> FolioStatus {
    ffi_call("folio_articles_free", || {
        let mut registry = global()?;
        checked_len(registry.get(handle)?, count)?;
        let collection = registry.remove(handle)?;
        let live = registry.live();
        drop(registry);

        collection.destroy();
        log::debug!("released handle {handle}; {live} handles still live");
        Ok(())
    })
}

/// Print every record to standard output, one
/// `Article "<title>" is published on <year>` line each.
#[unsafe(no_mangle)]
pub extern "C" fn folio_articles_print(handle: FolioHandle, count: c_int) -> FolioStatus {
    ffi_call("folio_articles_print", || {
        let registry = global()?;
        let collection = registry.get(handle)?;
        checked_len(collection, count)?;
        collection.render_stdout()
    })
}

/// Write the number of records behind `handle` to `*out_len`.
///
/// # Safety
///
/// `out_len` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn folio_articles_len(
    handle: FolioHandle,
    out_len: *mut usize,
) -> FolioStatus {
    ffi_call("folio_articles_len", || {
        ensure!(!out_len.is_null(), "out_len is null");
        let len = global()?.get(handle)?.len();
        // SAFETY: checked non-null above.
        unsafe { out_len.write(len) };
        Ok(())
    })
}

/// Write the year of record `index` to `*out_year`.
///
/// # Safety
///
/// `out_year` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn folio_article_year(
    handle: FolioHandle,
    index: usize,
    out_year: *mut i32,
) -> FolioStatus {
    ffi_call("folio_article_year", || {
        ensure!(!out_year.is_null(), "out_year is null");
        let registry = global()?;
        let article = article_at(registry.get(handle)?, index)?;
        // SAFETY: checked non-null above.
        unsafe { out_year.write(article.year()) };
        Ok(())
    })
}

/// Copy of the title of record `index`, or null on error (see
/// `folio_last_error_message`). Release with `folio_string_free`.
#[unsafe(no_mangle)]
pub extern "C" fn folio_article_title(handle: FolioHandle, index: usize) -> *mut c_char {
    let mut title = ptr::null_mut();
    let status = ffi_call("folio_article_title", || {
        let registry = global()?;
        let article = article_at(registry.get(handle)?, index)?;
        let copy = CString::new(article.title())
            .map_err(|err| FolioError::internal(format!("stored title holds NUL: {err}")))?;
        title = copy.into_raw();
        Ok(())
    });
    if status == FolioStatus::Ok {
        title
    } else {
        ptr::null_mut()
    }
}

/// Release a string returned by this library. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a pointer obtained from `folio_article_title` or
/// `folio_last_error_message` that has not been released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn folio_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        // SAFETY: produced by `CString::into_raw` per the caller contract.
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Message of the most recent failed call on this thread, or null.
/// Release with `folio_string_free`.
#[unsafe(no_mangle)]
pub extern "C" fn folio_last_error_message() -> *mut c_char {
    last_error().map_or(ptr::null_mut(), CString::into_raw)
}

/// Install the logger. Level comes from `RUST_LOG`, else `FOLIO_LOG_LEVEL`,
/// else `info`. Calling it again is a no-op.
#[unsafe(no_mangle)]
pub extern "C" fn folio_init_logging() -> FolioStatus {
    ffi_call("folio_init_logging", || {
        let config = FolioConfig::from_env()?;
        let installed = env_logger::Builder::new()
            .filter_level(config.logging.level.to_filter())
            .parse_env(env_logger::Env::default())
            .try_init();
        if installed.is_err() {
            log::debug!("logger already installed");
        }
        Ok(())
    })
}
