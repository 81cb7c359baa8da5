//! Per-thread record of the last failure, plus the call wrapper every entry
//! point goes through.

use std::cell::RefCell;
use std::ffi::CString;
use std::panic::{AssertUnwindSafe, catch_unwind};

use common_error::{FolioError, FolioResult};

use crate::status::FolioStatus;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

pub(crate) fn set_last_error(err: &FolioError) {
    // Messages built from caller titles could hold NUL; drop those bytes.
    let message = err.to_string().replace('\0', "");
    let message = CString::new(message).ok();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = message);
}

pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Copy of the last error message on this thread, if any.
pub(crate) fn last_error() -> Option<CString> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}

/// Run one entry point: catch panics, record the error, map it to a status.
pub(crate) fn ffi_call<F>(name: &str, body: F) -> FolioStatus
where
    F: FnOnce() -> FolioResult<()>,
{
    let result = catch_unwind(AssertUnwindSafe(body))
        .unwrap_or_else(|_| Err(FolioError::internal(format!("{name} panicked"))));

    match result {
        Ok(()) => {
            clear_last_error();
            FolioStatus::Ok
        }
        Err(err) => {
            log::warn!("{name} rejected: {err}");
            set_last_error(&err);
            FolioStatus::from(&err)
        }
    }
}
