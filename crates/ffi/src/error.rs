//! Error channel: the error handle and the guard every entry point runs under.

use std::any::Any;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};

use osrmc_core::{Error, Result};

use crate::types::*;

/// Writes `err` into the caller's error slot.
///
/// A null slot means the caller opted out; the error is logged and dropped.
///
/// # Safety
/// `slot` must be null or valid for writes.
pub(crate) unsafe fn set_error(slot: *mut osrmc_error_t, err: &Error) {
    if slot.is_null() {
        log::warn!("dropping error without a slot: {} ({})", err.code(), err.message());
        return;
    }
    *slot = into_handle(osrmc_error::from(err));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs `body`, routing errors and panics into `slot` and returning `fallback` for them.
///
/// # Safety
/// `slot` must be null or valid for writes.
pub(crate) unsafe fn guard<T>(
    slot: *mut osrmc_error_t,
    fallback: T,
    body: impl FnOnce() -> Result<T>,
) -> T {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            set_error(slot, &err);
            fallback
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("panic contained at the C boundary: {}", message);
            set_error(slot, &Error::Panic(message));
            fallback
        }
    }
}

/// Reads a required UTF-8 string argument.
///
/// # Safety
/// `ptr` must be null or a valid NUL-terminated string.
pub(crate) unsafe fn str_arg<'a>(ptr: *const c_char, what: &str) -> Result<&'a str> {
    if ptr.is_null() {
        return Err(Error::InvalidParameter(format!("{} is null", what)));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|e| Error::InvalidParameter(format!("{} is not valid UTF-8: {}", what, e)))
}

/// Returns the machine-readable code of an error.
///
/// # Safety
/// - `error` must be a live handle returned through an error slot
/// - The returned string lives as long as `error`
#[no_mangle]
pub unsafe extern "C" fn osrmc_error_code(error: osrmc_error_t) -> *const c_char {
    match error.as_ref() {
        Some(error) => error.code.as_ptr(),
        None => std::ptr::null(),
    }
}

/// Returns the human-readable message of an error.
///
/// # Safety
/// - `error` must be a live handle returned through an error slot
/// - The returned string lives as long as `error`
#[no_mangle]
pub unsafe extern "C" fn osrmc_error_message(error: osrmc_error_t) -> *const c_char {
    match error.as_ref() {
        Some(error) => error.message.as_ptr(),
        None => std::ptr::null(),
    }
}

/// Frees an error.
///
/// # Safety
/// - `error` must be null or a live handle
/// - `error` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn osrmc_error_destruct(error: osrmc_error_t) {
    release(error);
}
