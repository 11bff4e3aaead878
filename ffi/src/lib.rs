//! C-ABI wrapper around `httpclient-core`.
//!
//! # Overview
//! Exposes URL parsing, request building, and the blocking GET/POST client
//! through `extern "C"` functions.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A null return is the absent response: invalid URL, failed connection,
//!   null argument, or a caught panic all look the same to C.
//! - The C caller owns all returned pointers and must call the matching
//!   `http_free_*` function to release them.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use httpclient_core::{build_request, parse_url, Args, Method};

use types::{
    borrow_str, into_c_string, read_form, FfiConnectionTarget, FfiHttpClient, FfiMethod,
    FfiResponse,
};

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client. The caller must free it with `http_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_new() -> *mut FfiHttpClient {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiHttpClient {
            inner: httpclient_core::HttpClient::new(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `http_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_free(client: *mut FfiHttpClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Shared body of the request functions: null checks, the call itself, and
/// conversion of the optional response.
fn run_request(
    client: *mut FfiHttpClient,
    url: *const c_char,
    call: impl FnOnce(&mut httpclient_core::HttpClient, &str) -> Option<httpclient_core::Response>,
) -> *mut FfiResponse {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(url) = (unsafe { borrow_str(url) }) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &mut *client };
        match call(&mut client.inner, url) {
            Some(resp) => FfiResponse::from_core(resp),
            None => std::ptr::null_mut(),
        }
    }))
    .unwrap_or_else(|_| {
        tracing::error!("panic in HTTP request");
        std::ptr::null_mut()
    })
}

/// GET `url`, with `len` key/value pairs appended as a query string.
///
/// Pass `len = 0` (arrays may then be null) for no arguments. Returns null
/// on any failure.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_get(
    client: *mut FfiHttpClient,
    url: *const c_char,
    keys: *const *const c_char,
    values: *const *const c_char,
    len: usize,
) -> *mut FfiResponse {
    run_request(client, url, |inner, url| {
        let form = unsafe { read_form(keys, values, len) }?;
        let args = (!form.is_empty()).then(|| Args::Form(form));
        inner.get(url, args.as_ref())
    })
}

/// POST `len` key/value pairs to `url` as a form body. `len = 0` posts an
/// empty form.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_post_form(
    client: *mut FfiHttpClient,
    url: *const c_char,
    keys: *const *const c_char,
    values: *const *const c_char,
    len: usize,
) -> *mut FfiResponse {
    run_request(client, url, |inner, url| {
        let form = unsafe { read_form(keys, values, len) }?;
        inner.post(url, Some(&Args::Form(form)))
    })
}

/// POST `text` to `url` as `text/plain`. A null `text` posts no arguments.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_post_text(
    client: *mut FfiHttpClient,
    url: *const c_char,
    text: *const c_char,
) -> *mut FfiResponse {
    run_request(client, url, |inner, url| {
        if text.is_null() {
            return inner.post(url, None);
        }
        let text = unsafe { borrow_str(text) }?;
        inner.post(url, Some(&Args::text(text)))
    })
}

/// Dispatch on `method`: `"POST"` posts, anything else (including null)
/// gets. No arguments are sent.
#[unsafe(no_mangle)]
pub extern "C" fn http_client_command(
    client: *mut FfiHttpClient,
    url: *const c_char,
    method: *const c_char,
) -> *mut FfiResponse {
    run_request(client, url, |inner, url| {
        let method = unsafe { borrow_str(method) }.unwrap_or("GET");
        inner.command(url, method, None)
    })
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Parse `url` into port, host, and path. Returns null for an invalid URL.
/// The caller must free the result with `http_free_target`.
#[unsafe(no_mangle)]
pub extern "C" fn http_parse_url(url: *const c_char) -> *mut FfiConnectionTarget {
    catch_unwind(|| {
        let Some(url) = (unsafe { borrow_str(url) }) else {
            return std::ptr::null_mut();
        };
        match parse_url(url) {
            Ok(target) => FfiConnectionTarget::from_core(target),
            Err(e) => {
                tracing::debug!(error = %e, "url rejected");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Render the wire text of a request without sending it.
///
/// `len` key/value pairs become the query string (GET) or form body (POST);
/// `len = 0` builds a request with no arguments. The caller must free the
/// result with `http_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn http_build_request(
    method: FfiMethod,
    host: *const c_char,
    path: *const c_char,
    keys: *const *const c_char,
    values: *const *const c_char,
    len: usize,
) -> *mut c_char {
    catch_unwind(|| {
        let (Some(host), Some(path)) = (unsafe { borrow_str(host) }, unsafe { borrow_str(path) })
        else {
            return std::ptr::null_mut();
        };
        let Some(form) = (unsafe { read_form(keys, values, len) }) else {
            return std::ptr::null_mut();
        };
        let args = (!form.is_empty()).then(|| Args::Form(form));
        let req = build_request(Method::from(method), host, path, args.as_ref());
        into_c_string(req.to_wire())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a response returned by a request function. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_free_response(response: *mut FfiResponse) {
    if response.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let response = unsafe { Box::from_raw(response) };
        if !response.body.is_null() {
            drop(unsafe { CString::from_raw(response.body) });
        }
    });
}

/// Free a target returned by `http_parse_url`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_free_target(target: *mut FfiConnectionTarget) {
    if target.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let target = unsafe { Box::from_raw(target) };
        if !target.host.is_null() {
            drop(unsafe { CString::from_raw(target.host) });
        }
        if !target.path.is_null() {
            drop(unsafe { CString::from_raw(target.path) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
