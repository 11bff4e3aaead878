//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core value with C-compatible fields: `*mut c_char`
//! instead of `String`, explicit enum discriminants. Strings handed to C are
//! owned by this library until the matching `http_free_*` call.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use httpclient_core::{ConnectionTarget, FormArgs, HttpClient, Method, Response};

/// Opaque handle to an `HttpClient`. C callers receive a pointer to this
/// and pass it back into every request function.
pub struct FfiHttpClient {
    pub(crate) inner: HttpClient,
}

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiMethod {
    Get = 0,
    Post = 1,
}

impl From<FfiMethod> for Method {
    fn from(m: FfiMethod) -> Self {
        match m {
            FfiMethod::Get => Method::Get,
            FfiMethod::Post => Method::Post,
        }
    }
}

/// Status code and body of a completed request.
#[repr(C)]
pub struct FfiResponse {
    pub code: u16,
    pub body: *mut c_char,
}

impl FfiResponse {
    pub(crate) fn from_core(resp: Response) -> *mut Self {
        Box::into_raw(Box::new(FfiResponse {
            code: resp.code,
            body: into_c_string(resp.body),
        }))
    }
}

/// Port, host, and path parsed from a URL.
#[repr(C)]
pub struct FfiConnectionTarget {
    pub port: u16,
    pub host: *mut c_char,
    pub path: *mut c_char,
}

impl FfiConnectionTarget {
    pub(crate) fn from_core(target: ConnectionTarget) -> *mut Self {
        Box::into_raw(Box::new(FfiConnectionTarget {
            port: target.port,
            host: into_c_string(target.host),
            path: into_c_string(target.path),
        }))
    }
}

/// Hand a Rust string to C. Interior NUL bytes, which a C string cannot
/// carry, are dropped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let c = CString::new(s).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|b| *b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    c.into_raw()
}

/// Borrow a C string as `&str`. Null or non-UTF-8 input yields `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn borrow_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Collect `len` parallel key/value C strings into `FormArgs`.
///
/// Returns `None` when `len > 0` and either array (or any entry) is null or
/// not UTF-8.
///
/// # Safety
/// When `len > 0`, `keys` and `values` must each point to `len` valid
/// C-string pointers.
pub(crate) unsafe fn read_form(
    keys: *const *const c_char,
    values: *const *const c_char,
    len: usize,
) -> Option<FormArgs> {
    let mut form = FormArgs::new();
    if len == 0 {
        return Some(form);
    }
    if keys.is_null() || values.is_null() {
        return None;
    }
    let keys = unsafe { std::slice::from_raw_parts(keys, len) };
    let values = unsafe { std::slice::from_raw_parts(values, len) };
    for (k, v) in keys.iter().zip(values) {
        let key = unsafe { borrow_str(*k) }?;
        let value = unsafe { borrow_str(*v) }?;
        form.insert(key, value);
    }
    Some(form)
}
