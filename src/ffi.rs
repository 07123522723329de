//! C ABI for the build entry points.
//!
//! Every export reads its arguments as `argc`/`argv` NUL-terminated strings
//! and answers with one JSON document. The answer stays owned by the calling
//! thread until its next export call.
use serde_json::json;
use std::{
    borrow::Cow,
    cell::RefCell,
    ffi::{CStr, CString},
    fmt::Display,
    os::raw::{c_char, c_int},
    slice,
};

thread_local! {
    static RESPONSE: RefCell<CString> = RefCell::new(CString::default());
}

/// Reads `argv`. Null entries are dropped; invalid UTF-8 is replaced.
///
/// # Safety
/// `argv` must be null or point to `argc` pointers, each null or pointing to a
/// NUL-terminated string.
pub unsafe fn read_args<'a>(argc: c_int, argv: *const *const c_char) -> Vec<Cow<'a, str>> {
    let Ok(count) = usize::try_from(argc) else {
        return Vec::new();
    };
    if count == 0 || argv.is_null() {
        return Vec::new();
    }
    unsafe { slice::from_raw_parts(argv, count) }
        .iter()
        .filter(|ptr| !ptr.is_null())
        .map(|&ptr| unsafe { CStr::from_ptr(ptr) }.to_string_lossy())
        .collect()
}

/// Hands `response` to the caller. Anything after an interior NUL is cut off.
pub fn respond(response: String) -> *const c_char {
    let mut bytes = response.into_bytes();
    if let Some(nul) = bytes.iter().position(|&byte| byte == 0) {
        bytes.truncate(nul);
    }
    let response = CString::new(bytes).unwrap_or_default();
    RESPONSE.with(|cell| {
        cell.replace(response);
        cell.borrow().as_ptr()
    })
}

/// `{"ok":false,"stage":..,"error":..}`, the shape every failed call answers with.
pub fn failure(stage: &str, error: impl Display) -> String {
    json!({ "ok": false, "stage": stage, "error": error.to_string() }).to_string()
}

pub fn missing_argument(function: &str, argument: &str) -> String {
    failure("config", format!("{function}: missing argument `{argument}`"))
}

/// Declares a C export taking string arguments and returning a JSON `String`.
/// A call with fewer arguments than declared answers with a `config` failure
/// and never runs the body.
#[macro_export]
macro_rules! export_fn {
    (fn $name:ident($($arg:ident),*) $body:block) => {
        #[no_mangle]
        #[allow(clippy::missing_safety_doc)]
        pub unsafe extern "C" fn $name(
            argc: ::std::os::raw::c_int,
            argv: *const *const ::std::os::raw::c_char,
        ) -> *const ::std::os::raw::c_char {
            const PARAMS: &[&str] = &[$(stringify!($arg)),*];
            let args = unsafe { $crate::ffi::read_args(argc, argv) };
            if let Some(missing) = PARAMS.get(args.len()) {
                return $crate::ffi::respond($crate::ffi::missing_argument(
                    stringify!($name),
                    missing,
                ));
            }
            #[allow(unused_mut, unused_variables)]
            let mut args = args.iter().map(|arg| &**arg);
            $(let $arg: &str = args.next().unwrap_or_default();)*
            let body = || -> String { $body };
            $crate::ffi::respond(body())
        }
    };
}

export_fn!(fn map_tiler_version() {
    json!({ "ok": true, "version": env!("CARGO_PKG_VERSION") }).to_string()
});
