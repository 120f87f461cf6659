/*
Purpose: Provide a Node N-API binding over the libgoat C ABI.
Key Exports: Goat, computeTriple, ErrorKind.
Role: Node/TypeScript binding that mirrors the Rust API.
Invariants: Calls into C ABI only; explicit close() alongside Drop.
Invariants: Errors include stable kinds and context in message text.
Notes: The addon links against libgoat and does not re-implement internals.
*/

use libc::{c_char, c_int};
use napi::bindgen_prelude::Status;
use napi::{Error, Result};
use napi_derive::napi;
use std::ffi::CStr;
use std::ptr;

#[repr(C)]
struct goat_counter_t {
    _private: [u8; 0],
}

#[repr(C)]
struct goat_buf_t {
    data: *mut u8,
    len: usize,
}

#[repr(C)]
struct goat_error_t {
    kind: i32,
    message: *mut c_char,
}

unsafe extern "C" {
    fn goat_counter_new(
        out_counter: *mut *mut goat_counter_t,
        out_err: *mut *mut goat_error_t,
    ) -> c_int;
    fn goat_counter_free(counter: *mut goat_counter_t);

    fn goat_counter_increment(counter: *mut goat_counter_t, out_err: *mut *mut goat_error_t) -> c_int;
    fn goat_counter_horns(
        counter: *mut goat_counter_t,
        out_horns: *mut u32,
        out_err: *mut *mut goat_error_t,
    ) -> c_int;
    fn goat_counter_describe(
        counter: *mut goat_counter_t,
        out_text: *mut goat_buf_t,
        out_err: *mut *mut goat_error_t,
    ) -> c_int;

    fn goat_compute_triple(a: u32) -> u32;

    fn goat_buf_free(buf: *mut goat_buf_t);
    fn goat_error_free(err: *mut goat_error_t);
}

#[napi]
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Internal = 1,
    Usage = 2,
    Io = 3,
}

#[napi]
pub struct Goat {
    ptr: *mut goat_counter_t,
}

#[napi]
impl Goat {
    #[napi(constructor)]
    pub fn new() -> Result<Self> {
        let mut out = ptr::null_mut();
        let mut err = ptr::null_mut();
        let rc = unsafe { goat_counter_new(&mut out, &mut err) };
        if rc != 0 {
            return Err(take_error(err));
        }
        Ok(Self { ptr: out })
    }

    #[napi]
    pub fn add_a_horn(&mut self) -> Result<()> {
        let mut err = ptr::null_mut();
        let rc = unsafe { goat_counter_increment(self.ptr, &mut err) };
        if rc != 0 {
            return Err(take_error(err));
        }
        Ok(())
    }

    #[napi(getter)]
    pub fn horns(&self) -> Result<u32> {
        let mut horns = 0u32;
        let mut err = ptr::null_mut();
        let rc = unsafe { goat_counter_horns(self.ptr, &mut horns, &mut err) };
        if rc != 0 {
            return Err(take_error(err));
        }
        Ok(horns)
    }

    #[napi]
    pub fn describe(&self) -> Result<String> {
        let mut out = goat_buf_t { data: ptr::null_mut(), len: 0 };
        let mut err = ptr::null_mut();
        let rc = unsafe { goat_counter_describe(self.ptr, &mut out, &mut err) };
        if rc != 0 {
            return Err(take_error(err));
        }
        let bytes = copy_and_free_buf(out);
        String::from_utf8(bytes)
            .map_err(|_| Error::new(Status::GenericFailure, "goat: description is not UTF-8"))
    }

    #[napi]
    pub fn close(&mut self) {
        if !self.ptr.is_null() {
            unsafe { goat_counter_free(self.ptr) };
            self.ptr = ptr::null_mut();
        }
    }
}

impl Drop for Goat {
    fn drop(&mut self) {
        self.close();
    }
}

#[napi]
pub fn compute_triple(a: u32) -> u32 {
    unsafe { goat_compute_triple(a) }
}

fn copy_and_free_buf(mut buf: goat_buf_t) -> Vec<u8> {
    let data = if buf.data.is_null() || buf.len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(buf.data, buf.len) }.to_vec()
    };
    unsafe { goat_buf_free(&mut buf) };
    data
}

fn take_error(err: *mut goat_error_t) -> Error {
    if err.is_null() {
        return Error::new(Status::GenericFailure, "goat: unknown error");
    }
    let owned = unsafe { &*err };
    let kind_label = error_kind_label(owned.kind);
    let mut message = unsafe { cstring_to_string(owned.message) };
    if message.is_empty() {
        message = default_error_message(kind_label).to_string();
    }
    unsafe { goat_error_free(err) };
    Error::new(
        Status::GenericFailure,
        format!("goat error: kind={kind_label}; message={message}"),
    )
}

fn default_error_message(kind: &str) -> &'static str {
    match kind {
        "Internal" => "internal error",
        "Usage" => "usage error",
        "Io" => "io error",
        _ => "error",
    }
}

fn error_kind_label(kind: i32) -> &'static str {
    match kind {
        1 => "Internal",
        2 => "Usage",
        3 => "Io",
        _ => "Internal",
    }
}

unsafe fn cstring_to_string(ptr: *mut c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().to_string()
}
