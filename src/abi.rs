//! Purpose: C ABI bridge for bindings (libgoat).
//! Exports: C-callable counter/tripler functions and buffer/error helpers.
//! Role: Stable ABI surface declared in `include/goat.h` and used by the Node binding.
//! Invariants: Opaque handles; explicit free functions; 0 on success, -1 on failure.
//! Invariants: Error kinds map 1:1 with core error kinds (`to_exit_code`).
//! Invariants: A handle must not be used from two threads at once.

use crate::core::counter::Counter;
use crate::core::error::{Error, ErrorKind, to_exit_code};
use crate::core::tripler::compute_triple;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

#[repr(C)]
pub struct goat_counter {
    counter: Counter,
}

#[repr(C)]
pub struct goat_buf {
    data: *mut u8,
    len: usize,
}

#[repr(C)]
pub struct goat_error {
    kind: i32,
    message: *mut c_char,
}

impl goat_buf {
    pub fn empty() -> Self {
        Self {
            data: ptr::null_mut(),
            len: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        if self.data.is_null() || self.len == 0 {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.data, self.len) }
    }
}

impl goat_error {
    pub fn kind(&self) -> i32 {
        self.kind
    }

    /// NUL-terminated; null only if the message could not be encoded.
    pub fn message(&self) -> *const c_char {
        self.message
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn goat_counter_new(
    out_counter: *mut *mut goat_counter,
    out_err: *mut *mut goat_error,
) -> i32 {
    if out_counter.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_counter is null"),
        );
    }
    let handle = Box::new(goat_counter {
        counter: Counter::new(),
    });
    unsafe {
        *out_counter = Box::into_raw(handle);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn goat_counter_free(counter: *mut goat_counter) {
    if counter.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(counter));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn goat_counter_increment(
    counter: *mut goat_counter,
    out_err: *mut *mut goat_error,
) -> i32 {
    let counter = match borrow_counter(counter, out_err) {
        Ok(counter) => counter,
        Err(code) => return code,
    };
    counter.counter.increment();
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn goat_counter_horns(
    counter: *mut goat_counter,
    out_horns: *mut u32,
    out_err: *mut *mut goat_error,
) -> i32 {
    let counter = match borrow_counter(counter, out_err) {
        Ok(counter) => counter,
        Err(code) => return code,
    };
    if out_horns.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_horns is null"),
        );
    }
    unsafe {
        *out_horns = counter.counter.horns();
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn goat_counter_describe(
    counter: *mut goat_counter,
    out_text: *mut goat_buf,
    out_err: *mut *mut goat_error,
) -> i32 {
    let counter = match borrow_counter(counter, out_err) {
        Ok(counter) => counter,
        Err(code) => return code,
    };
    if let Err(err) = write_text_buf(out_text, counter.counter.describe()) {
        return fail(out_err, err);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn goat_compute_triple(a: u32) -> u32 {
    compute_triple(a)
}

#[unsafe(no_mangle)]
pub extern "C" fn goat_buf_free(buf: *mut goat_buf) {
    if buf.is_null() {
        return;
    }
    unsafe {
        let buf = &mut *buf;
        if !buf.data.is_null() && buf.len != 0 {
            drop(Vec::from_raw_parts(buf.data, buf.len, buf.len));
        }
        buf.data = ptr::null_mut();
        buf.len = 0;
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn goat_error_free(err: *mut goat_error) {
    if err.is_null() {
        return;
    }
    unsafe {
        let err = Box::from_raw(err);
        if !err.message.is_null() {
            drop(CString::from_raw(err.message));
        }
    }
}

fn borrow_counter<'a>(
    counter: *mut goat_counter,
    out_err: *mut *mut goat_error,
) -> Result<&'a mut goat_counter, i32> {
    if counter.is_null() {
        return Err(fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("counter is null"),
        ));
    }
    unsafe { Ok(&mut *counter) }
}

fn write_text_buf(out_text: *mut goat_buf, text: String) -> Result<(), Error> {
    if out_text.is_null() {
        return Err(Error::new(ErrorKind::Usage).with_message("out_text is null"));
    }
    unsafe {
        let buf = &mut *out_text;
        let mut data = text.into_bytes().into_boxed_slice();
        buf.len = data.len();
        buf.data = data.as_mut_ptr();
        std::mem::forget(data);
    }
    Ok(())
}

fn fail(out_err: *mut *mut goat_error, err: Error) -> i32 {
    tracing::debug!(kind = err.kind().label(), error = %err, "abi call failed");
    if out_err.is_null() {
        return -1;
    }
    let error = Box::new(goat_error {
        kind: to_exit_code(err.kind()),
        message: to_c_string(err.message().unwrap_or("")),
    });
    unsafe {
        *out_err = Box::into_raw(error);
    }
    -1
}

fn to_c_string(input: &str) -> *mut c_char {
    CString::new(input)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}
