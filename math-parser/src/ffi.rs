use libc::{c_char, c_double, c_int, size_t};

use crate::parser::MathParser;
use crate::rpn_converter::RPNExpr;
use std::ffi::{c_void, CStr};

/// Returned when the call succeeded.
pub const MATH_PARSER_OK: c_int = 0;
/// Returned when the call failed; the error buffer holds the reason.
pub const MATH_PARSER_ERROR: c_int = -1;

/// Copies `error` into the caller's buffer, truncating it so that a NUL terminator always fits.
unsafe fn fill_error_buffer(output_error: *mut c_char, output_error_len: size_t, error: &str) {
    if output_error.is_null() || output_error_len == 0 {
        return;
    }

    let output_error = std::slice::from_raw_parts_mut(output_error as *mut u8, output_error_len);
    let len = error.len().min(output_error_len - 1);
    output_error[..len].copy_from_slice(&error.as_bytes()[..len]);
    output_error[len] = 0;
}

/// Borrows a C string as UTF-8, reporting failures through the error buffer.
unsafe fn input_str<'a>(
    input: *const c_char,
    output_error: *mut c_char,
    output_error_len: size_t,
) -> Option<&'a str> {
    if input.is_null() {
        fill_error_buffer(output_error, output_error_len, "Invalid input string pointer!");
        return None;
    }

    match CStr::from_ptr(input).to_str() {
        Ok(input) => Some(input),
        Err(_) => {
            fill_error_buffer(
                output_error,
                output_error_len,
                "Failed to convert the input string to a Rust string!",
            );
            None
        }
    }
}

/// Create a parser with the built-in operators and constants.
///
/// # Returns
///
/// An owned parser handle that must be released with [`math_parser_free`].
#[no_mangle]
pub extern "C" fn math_parser_new() -> *mut c_void {
    Box::into_raw(Box::new(MathParser::new())) as *mut c_void
}

/// Free the parser.
///
/// # Safety
///
/// The caller must ensure that the `parser` pointer is valid and was not freed before.
#[no_mangle]
pub unsafe extern "C" fn math_parser_free(parser: *mut c_void) {
    if parser.is_null() {
        return;
    }

    unsafe {
        drop(Box::from_raw(parser as *mut MathParser));
    }
}

/// Evaluate an expression. Assignments update the parser's variables.
///
/// # Arguments
///
/// * `parser` - The parser handle.
/// * `input` - The NUL-terminated expression.
/// * `output_value` - Receives the result on success.
/// * `output_error` - The buffer to write the error message to.
/// * `output_error_len` - The length of the error buffer.
///
/// # Returns
///
/// [`MATH_PARSER_OK`] on success, [`MATH_PARSER_ERROR`] otherwise.
///
/// # Safety
///
/// `parser` must come from [`math_parser_new`], `input` must be a valid C string,
/// `output_value` must be writable and `output_error` must have at least `output_error_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn math_parser_evaluate(
    parser: *mut c_void,
    input: *const c_char,
    output_value: *mut c_double,
    output_error: *mut c_char,
    output_error_len: size_t,
) -> c_int {
    if parser.is_null() || output_value.is_null() {
        unsafe {
            fill_error_buffer(output_error, output_error_len, "Invalid pointer!");
        }
        return MATH_PARSER_ERROR;
    }

    let Some(input) = (unsafe { input_str(input, output_error, output_error_len) }) else {
        return MATH_PARSER_ERROR;
    };

    let parser = unsafe { &mut *(parser as *mut MathParser) };
    match parser.evaluate(input) {
        Ok(value) => {
            unsafe { *output_value = value };
            MATH_PARSER_OK
        }
        Err(e) => {
            unsafe {
                fill_error_buffer(
                    output_error,
                    output_error_len,
                    &format!("Failed to evaluate the expression: {}", e),
                );
            }
            MATH_PARSER_ERROR
        }
    }
}

/// Compile the expression into a program that can be evaluated repeatedly.
///
/// # Returns
///
/// The program handle, or null on error. Release it with [`math_parser_free_program`].
///
/// # Safety
///
/// Same requirements as [`math_parser_evaluate`].
#[no_mangle]
pub unsafe extern "C" fn math_parser_compile(
    parser: *mut c_void,
    input: *const c_char,
    output_error: *mut c_char,
    output_error_len: size_t,
) -> *mut c_void {
    if parser.is_null() {
        unsafe {
            fill_error_buffer(output_error, output_error_len, "Invalid parser pointer!");
        }
        return std::ptr::null_mut();
    }

    let Some(input) = (unsafe { input_str(input, output_error, output_error_len) }) else {
        return std::ptr::null_mut();
    };

    let parser = unsafe { &mut *(parser as *mut MathParser) };
    match parser.compile(input) {
        Ok(program) => Box::into_raw(Box::new(program)) as *mut c_void,
        Err(e) => {
            unsafe {
                fill_error_buffer(
                    output_error,
                    output_error_len,
                    &format!("Failed to compile the expression: {}", e),
                );
            }
            std::ptr::null_mut()
        }
    }
}

/// Evaluate a compiled program against the parser's current variables.
///
/// # Safety
///
/// `program` must come from [`math_parser_compile`] and not have been freed; the other
/// pointers follow [`math_parser_evaluate`].
#[no_mangle]
pub unsafe extern "C" fn math_parser_evaluate_program(
    parser: *mut c_void,
    program: *const c_void,
    output_value: *mut c_double,
    output_error: *mut c_char,
    output_error_len: size_t,
) -> c_int {
    if parser.is_null() || program.is_null() || output_value.is_null() {
        unsafe {
            fill_error_buffer(output_error, output_error_len, "Invalid pointer!");
        }
        return MATH_PARSER_ERROR;
    }

    let parser = unsafe { &mut *(parser as *mut MathParser) };
    let program = unsafe { &*(program as *const RPNExpr) };
    match parser.evaluate_rpn(program) {
        Ok(value) => {
            unsafe { *output_value = value };
            MATH_PARSER_OK
        }
        Err(e) => {
            unsafe {
                fill_error_buffer(
                    output_error,
                    output_error_len,
                    &format!("Failed to evaluate the program: {}", e),
                );
            }
            MATH_PARSER_ERROR
        }
    }
}

/// Free a compiled program.
///
/// # Safety
///
/// The caller must ensure that the `program` pointer is valid and was not freed before.
#[no_mangle]
pub unsafe extern "C" fn math_parser_free_program(program: *mut c_void) {
    if program.is_null() {
        return;
    }

    unsafe {
        drop(Box::from_raw(program as *mut RPNExpr));
    }
}

/// Read back a variable.
///
/// # Safety
///
/// Same requirements as [`math_parser_evaluate`], with `name` in place of `input`.
#[no_mangle]
pub unsafe extern "C" fn math_parser_variable(
    parser: *const c_void,
    name: *const c_char,
    output_value: *mut c_double,
    output_error: *mut c_char,
    output_error_len: size_t,
) -> c_int {
    if parser.is_null() || output_value.is_null() {
        unsafe {
            fill_error_buffer(output_error, output_error_len, "Invalid pointer!");
        }
        return MATH_PARSER_ERROR;
    }

    let Some(name) = (unsafe { input_str(name, output_error, output_error_len) }) else {
        return MATH_PARSER_ERROR;
    };

    let parser = unsafe { &*(parser as *const MathParser) };
    match parser.variable(name) {
        Ok(value) => {
            unsafe { *output_value = value };
            MATH_PARSER_OK
        }
        Err(e) => {
            unsafe { fill_error_buffer(output_error, output_error_len, &e.to_string()) };
            MATH_PARSER_ERROR
        }
    }
}
