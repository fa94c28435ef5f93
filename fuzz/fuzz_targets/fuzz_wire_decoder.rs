//! Fuzz target for the `Request` buffer decoder.
//!
//! The decoder verifies before reading, so untrusted buffers must be
//! rejected with an error rather than a panic or an out-of-bounds read.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = quiver_core::decode_request(data);
});
