// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz status decoding from raw transport parts.
//!
//! Input layout: one code byte, the message, a `0x00` separator, then the
//! detail bytes.
//!
//! Verifies:
//! 1. Decoding arbitrary code/message/detail bytes never panics.
//! 2. Only `OK` decodes to "no error".
//! 3. A decoded non-Internal error always matches the status code.
//! 4. Re-encoding a decoded error keeps its message.
#![no_main]
use libfuzzer_sys::fuzz_target;
use wirex_status::{Code, ErrorKind, WireStatus, decode, encode};

fuzz_target!(|data: &[u8]| {
    let Some((&code, rest)) = data.split_first() else {
        return;
    };
    let split = rest.iter().position(|b| *b == 0).unwrap_or(rest.len());
    let (message, details) = rest.split_at(split);
    let details = details.get(1..).unwrap_or_default();
    let message = String::from_utf8_lossy(message);

    let status = WireStatus::from_parts(Code::from_i32(i32::from(code % 20)), message, details);

    // --- Property 1 & 2 ---
    let Some(err) = decode(&status) else {
        assert_eq!(status.code, Code::Ok, "only OK may decode to None");
        return;
    };

    // --- Property 3 ---
    if err.kind() != &ErrorKind::Internal {
        assert_eq!(err.code(), status.code);
    }

    // --- Property 4 ---
    assert_eq!(encode(&err).message, err.message());
});
