// SPDX-License-Identifier: MIT OR Apache-2.0
//! Encode → decode round trips for every error kind.

use std::io;

use wirex_status::{Code, Error, ErrorKind, WireStatus, decode, encode};

struct Case {
    name: &'static str,
    err: Error,
    want_message: &'static str,
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "basic internal error",
            err: Error::internal("internal error"),
            want_message: "wire:Internal: internal error",
        },
        Case {
            name: "wrapped causes are dropped, but text is preserved",
            err: Error::internal("internal error").with_cause(io::Error::other("some wrapped error")),
            want_message: "wire:Internal: internal error: some wrapped error",
        },
        Case {
            name: "bad request",
            err: Error::bad_request("bad request").with_cause(io::Error::other("some bad request")),
            want_message: "wire:InvalidArgument: bad request: some bad request",
        },
        Case {
            name: "requires proxy request",
            err: Error::requires_proxy_request("requires proxy request", "I have my reasons")
                .with_cause(io::Error::other("some unsupported function")),
            want_message: "wire:NotFound: requires proxy request: some unsupported function",
        },
        Case {
            name: "rate limited",
            err: Error::rate_limited("rate limited").with_cause(io::Error::other("stop pressing f5")),
            want_message: "wire:ResourceExhausted: rate limited: stop pressing f5",
        },
        Case {
            name: "disabled zero value",
            err: Error::from(ErrorKind::Disabled),
            want_message: "",
        },
        Case {
            name: "disabled with a message",
            err: Error::disabled("remote read is turned off"),
            want_message: "wire:Unavailable: remote read is turned off",
        },
        Case {
            name: "unimplemented",
            err: Error::unimplemented("we don't do that here"),
            want_message: "wire:Unimplemented: we don't do that here",
        },
        Case {
            name: "unprocessable entity",
            err: Error::unprocessable_entity("what even is this"),
            want_message: "wire:InvalidArgument: what even is this",
        },
        Case {
            name: "conflict",
            err: Error::conflict("a conflict"),
            want_message: "wire:Aborted: a conflict",
        },
        Case {
            name: "too many requests",
            err: Error::too_many_requests("too much!"),
            want_message: "wire:ResourceExhausted: too much!",
        },
    ]
}

#[test]
fn roundtrip_preserves_kind_and_message() {
    for case in cases() {
        let status = encode(&case.err);
        let got = decode(&status).unwrap_or_else(|| panic!("{}: decoded to None", case.name));

        assert_eq!(got.message(), case.want_message, "{}", case.name);
        assert_eq!(got.message(), case.err.message(), "{}", case.name);
        assert_eq!(got.kind(), case.err.kind(), "{}", case.name);
        assert!(got.cause().is_none(), "{}: cause must not survive", case.name);
        assert_eq!(got, case.err, "{}", case.name);
    }
}

#[test]
fn roundtrip_through_detail_bytes() {
    for case in cases() {
        let status = encode(&case.err);
        let rebuilt = WireStatus::from_parts(status.code, &status.message, &status.details_bytes());
        assert_eq!(rebuilt, status, "{}", case.name);
        assert_eq!(decode(&rebuilt), Some(case.err), "{}", case.name);
    }
}

#[test]
fn roundtrip_through_json() {
    for case in cases() {
        let json = serde_json::to_string(&encode(&case.err)).unwrap();
        let status: WireStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(decode(&status), Some(case.err), "{}", case.name);
    }
}

#[test]
fn proxy_reason_survives_independently_of_message() {
    let err = Error::requires_proxy_request("m", "I have my reasons")
        .with_cause(io::Error::other("c"));
    let got = decode(&encode(&err)).unwrap();
    assert_eq!(got.reason(), Some("I have my reasons"));
    assert_eq!(
        got.kind(),
        &ErrorKind::RequiresProxyRequest {
            reason: "I have my reasons".into()
        }
    );
}

#[test]
fn shared_codes_stay_distinguishable() {
    let bad = decode(&encode(&Error::bad_request("x"))).unwrap();
    let unprocessable = decode(&encode(&Error::unprocessable_entity("x"))).unwrap();
    assert_eq!(bad.code(), Code::InvalidArgument);
    assert_eq!(unprocessable.code(), Code::InvalidArgument);
    assert_eq!(bad.kind(), &ErrorKind::BadRequest);
    assert_eq!(unprocessable.kind(), &ErrorKind::UnprocessableEntity);

    let limited = decode(&encode(&Error::rate_limited("x"))).unwrap();
    let too_many = decode(&encode(&Error::too_many_requests("x"))).unwrap();
    assert_eq!(limited.kind(), &ErrorKind::RateLimited);
    assert_eq!(too_many.kind(), &ErrorKind::TooManyRequests);
}

#[test]
fn disabled_uses_unavailable() {
    let status = encode(&Error::disabled("off"));
    assert_eq!(status.code, Code::Unavailable);
    assert_eq!(status.message, "wire:Unavailable: off");
}

#[test]
fn decoding_twice_is_stable() {
    let err = Error::conflict("a conflict");
    let once = decode(&encode(&err)).unwrap();
    let twice = decode(&encode(&once)).unwrap();
    assert_eq!(once.message(), twice.message());
    assert_eq!(twice, err);
}

#[test]
fn nul_framed_parts_decode_to_original_kind() {
    // Same framing as the decode fuzz target: code byte, message, NUL, details.
    let status = encode(&Error::conflict("x"));
    let mut frame = vec![status.code.as_i32() as u8];
    frame.extend_from_slice(status.message.as_bytes());
    frame.push(0);
    frame.extend_from_slice(&status.details_bytes());

    let (&code, rest) = frame.split_first().unwrap();
    let split = rest.iter().position(|b| *b == 0).unwrap();
    let (message, details) = rest.split_at(split);
    let details = details.get(1..).unwrap_or_default();
    let rebuilt = WireStatus::from_parts(
        Code::from_i32(i32::from(code)),
        String::from_utf8_lossy(message),
        details,
    );

    let err = decode(&rebuilt).unwrap();
    assert_eq!(err.kind(), &ErrorKind::Conflict);
    assert_eq!(err.message(), "wire:Aborted: x");
}
