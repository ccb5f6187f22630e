// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error ⇄ status conversion.
//!
//! Encoding always attaches a subtype discriminator. Decoding only trusts a
//! discriminator that belongs to the status code's candidate set; anything
//! else becomes an `Internal` error that keeps the original code and text.

use tracing::warn;
use wirex_error::{Code, Error, ErrorKind, MESSAGE_PREFIX};

use crate::details::{ErrorDetails, Subtype};
use crate::status::WireStatus;

/// Subtypes a status with `code` may carry. Empty for codes no kind uses.
pub fn candidates(code: Code) -> &'static [Subtype] {
    match code {
        Code::Internal => &[Subtype::Internal],
        Code::InvalidArgument => &[Subtype::BadRequest, Subtype::UnprocessableEntity],
        Code::NotFound => &[Subtype::RequiresProxyRequest],
        Code::ResourceExhausted => &[Subtype::RateLimited, Subtype::TooManyRequests],
        Code::Unavailable => &[Subtype::Disabled],
        Code::Unimplemented => &[Subtype::Unimplemented],
        Code::Aborted => &[Subtype::Conflict],
        _ => &[],
    }
}

/// Encode `err` as a status. Never fails.
///
/// The cause only survives as text inside the message.
pub fn encode(err: &Error) -> WireStatus {
    WireStatus {
        code: err.code(),
        message: err.message(),
        details: Some(ErrorDetails::for_kind(err.kind())),
    }
}

/// Decode a status back into an error.
///
/// Returns `None` for [`Code::Ok`]. A status whose details are missing or
/// name a kind that cannot use its code decodes to [`ErrorKind::Internal`].
pub fn decode(status: &WireStatus) -> Option<Error> {
    if status.code.is_ok() {
        return None;
    }

    let details = status
        .details
        .as_ref()
        .filter(|d| candidates(status.code).contains(&d.subtype));

    match details {
        Some(details) => {
            let kind = details.subtype.to_kind(details.reason.clone());
            Some(Error::rendered(kind, status.message.clone()))
        }
        None => {
            warn!(
                code = %status.code,
                subtype = ?status.details.as_ref().map(|d| d.subtype),
                "status has no usable subtype specifier, decoding as Internal"
            );
            Some(fallback(status))
        }
    }
}

fn fallback(status: &WireStatus) -> Error {
    let code = status.code;
    Error::rendered(
        ErrorKind::Internal,
        format!(
            "missing subtype specifier for {code}. {MESSAGE_PREFIX}{code}: {}",
            status.message
        ),
    )
}
