// SPDX-License-Identifier: MIT OR Apache-2.0
//! Classification of HTTP responses for peers that speak HTTP instead of RPC.

use http::StatusCode;
use wirex_error::{Error, ErrorKind};

/// Classify a response from an HTTP upstream.
///
/// Informational, success and redirect statuses are not errors. `429` maps
/// to [`ErrorKind::RateLimited`] so callers back off the same way they do
/// for a decoded RPC status.
pub fn error_from_http(status: StatusCode, body: &str) -> Option<Error> {
    if !(status.is_client_error() || status.is_server_error()) {
        return None;
    }

    let body = body.trim();
    let message = if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    };

    let err = match status {
        StatusCode::BAD_REQUEST => Error::bad_request(message),
        StatusCode::CONFLICT => Error::conflict(message),
        StatusCode::UNPROCESSABLE_ENTITY => Error::unprocessable_entity(message),
        StatusCode::TOO_MANY_REQUESTS => Error::rate_limited(message),
        StatusCode::NOT_IMPLEMENTED => Error::unimplemented(message),
        _ => Error::internal(message),
    };
    Some(err)
}

/// HTTP status a proxy answers with for `kind`.
pub fn http_status_for(kind: &ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::RequiresProxyRequest { .. } => StatusCode::NOT_FOUND,
        ErrorKind::RateLimited | ErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Disabled => StatusCode::SERVICE_UNAVAILABLE,
    }
}
