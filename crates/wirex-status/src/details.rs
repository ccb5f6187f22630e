// SPDX-License-Identifier: MIT OR Apache-2.0
//! The detail payload attached to every encoded status.

use serde::{Deserialize, Serialize};
use std::fmt;
use wirex_error::{Code, ErrorKind};

/// Discriminator naming which [`ErrorKind`] a status represents.
///
/// Tags serialise as `SCREAMING_SNAKE_CASE` strings and must not change:
/// peers running older builds decode them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Subtype {
    /// [`ErrorKind::Internal`].
    Internal,
    /// [`ErrorKind::BadRequest`].
    BadRequest,
    /// [`ErrorKind::RequiresProxyRequest`].
    RequiresProxyRequest,
    /// [`ErrorKind::RateLimited`].
    RateLimited,
    /// [`ErrorKind::Disabled`].
    Disabled,
    /// [`ErrorKind::Unimplemented`].
    Unimplemented,
    /// [`ErrorKind::UnprocessableEntity`].
    UnprocessableEntity,
    /// [`ErrorKind::Conflict`].
    Conflict,
    /// [`ErrorKind::TooManyRequests`].
    TooManyRequests,
}

impl Subtype {
    /// The tag for `kind`.
    pub fn of(kind: &ErrorKind) -> Self {
        match kind {
            ErrorKind::Internal => Self::Internal,
            ErrorKind::BadRequest => Self::BadRequest,
            ErrorKind::RequiresProxyRequest { .. } => Self::RequiresProxyRequest,
            ErrorKind::RateLimited => Self::RateLimited,
            ErrorKind::Disabled => Self::Disabled,
            ErrorKind::Unimplemented => Self::Unimplemented,
            ErrorKind::UnprocessableEntity => Self::UnprocessableEntity,
            ErrorKind::Conflict => Self::Conflict,
            ErrorKind::TooManyRequests => Self::TooManyRequests,
        }
    }

    /// Stable tag string (e.g. `"REQUIRES_PROXY_REQUEST"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "INTERNAL",
            Self::BadRequest => "BAD_REQUEST",
            Self::RequiresProxyRequest => "REQUIRES_PROXY_REQUEST",
            Self::RateLimited => "RATE_LIMITED",
            Self::Disabled => "DISABLED",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::Conflict => "CONFLICT",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
        }
    }

    /// Canonical code of the kind this tag names.
    pub fn code(&self) -> Code {
        self.to_kind(String::new()).code()
    }

    /// Build the kind this tag names. `reason` is kept only for
    /// [`Subtype::RequiresProxyRequest`].
    pub fn to_kind(self, reason: String) -> ErrorKind {
        match self {
            Self::Internal => ErrorKind::Internal,
            Self::BadRequest => ErrorKind::BadRequest,
            Self::RequiresProxyRequest => ErrorKind::RequiresProxyRequest { reason },
            Self::RateLimited => ErrorKind::RateLimited,
            Self::Disabled => ErrorKind::Disabled,
            Self::Unimplemented => ErrorKind::Unimplemented,
            Self::UnprocessableEntity => ErrorKind::UnprocessableEntity,
            Self::Conflict => ErrorKind::Conflict,
            Self::TooManyRequests => ErrorKind::TooManyRequests,
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while reading a detail payload off the wire.
#[derive(Debug, thiserror::Error)]
pub enum DetailsError {
    /// The bytes are not a detail payload this codec understands.
    #[error("malformed status details: {reason}")]
    Malformed {
        /// Parser diagnostic.
        reason: String,
    },
}

/// Structured payload carried next to the status code and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Which kind the status represents.
    pub subtype: Subtype,
    /// Proxy reason; empty unless `subtype` is `RequiresProxyRequest`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

impl ErrorDetails {
    /// Payload with an empty reason.
    pub fn new(subtype: Subtype) -> Self {
        Self {
            subtype,
            reason: String::new(),
        }
    }

    /// Payload describing `kind`.
    pub fn for_kind(kind: &ErrorKind) -> Self {
        let reason = match kind {
            ErrorKind::RequiresProxyRequest { reason } => reason.clone(),
            _ => String::new(),
        };
        Self {
            subtype: Subtype::of(kind),
            reason,
        }
    }

    /// Set the proxy reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// JSON bytes for byte-oriented transports.
    ///
    /// Never empty: encode relies on the payload always being present.
    pub fn to_bytes(&self) -> Vec<u8> {
        // A unit-variant enum and a `String` have no failing serializer path.
        serde_json::to_vec(self).expect("ErrorDetails serializes to JSON infallibly")
    }

    /// Parse bytes produced by [`ErrorDetails::to_bytes`].
    ///
    /// Empty input means "no details" and yields `Ok(None)`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Option<Self>, DetailsError> {
        if bytes.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(bytes)
            .map(Some)
            .map_err(|e| DetailsError::Malformed {
                reason: e.to_string(),
            })
    }
}
