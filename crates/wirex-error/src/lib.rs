// SPDX-License-Identifier: MIT OR Apache-2.0
//! Closed error taxonomy shared by both sides of an RPC boundary.
//!
//! Every [`Error`] carries an [`ErrorKind`] (one of a fixed set of
//! variants), a human-readable message and an optional cause. Each kind
//! maps to exactly one canonical RPC status [`Code`]; several kinds share a
//! code, so the status codec in `wirex-status` carries an extra
//! discriminator to tell them apart.
//!
//! ```
//! use wirex_error::{Code, Error, ErrorKind};
//!
//! let err = Error::bad_request("bad request")
//!     .with_cause(std::io::Error::other("some bad request"));
//! assert_eq!(err.code(), Code::InvalidArgument);
//! assert_eq!(err.message(), "wire:InvalidArgument: bad request: some bad request");
//! assert!(matches!(err.kind(), ErrorKind::BadRequest));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Prefix every locally formatted message starts with.
pub const MESSAGE_PREFIX: &str = "wire:";

/// Shared, thread-safe handle to an underlying cause.
pub type Cause = Arc<dyn std::error::Error + Send + Sync>;

// ---------------------------------------------------------------------------
// Code
// ---------------------------------------------------------------------------

/// Standard RPC status code space.
///
/// Variant names are the canonical code names used in formatted messages
/// (see [`Code::as_str`]); discriminants are the numeric wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum Code {
    /// Not an error.
    #[serde(rename = "OK")]
    Ok = 0,
    /// The operation was cancelled by the caller.
    Cancelled = 1,
    /// Unknown error.
    Unknown = 2,
    /// The client specified an invalid argument.
    InvalidArgument = 3,
    /// The deadline expired before the operation could complete.
    DeadlineExceeded = 4,
    /// Some requested entity was not found.
    NotFound = 5,
    /// The entity a client attempted to create already exists.
    AlreadyExists = 6,
    /// The caller does not have permission.
    PermissionDenied = 7,
    /// Some resource has been exhausted.
    ResourceExhausted = 8,
    /// The system is not in a state required for the operation.
    FailedPrecondition = 9,
    /// The operation was aborted.
    Aborted = 10,
    /// The operation was attempted past the valid range.
    OutOfRange = 11,
    /// The operation is not implemented or supported.
    Unimplemented = 12,
    /// Internal error.
    Internal = 13,
    /// The service is currently unavailable.
    Unavailable = 14,
    /// Unrecoverable data loss or corruption.
    DataLoss = 15,
    /// The request lacks valid authentication credentials.
    Unauthenticated = 16,
}

impl Code {
    /// Canonical name of the code (e.g. `"InvalidArgument"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
            Self::InvalidArgument => "InvalidArgument",
            Self::DeadlineExceeded => "DeadlineExceeded",
            Self::NotFound => "NotFound",
            Self::AlreadyExists => "AlreadyExists",
            Self::PermissionDenied => "PermissionDenied",
            Self::ResourceExhausted => "ResourceExhausted",
            Self::FailedPrecondition => "FailedPrecondition",
            Self::Aborted => "Aborted",
            Self::OutOfRange => "OutOfRange",
            Self::Unimplemented => "Unimplemented",
            Self::Internal => "Internal",
            Self::Unavailable => "Unavailable",
            Self::DataLoss => "DataLoss",
            Self::Unauthenticated => "Unauthenticated",
        }
    }

    /// Convert a numeric wire value. Values outside the code space map to
    /// [`Code::Unknown`].
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Self::Ok,
            1 => Self::Cancelled,
            2 => Self::Unknown,
            3 => Self::InvalidArgument,
            4 => Self::DeadlineExceeded,
            5 => Self::NotFound,
            6 => Self::AlreadyExists,
            7 => Self::PermissionDenied,
            8 => Self::ResourceExhausted,
            9 => Self::FailedPrecondition,
            10 => Self::Aborted,
            11 => Self::OutOfRange,
            12 => Self::Unimplemented,
            13 => Self::Internal,
            14 => Self::Unavailable,
            15 => Self::DataLoss,
            16 => Self::Unauthenticated,
            _ => Self::Unknown,
        }
    }

    /// Numeric wire value.
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// `true` only for [`Code::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl From<i32> for Code {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// The closed set of application error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unexpected internal fault, or a status that could not be decoded.
    Internal,
    /// The client supplied invalid input.
    BadRequest,
    /// The operation must be retried through a different path.
    RequiresProxyRequest {
        /// Why the request has to be proxied. Survives the wire round trip.
        reason: String,
    },
    /// The caller is being rate limited and should back off.
    RateLimited,
    /// The feature or service is turned off.
    Disabled,
    /// The operation is not implemented.
    Unimplemented,
    /// The input was well-formed but semantically unusable.
    UnprocessableEntity,
    /// The operation conflicts with the current state.
    Conflict,
    /// The caller sent too many requests and should back off.
    TooManyRequests,
}

impl ErrorKind {
    /// Canonical status code this kind is transmitted with.
    pub fn code(&self) -> Code {
        match self {
            Self::Internal => Code::Internal,
            Self::BadRequest | Self::UnprocessableEntity => Code::InvalidArgument,
            Self::RequiresProxyRequest { .. } => Code::NotFound,
            Self::RateLimited | Self::TooManyRequests => Code::ResourceExhausted,
            Self::Disabled => Code::Unavailable,
            Self::Unimplemented => Code::Unimplemented,
            Self::Conflict => Code::Aborted,
        }
    }

    /// Variant name (e.g. `"RequiresProxyRequest"`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::BadRequest => "BadRequest",
            Self::RequiresProxyRequest { .. } => "RequiresProxyRequest",
            Self::RateLimited => "RateLimited",
            Self::Disabled => "Disabled",
            Self::Unimplemented => "Unimplemented",
            Self::UnprocessableEntity => "UnprocessableEntity",
            Self::Conflict => "Conflict",
            Self::TooManyRequests => "TooManyRequests",
        }
    }

    /// `true` for the kinds that ask the caller to back off.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited | Self::TooManyRequests)
    }

    /// `true` for the kinds caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest | Self::UnprocessableEntity | Self::Conflict
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// An application error of one [`ErrorKind`].
///
/// Errors built locally format their message lazily from the kind's code,
/// the message and the cause (see [`Error::message`]). Errors rebuilt from a
/// wire status via [`Error::rendered`] already hold the peer's fully formed
/// text and return it verbatim.
///
/// Equality is structural: two errors are equal when their kinds (including
/// any kind-specific fields) and their rendered messages are equal.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    cause: Option<Cause>,
    rendered: bool,
}

impl Error {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
            rendered: false,
        }
    }

    /// Rebuild an error from text that was already formatted by a peer.
    ///
    /// The result never carries a cause.
    pub fn rendered(kind: ErrorKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            message: text.into(),
            cause: None,
            rendered: true,
        }
    }

    /// [`ErrorKind::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// [`ErrorKind::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// [`ErrorKind::RequiresProxyRequest`] with its reason.
    pub fn requires_proxy_request(message: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::RequiresProxyRequest {
                reason: reason.into(),
            },
            message,
        )
    }

    /// [`ErrorKind::RateLimited`].
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    /// [`ErrorKind::Disabled`].
    pub fn disabled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Disabled, message)
    }

    /// [`ErrorKind::Unimplemented`].
    pub fn unimplemented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unimplemented, message)
    }

    /// [`ErrorKind::UnprocessableEntity`].
    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnprocessableEntity, message)
    }

    /// [`ErrorKind::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// [`ErrorKind::TooManyRequests`].
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TooManyRequests, message)
    }

    /// Attach an underlying cause. Its text is folded into [`Error::message`].
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// The error's kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Shorthand for `self.kind().code()`.
    pub fn code(&self) -> Code {
        self.kind.code()
    }

    /// The proxy reason, for [`ErrorKind::RequiresProxyRequest`] only.
    pub fn reason(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::RequiresProxyRequest { reason } => Some(reason),
            _ => None,
        }
    }

    /// The message as given at construction, before formatting.
    ///
    /// For an error built with [`Error::rendered`] this is the peer's fully
    /// formatted wire text.
    pub fn raw_message(&self) -> &str {
        &self.message
    }

    /// The underlying cause, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Fully formed message text.
    ///
    /// Empty when there is neither a message nor a cause; otherwise
    /// `wire:<Code>: <message>` followed by `: <cause>` when a cause is
    /// attached. Errors rebuilt with [`Error::rendered`] return their text
    /// unchanged.
    pub fn message(&self) -> String {
        if self.rendered {
            return self.message.clone();
        }
        if self.message.is_empty() && self.cause.is_none() {
            return String::new();
        }
        let mut out = format!("{MESSAGE_PREFIX}{}: {}", self.code(), self.message);
        if let Some(cause) = &self.cause {
            out.push_str(": ");
            out.push_str(&cause.to_string());
        }
        out
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, "")
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message() == other.message()
    }
}

impl Eq for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Error");
        d.field("kind", &self.kind);
        d.field("message", &self.message);
        if let Some(cause) = &self.cause {
            d.field("cause", &cause.to_string());
        }
        d.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
