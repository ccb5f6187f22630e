// SPDX-License-Identifier: MIT OR Apache-2.0
//! The status value that crosses the RPC boundary.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wirex_error::{Code, Error};

use crate::codec;
use crate::details::ErrorDetails;

/// Code, fully formed message and optional detail payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStatus {
    /// Status code.
    pub code: Code,
    /// Fully formed message text.
    #[serde(default)]
    pub message: String,
    /// Discriminator payload; always present on statuses built by [`codec::encode`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl WireStatus {
    /// Status without details.
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// The success status.
    pub fn ok() -> Self {
        Self::new(Code::Ok, "")
    }

    /// Attach a detail payload.
    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Rebuild a status from transport parts.
    ///
    /// Detail bytes that cannot be parsed are dropped, so the status decodes
    /// through the fallback path.
    pub fn from_parts(code: Code, message: impl Into<String>, details: &[u8]) -> Self {
        let details = match ErrorDetails::from_bytes(details) {
            Ok(details) => details,
            Err(err) => {
                debug!(code = %code, error = %err, "ignoring undecodable status details");
                None
            }
        };
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    /// Detail payload as bytes; empty when there are no details.
    pub fn details_bytes(&self) -> Vec<u8> {
        self.details
            .as_ref()
            .map(ErrorDetails::to_bytes)
            .unwrap_or_default()
    }

    /// `true` when the code is [`Code::Ok`].
    pub fn is_ok(&self) -> bool {
        self.code.is_ok()
    }

    /// Shorthand for [`codec::decode`].
    pub fn to_error(&self) -> Option<Error> {
        codec::decode(self)
    }
}

impl From<&Error> for WireStatus {
    fn from(err: &Error) -> Self {
        codec::encode(err)
    }
}

impl From<Error> for WireStatus {
    fn from(err: Error) -> Self {
        codec::encode(&err)
    }
}
