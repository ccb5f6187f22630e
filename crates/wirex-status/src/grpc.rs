// SPDX-License-Identifier: MIT OR Apache-2.0
//! Conversions to and from `tonic::Status`.
//!
//! The detail payload travels in the status `details` bytes.

use bytes::Bytes;
use wirex_error::{Code, Error};

use crate::codec;
use crate::status::WireStatus;

impl From<WireStatus> for tonic::Status {
    fn from(status: WireStatus) -> Self {
        let details = Bytes::from(status.details_bytes());
        tonic::Status::with_details(
            tonic::Code::from(status.code.as_i32()),
            status.message,
            details,
        )
    }
}

impl From<&tonic::Status> for WireStatus {
    fn from(status: &tonic::Status) -> Self {
        WireStatus::from_parts(
            Code::from_i32(status.code() as i32),
            status.message(),
            status.details(),
        )
    }
}

/// Encode `err` straight into a `tonic::Status`.
pub fn to_tonic(err: &Error) -> tonic::Status {
    codec::encode(err).into()
}

/// Decode a `tonic::Status` received from a peer.
pub fn decode_tonic(status: &tonic::Status) -> Option<Error> {
    codec::decode(&WireStatus::from(status))
}
