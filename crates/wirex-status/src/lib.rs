// SPDX-License-Identifier: MIT OR Apache-2.0
//! RPC status codec for the `wirex` error taxonomy.
//!
//! [`encode`] turns an [`Error`] into a [`WireStatus`]: the kind's canonical
//! code, the fully formed message, and an [`ErrorDetails`] payload naming the
//! kind. [`decode`] reverses it. Because several kinds share a code, decode
//! trusts only a [`Subtype`] that belongs to the code's [`candidates`];
//! foreign or malformed statuses come back as `Internal` errors.
//!
//! ```
//! use wirex_status::{decode, encode};
//! use wirex_error::Error;
//!
//! let err = Error::too_many_requests("too much!");
//! let status = encode(&err);
//! assert_eq!(decode(&status), Some(err));
//! ```
//!
//! With the `tonic` feature, statuses convert to and from `tonic::Status`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
pub mod codec;
pub mod details;
#[cfg(feature = "tonic")]
pub mod grpc;
pub mod status;

pub use classify::{error_from_http, http_status_for};
pub use codec::{candidates, decode, encode};
pub use details::{DetailsError, ErrorDetails, Subtype};
#[cfg(feature = "tonic")]
pub use grpc::{decode_tonic, to_tonic};
pub use status::WireStatus;
pub use wirex_error::{Code, Error, ErrorKind};
