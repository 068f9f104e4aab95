// SPDX-License-Identifier: MIT OR Apache-2.0
//! subproc-core
//!
//! The data model for running a subprocess: what to run
//! ([`SubprocessRequest`]), what came back ([`SubprocessResult`]), how the
//! captured bytes become text ([`Encoding`], [`decode`]), and the two ways a
//! run can fail ([`SubprocessError`]).
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod encoding;
pub mod error;
pub mod request;
pub mod result;
pub mod stream;

pub use encoding::{Encoding, decode};
pub use error::SubprocessError;
pub use request::SubprocessRequest;
pub use result::{SubprocessResult, TerminationReason};
pub use stream::StreamKind;
