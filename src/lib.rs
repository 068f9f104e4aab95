// SPDX-License-Identifier: MIT OR Apache-2.0
//! Run an external program to completion and get back its exit status and
//! decoded output.
//!
//! ```no_run
//! # async fn demo() -> Result<(), subproc::SubprocessError> {
//! use subproc::{Encoding, SubprocessRequest};
//!
//! let request = SubprocessRequest::new("git")
//!     .args(["status", "--short"])
//!     .encoding(Encoding::Utf8);
//! let result = subproc::run(&request).await?;
//! println!("exit {}: {}", result.termination_status(), result.standard_output());
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub use subproc_core::{
    Encoding, StreamKind, SubprocessError, SubprocessRequest, SubprocessResult, TerminationReason,
    decode,
};
pub use subproc_runner::{CapturedStream, StreamCollector, run};
pub use subproc_which::{default_search_path, resolve, which};
