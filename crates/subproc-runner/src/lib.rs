// SPDX-License-Identifier: MIT OR Apache-2.0
//! subproc-runner
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Launches a child process for a [`SubprocessRequest`], drains its stdout
//! and stderr on dedicated tasks while it runs, waits for it to exit, and
//! decodes what it wrote.
//!
//! Draining starts the moment the child is spawned, so a child that writes
//! more than a pipe buffer's worth of output never blocks on a parent that is
//! only waiting for it to exit.

pub mod collector;
pub mod run;
pub mod runner;

pub use collector::{CapturedStream, StreamCollector};
pub use run::run;
pub use runner::{ProcessRunner, RawOutput, RunningProcess};

pub use subproc_core::{
    Encoding, StreamKind, SubprocessError, SubprocessRequest, SubprocessResult, TerminationReason,
};
