// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error type for subprocess runs.

use std::path::PathBuf;
use thiserror::Error;

use crate::{Encoding, StreamKind};

/// The ways a subprocess run can fail.
///
/// A non-zero exit status is not one of them; it is reported through
/// [`SubprocessResult`](crate::SubprocessResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubprocessError {
    /// The command could not be launched: missing, not executable, or the
    /// OS refused to start it.
    #[error("command not found: {command} (search path: {search_path:?})")]
    CommandNotFound {
        /// The command exactly as the caller supplied it.
        command: String,
        /// The search path that was consulted.
        search_path: Vec<PathBuf>,
    },

    /// The child ran, but its captured output is not valid text in the
    /// requested encoding.
    #[error("failed to decode {stream} as {encoding} ({} bytes)", .bytes.len())]
    DecodeError {
        /// The raw bytes that failed to decode.
        bytes: Vec<u8>,
        /// The encoding that was requested.
        encoding: Encoding,
        /// Which stream the bytes were captured from.
        stream: StreamKind,
    },
}

impl SubprocessError {
    /// Stable machine-readable tag for this error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::CommandNotFound { .. } => "COMMAND_NOT_FOUND",
            Self::DecodeError { .. } => "DECODE_ERROR",
        }
    }

    /// Raw captured bytes, for decode failures.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::DecodeError { bytes, .. } => Some(bytes),
            Self::CommandNotFound { .. } => None,
        }
    }

    /// Consume the error and recover the raw captured bytes, for decode failures.
    #[must_use]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::DecodeError { bytes, .. } => Some(bytes),
            Self::CommandNotFound { .. } => None,
        }
    }
}
