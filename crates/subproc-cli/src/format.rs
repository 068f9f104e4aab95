// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output formatting for run results and errors.

use serde::Serialize;
use serde_json::{Value, json};
use subproc_core::{SubprocessError, SubprocessResult};

/// Supported output formats for `subproc run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Child output passed through verbatim.
    Text,
    /// Pretty-printed JSON document on stdout.
    Json,
}

/// Serialisable view of a [`SubprocessError`].
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    /// Stable error code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Variant-specific details.
    pub details: Value,
}

impl From<&SubprocessError> for ErrorReport {
    fn from(err: &SubprocessError) -> Self {
        let details = match err {
            SubprocessError::CommandNotFound {
                command,
                search_path,
            } => json!({
                "command": command,
                "search_path": search_path,
            }),
            SubprocessError::DecodeError {
                bytes,
                encoding,
                stream,
            } => json!({
                "stream": stream,
                "encoding": encoding,
                "byte_count": bytes.len(),
            }),
        };
        Self {
            code: err.code(),
            message: err.to_string(),
            details,
        }
    }
}

/// Render a successful result as a JSON document.
pub fn result_json(result: &SubprocessResult) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(result)?;
    if let Value::Object(map) = &mut value {
        map.insert("success".into(), Value::Bool(result.success()));
    }
    serde_json::to_string_pretty(&value)
}

/// Render an error as a JSON document.
pub fn error_json(err: &SubprocessError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({ "error": ErrorReport::from(err) }))
}

/// Process exit code the CLI uses for a library error.
pub fn error_exit_code(err: &SubprocessError) -> u8 {
    match err {
        SubprocessError::CommandNotFound { .. } => 127,
        SubprocessError::DecodeError { .. } => 1,
    }
}

/// Process exit code mirroring a finished child.
///
/// Exit codes outside `0..=255` collapse to 1; signals follow the shell
/// convention of `128 + signal`.
pub fn result_exit_code(result: &SubprocessResult) -> u8 {
    let status = match result.termination_reason() {
        subproc_core::TerminationReason::Exit => result.termination_status(),
        subproc_core::TerminationReason::UncaughtSignal => 128 + result.termination_status(),
    };
    u8::try_from(status).unwrap_or(1)
}
