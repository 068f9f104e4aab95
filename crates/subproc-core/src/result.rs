// SPDX-License-Identifier: MIT OR Apache-2.0
//! The outcome of a completed subprocess run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Why the child stopped running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The child exited on its own; the status is its exit code.
    #[default]
    Exit,
    /// The child was terminated by a signal; the status is the signal number.
    UncaughtSignal,
}

/// Status and decoded output of a child that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubprocessResult {
    termination_status: i32,
    #[serde(default)]
    termination_reason: TerminationReason,
    standard_output: String,
    standard_error: String,
}

impl SubprocessResult {
    /// Assemble a result from an exit status and decoded streams.
    pub fn new(
        termination_status: i32,
        termination_reason: TerminationReason,
        standard_output: String,
        standard_error: String,
    ) -> Self {
        Self {
            termination_status,
            termination_reason,
            standard_output,
            standard_error,
        }
    }

    /// Shortcut for `termination_status() == 0`.
    #[must_use]
    pub fn success(&self) -> bool {
        self.termination_status == 0
    }

    /// Exit code, or the signal number when [`termination_reason`](Self::termination_reason)
    /// is [`TerminationReason::UncaughtSignal`].
    pub fn termination_status(&self) -> i32 {
        self.termination_status
    }

    /// How the child stopped.
    pub fn termination_reason(&self) -> TerminationReason {
        self.termination_reason
    }

    /// Decoded standard output.
    pub fn standard_output(&self) -> &str {
        &self.standard_output
    }

    /// Decoded standard error.
    pub fn standard_error(&self) -> &str {
        &self.standard_error
    }

    /// Split into `(standard_output, standard_error)`.
    pub fn into_output(self) -> (String, String) {
        (self.standard_output, self.standard_error)
    }
}
