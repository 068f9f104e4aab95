// SPDX-License-Identifier: MIT OR Apache-2.0
//! The `run` entry point.

use subproc_core::{SubprocessError, SubprocessRequest, SubprocessResult};

use crate::runner::ProcessRunner;

/// Run the command described by `request` to completion and decode its output.
///
/// Stdout is decoded before stderr, and the first failure is returned. Either
/// a complete [`SubprocessResult`] comes back or exactly one error does.
///
/// # Errors
///
/// * [`SubprocessError::CommandNotFound`] when the child cannot be launched.
/// * [`SubprocessError::DecodeError`] when either stream is not valid text in
///   the requested encoding.
///
/// ```no_run
/// # async fn demo() -> Result<(), subproc_core::SubprocessError> {
/// use subproc_core::SubprocessRequest;
///
/// let result = subproc_runner::run(&SubprocessRequest::new("ls").arg("-l")).await?;
/// if result.success() {
///     print!("{}", result.standard_output());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run(request: &SubprocessRequest) -> Result<SubprocessResult, SubprocessError> {
    let raw = ProcessRunner::new(request).execute().await?;

    let encoding = request.output_encoding();
    let standard_output = raw.stdout.decode(encoding)?;
    let standard_error = raw.stderr.decode(encoding)?;

    Ok(SubprocessResult::new(
        raw.status,
        raw.reason,
        standard_output,
        standard_error,
    ))
}
