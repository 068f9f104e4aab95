// SPDX-License-Identifier: MIT OR Apache-2.0
//! Low-level process spawning, stream wiring, and exit collection.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use subproc_core::{StreamKind, SubprocessError, SubprocessRequest, TerminationReason};
use subproc_which::{default_search_path, has_path_components, resolve};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::collector::{CapturedStream, StreamCollector};

/// Exit information and frozen output of a finished child, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    /// Exit code, or signal number for [`TerminationReason::UncaughtSignal`].
    pub status: i32,
    /// How the child stopped.
    pub reason: TerminationReason,
    /// Everything written to stdout.
    pub stdout: CapturedStream,
    /// Everything written to stderr.
    pub stderr: CapturedStream,
}

/// A spawned child whose stdout and stderr are already being drained.
#[derive(Debug)]
pub struct RunningProcess {
    child: Child,
    stdout: StreamCollector,
    stderr: StreamCollector,
}

impl RunningProcess {
    /// Spawn `launch_path` with `args`, stdout and stderr piped, stdin closed,
    /// and `cwd` applied to the child only.
    ///
    /// Both collectors are attached before this returns.
    pub fn spawn(launch_path: &Path, args: &[String], cwd: Option<&Path>) -> io::Result<Self> {
        let mut cmd = Command::new(launch_path);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }

        let mut child = cmd.spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("stdout unavailable"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("stderr unavailable"))?;

        Ok(Self {
            child,
            stdout: StreamCollector::attach(StreamKind::Stdout, stdout),
            stderr: StreamCollector::attach(StreamKind::Stderr, stderr),
        })
    }

    /// OS process id, while the child has not been reaped.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Wait for the child to exit and for both pipes to reach end-of-stream.
    ///
    /// Exit alone is not enough: bytes can still be in flight in the pipes,
    /// so the output is only final once each collector has seen EOF.
    pub async fn wait(self) -> io::Result<RawOutput> {
        let Self {
            mut child,
            stdout,
            stderr,
        } = self;

        let (status, stdout, stderr) = tokio::join!(child.wait(), stdout.finish(), stderr.finish());
        let (status, reason) = termination(status?);

        Ok(RawOutput {
            status,
            reason,
            stdout,
            stderr,
        })
    }
}

fn termination(status: ExitStatus) -> (i32, TerminationReason) {
    if let Some(code) = status.code() {
        return (code, TerminationReason::Exit);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return (signal, TerminationReason::UncaughtSignal);
        }
    }

    // Stopped or continued: neither an exit code nor a terminating signal.
    (-1, TerminationReason::Exit)
}

/// Resolves, launches, and waits for the child described by a request.
#[derive(Debug, Clone)]
pub struct ProcessRunner<'a> {
    request: &'a SubprocessRequest,
    search_path: Vec<PathBuf>,
}

impl<'a> ProcessRunner<'a> {
    /// Prepare to run `request`, reading `PATH` now if the request has no
    /// explicit search path.
    pub fn new(request: &'a SubprocessRequest) -> Self {
        let search_path = match request.explicit_search_path() {
            Some(dirs) => dirs.to_vec(),
            None => default_search_path(),
        };
        Self {
            request,
            search_path,
        }
    }

    /// The search path this runner resolves against.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// The path handed to the OS, or `None` for a bare name that no search
    /// path entry provides.
    ///
    /// An unresolved bare name is never spawned: neither the working
    /// directory nor the inherited `PATH` may stand in for the search path.
    pub fn launch_path(&self) -> Option<PathBuf> {
        let command = self.request.command();
        let resolved = resolve(command, &self.search_path);
        if has_path_components(command) || resolved != Path::new(command) {
            Some(resolved)
        } else {
            None
        }
    }

    /// Launch the child and collect its raw output.
    ///
    /// # Errors
    ///
    /// [`SubprocessError::CommandNotFound`] if the command does not resolve,
    /// or the child cannot be launched or waited on. A non-zero exit is not
    /// an error.
    pub async fn execute(&self) -> Result<RawOutput, SubprocessError> {
        let Some(launch_path) = self.launch_path() else {
            return Err(self.not_found(None, &"not on search path"));
        };
        debug!(
            target: "subproc.runner",
            command = %self.request.command(),
            launch_path = %launch_path.display(),
            args = self.request.arguments().len(),
            "spawning"
        );

        let process = RunningProcess::spawn(
            &launch_path,
            self.request.arguments(),
            self.request.working_dir(),
        )
        .map_err(|err| self.not_found(Some(launch_path.as_path()), &err))?;

        let pid = process.id();
        let raw = process
            .wait()
            .await
            .map_err(|err| self.not_found(Some(launch_path.as_path()), &err))?;

        debug!(
            target: "subproc.runner",
            pid = ?pid,
            status = raw.status,
            reason = ?raw.reason,
            stdout_bytes = raw.stdout.len(),
            stderr_bytes = raw.stderr.len(),
            "child exited"
        );
        Ok(raw)
    }

    fn not_found(
        &self,
        launch_path: Option<&Path>,
        err: &dyn std::fmt::Display,
    ) -> SubprocessError {
        warn!(
            target: "subproc.runner",
            command = %self.request.command(),
            launch_path = ?launch_path,
            error = %err,
            "launch failed"
        );
        SubprocessError::CommandNotFound {
            command: self.request.command().to_owned(),
            search_path: self.search_path.clone(),
        }
    }
}
