// SPDX-License-Identifier: MIT OR Apache-2.0
//! What to run and how.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Encoding;

/// Description of a single subprocess run.
///
/// Built once through the consuming builder methods and then only read.
///
/// ```
/// use subproc_core::{Encoding, SubprocessRequest};
///
/// let req = SubprocessRequest::new("ls")
///     .arg("-l")
///     .search_path(["/usr/bin", "/bin"])
///     .working_directory("/tmp")
///     .encoding(Encoding::Utf8);
/// assert_eq!(req.command(), "ls");
/// assert_eq!(req.arguments(), ["-l"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubprocessRequest {
    command: String,
    #[serde(default)]
    arguments: Vec<String>,
    /// `None` means the inherited `PATH`, read when the request runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search_path: Option<Vec<PathBuf>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    working_directory: Option<PathBuf>,
    #[serde(default)]
    encoding: Encoding,
}

impl SubprocessRequest {
    /// A request for `command` with no arguments, the inherited search path,
    /// the current working directory, and UTF-8 output.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            arguments: Vec::new(),
            search_path: None,
            working_directory: None,
            encoding: Encoding::default(),
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    /// Append several arguments, in order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    /// Use an explicit search path instead of the inherited `PATH`.
    ///
    /// An empty list is honoured: bare names then never resolve.
    #[must_use]
    pub fn search_path<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_path = Some(dirs.into_iter().map(Into::into).collect());
        self
    }

    /// Run the child in `dir`. The caller's own working directory is untouched.
    #[must_use]
    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Decode captured output with `encoding`.
    #[must_use]
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The command name or path as supplied.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Arguments passed to the child, in order.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The explicit search path, if one was set.
    pub fn explicit_search_path(&self) -> Option<&[PathBuf]> {
        self.search_path.as_deref()
    }

    /// Working directory override for the child.
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    /// Encoding used to decode both captured streams.
    pub fn output_encoding(&self) -> Encoding {
        self.encoding
    }
}
