// SPDX-License-Identifier: MIT OR Apache-2.0
//! Microcrate for resolving command names against a search path.
//!
//! Resolution follows the rule a shell uses for `PATH` lookup: a command that
//! carries any path structure is used verbatim, a bare name is searched
//! left-to-right through the supplied directories. Failing to find a bare
//! name is not an error here; the name comes back unchanged and the spawn
//! step decides whether it can be launched.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Resolve `command` to a launch path using `search_path`.
///
/// * Commands with path structure (`./foo`, `/usr/bin/foo`, `bin/foo`) are
///   returned unchanged without touching the filesystem.
/// * Bare names resolve to the first `dir/command` that is an executable
///   file, in search-path order.
/// * Bare names with no match are returned unchanged.
pub fn resolve<P: AsRef<Path>>(command: &str, search_path: &[P]) -> PathBuf {
    if has_path_components(command) {
        return PathBuf::from(command);
    }

    search_path
        .iter()
        .find_map(|dir| resolve_in_dir(dir.as_ref(), command))
        .unwrap_or_else(|| PathBuf::from(command))
}

/// Locate an executable by name against the inherited `PATH`, similarly to
/// shell `which`.
///
/// Unlike [`resolve`], this returns `None` when nothing executable was found.
pub fn which(command: &str) -> Option<PathBuf> {
    if has_path_components(command) {
        let candidate = Path::new(command);
        return is_executable_file(candidate).then(|| candidate.to_path_buf());
    }

    default_search_path()
        .iter()
        .find_map(|dir| resolve_in_dir(dir, command))
}

/// Return `true` when an executable can be resolved from `PATH` or an explicit path.
pub fn command_exists(command: &str) -> bool {
    which(command).is_some()
}

/// Split the inherited `PATH` into its directories.
///
/// Empty entries are dropped. An unset `PATH` yields an empty list.
pub fn default_search_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|raw| split_search_path(&raw))
        .unwrap_or_default()
}

/// Split a `PATH`-style value on the platform separator, dropping empty entries.
pub fn split_search_path(raw: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(raw)
        .filter(|dir| !dir.as_os_str().is_empty())
        .collect()
}

/// `true` when `command` names a path rather than a bare program name.
///
/// That is the case when it has more than one component, or when it contains
/// a separator anywhere (a trailing `foo/` still counts).
pub fn has_path_components(command: &str) -> bool {
    Path::new(command).components().count() > 1 || command.chars().any(std::path::is_separator)
}

/// `true` when `path` is a regular file the current user may execute.
#[cfg(unix)]
pub fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// `true` when `path` is a regular file the current user may execute.
#[cfg(not(unix))]
pub fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

fn resolve_in_dir(dir: &Path, command: &str) -> Option<PathBuf> {
    let direct = dir.join(command);
    if is_executable_file(&direct) {
        trace!(target: "subproc.which", candidate = %direct.display(), "resolved");
        return Some(direct);
    }

    if !cfg!(windows) {
        return None;
    }

    [".exe", ".cmd", ".bat", ".com"]
        .into_iter()
        .map(|ext| dir.join(format!("{command}{ext}")))
        .find(|candidate| is_executable_file(candidate))
}
