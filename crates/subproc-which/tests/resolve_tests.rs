// SPDX-License-Identifier: MIT OR Apache-2.0
//! Filesystem-backed resolution tests for `subproc-which`.
#![cfg(unix)]

use proptest::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use subproc_which::{is_executable_file, resolve};
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────────

fn write_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
    path
}

fn executable(dir: &Path, name: &str) -> PathBuf {
    write_file(dir, name, 0o755)
}

// ── Search order ────────────────────────────────────────────────────────

#[test]
fn first_directory_with_executable_wins() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let in_a = executable(a.path(), "tool");
    executable(b.path(), "tool");

    assert_eq!(resolve("tool", &[a.path(), b.path()]), in_a);
}

#[test]
fn later_directory_used_when_earlier_lacks_command() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let in_b = executable(b.path(), "tool");

    assert_eq!(resolve("tool", &[a.path(), b.path()]), in_b);
}

#[test]
fn non_executable_file_is_skipped() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write_file(a.path(), "tool", 0o644);
    let in_b = executable(b.path(), "tool");

    assert!(!is_executable_file(&a.path().join("tool")));
    assert_eq!(resolve("tool", &[a.path(), b.path()]), in_b);
}

#[test]
fn directory_with_command_name_is_skipped() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    std::fs::create_dir(a.path().join("tool")).unwrap();
    let in_b = executable(b.path(), "tool");

    assert_eq!(resolve("tool", &[a.path(), b.path()]), in_b);
}

#[test]
fn missing_everywhere_returns_bare_name() {
    let a = TempDir::new().unwrap();
    assert_eq!(resolve("tool", &[a.path()]), PathBuf::from("tool"));
}

#[test]
fn nonexistent_search_directory_is_ignored() {
    let b = TempDir::new().unwrap();
    let in_b = executable(b.path(), "tool");
    let missing = b.path().join("missing-dir");

    assert_eq!(resolve("tool", &[missing.as_path(), b.path()]), in_b);
}

// ── Explicit paths ──────────────────────────────────────────────────────

#[test]
fn absolute_path_ignores_search_path() {
    let a = TempDir::new().unwrap();
    executable(a.path(), "tool");

    assert_eq!(
        resolve("/opt/elsewhere/tool", &[a.path()]),
        PathBuf::from("/opt/elsewhere/tool")
    );
}

#[test]
fn relative_path_ignores_search_path() {
    let a = TempDir::new().unwrap();
    executable(a.path(), "tool");

    assert_eq!(resolve("./tool", &[a.path()]), PathBuf::from("./tool"));
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Resolution picks the first directory, in list order, holding the command.
    #[test]
    fn resolves_to_first_holding_directory(
        name in "[a-z][a-z0-9_-]{0,12}",
        present in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        let dirs: Vec<TempDir> = present.iter().map(|_| TempDir::new().unwrap()).collect();
        for (dir, has) in dirs.iter().zip(&present) {
            if *has {
                executable(dir.path(), &name);
            }
        }
        let search: Vec<&Path> = dirs.iter().map(TempDir::path).collect();

        let expected = present
            .iter()
            .position(|has| *has)
            .map(|idx| dirs[idx].path().join(&name))
            .unwrap_or_else(|| PathBuf::from(&name));

        prop_assert_eq!(resolve(&name, &search), expected);
    }

    /// Anything containing a separator resolves to itself.
    #[test]
    fn explicit_paths_are_identity(
        prefix in "(/|\\./|[a-z]{1,5}/)",
        rest in "[a-z0-9_-][a-z0-9_.-]{0,15}",
    ) {
        let dir = TempDir::new().unwrap();
        executable(dir.path(), &rest);
        let command = format!("{prefix}{rest}");

        prop_assert_eq!(resolve(&command, &[dir.path()]), PathBuf::from(&command));
    }
}
