// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz command resolution against a fixed search path.
//!
//! Verifies:
//! 1. `resolve` never panics on arbitrary command text.
//! 2. Commands with path structure come back unchanged.
//! 3. Bare names come back unchanged or as `dir/name` for a listed dir.
#![no_main]
use libfuzzer_sys::fuzz_target;
use std::path::{Path, PathBuf};

fuzz_target!(|data: &[u8]| {
    let Ok(command) = std::str::from_utf8(data) else {
        return;
    };
    if command.contains('\0') {
        return;
    }

    let search = [PathBuf::from("/usr/bin"), PathBuf::from("/bin")];
    let resolved = subproc_which::resolve(command, &search);

    if subproc_which::has_path_components(command) {
        assert_eq!(resolved, Path::new(command));
    } else if resolved != Path::new(command) {
        assert!(
            search.iter().any(|dir| resolved == dir.join(command)),
            "resolved outside search path: {}",
            resolved.display()
        );
    }
});
