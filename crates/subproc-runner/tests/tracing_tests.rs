// SPDX-License-Identifier: MIT OR Apache-2.0
//! Verifies the structured tracing output emitted around a run.
#![cfg(unix)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use subproc_runner::{SubprocessRequest, run};
use tracing_subscriber::fmt::MakeWriter;

// ---------------------------------------------------------------------------
// Capturing infrastructure
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;
    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

fn capturing_subscriber() -> (tracing::subscriber::DefaultGuard, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (guard, logs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "current_thread")]
async fn successful_run_logs_spawn_and_exit() {
    let (_guard, logs) = capturing_subscriber();
    run(&SubprocessRequest::new("/bin/sh").args(["-c", "echo hi"]))
        .await
        .unwrap();

    let out = logs.contents();
    assert!(out.contains("spawning"), "missing spawn event:\n{out}");
    assert!(out.contains("child exited"), "missing exit event:\n{out}");
    assert!(out.contains("stdout_bytes=3"), "missing byte count:\n{out}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_launch_logs_warning_with_command() {
    let (_guard, logs) = capturing_subscriber();
    let _ = run(&SubprocessRequest::new("no-such-subproc-tool").search_path(Vec::<PathBuf>::new()))
        .await;

    let out = logs.contents();
    assert!(out.contains("launch failed"), "missing warning:\n{out}");
    assert!(out.contains("no-such-subproc-tool"), "missing command:\n{out}");
}
