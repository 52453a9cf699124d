// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Running a batch solver process against an input file.
//!
//! The solvers are non-interactive: they read formulas from the file named
//! by `-f`, write everything to stdout/stderr, and exit. The only blocking
//! point in a request is the child process itself, which is bounded by a
//! wall-clock deadline enforced here.

use crate::input::InputArtifact;
use std::{
    io::{self, Read},
    path::Path,
    process::{Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

/// How often the deadline loop polls the child for exit.
const WAIT_TICK: Duration = Duration::from_millis(10);

/// What came back from one solver invocation.
#[derive(Debug)]
pub enum RunResult {
    /// The solver ran to completion within the deadline.
    Completed {
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
        /// The child's exit status.
        status: ExitStatus,
    },
    /// The deadline expired and the solver was killed. Deliberately not an
    /// error: a timeout means "inconclusive, possibly just slow".
    TimedOut,
}

/// The seam between the solver façades and the operating system. Tests
/// substitute a runner that returns canned solver output.
///
/// A runner takes the input artifact by value: however the invocation ends,
/// the artifact (and with it the on-disk file) dies with the call.
pub trait Runner {
    /// Run `exe` against `input`, bounded by `timeout`.
    fn run(&self, exe: &Path, input: InputArtifact, timeout: Duration) -> io::Result<RunResult>;
}

/// The real thing: spawns `exe -f <input>` as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRunner;

impl Runner for OsRunner {
    fn run(&self, exe: &Path, input: InputArtifact, timeout: Duration) -> io::Result<RunResult> {
        let result = run_solver(exe, input.path(), timeout);
        // dropping the artifact deletes the input file before we report
        drop(input);
        result
    }
}

/// Invoke `exe -f input` with the working directory pinned to the binary's
/// own directory (the LADR tools expect sibling support files there).
/// Returns the captured output, or [`RunResult::TimedOut`] if the deadline
/// expired and the child had to be killed. Spawn failures surface as the
/// `io::Error`; callers fold them into an error outcome.
pub fn run_solver(exe: &Path, input: &Path, timeout: Duration) -> io::Result<RunResult> {
    let mut cmd = Command::new(exe);
    cmd.arg("-f")
        .arg(input)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = exe.parent().filter(|p| !p.as_os_str().is_empty()) {
        cmd.current_dir(dir);
    }

    log::debug!("running {} -f {}", exe.display(), input.display());
    let start = Instant::now();
    let mut child = cmd.spawn()?;

    // drain both pipes on their own threads so a chatty solver can't fill a
    // pipe buffer and wedge against the wait loop below
    let stdout = reader_thread(child.stdout.take());
    let stderr = reader_thread(child.stderr.take());

    let deadline = start + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            _ = child.kill();
            _ = child.wait();
            _ = stdout.join();
            _ = stderr.join();
            log::debug!(
                "{} killed after exceeding {}s deadline",
                exe.display(),
                timeout.as_secs()
            );
            return Ok(RunResult::TimedOut);
        }
        thread::sleep(WAIT_TICK);
    };

    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();
    log::debug!(
        "{} exited with {status} after {}ms ({} bytes stdout, {} bytes stderr)",
        exe.display(),
        start.elapsed().as_millis(),
        stdout.len(),
        stderr.len()
    );
    Ok(RunResult::Completed {
        stdout,
        stderr,
        status,
    })
}

fn reader_thread<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}

#[cfg(test)]
mod tests {
    use super::{run_solver, OsRunner, RunResult, Runner};
    use crate::input::write_input;
    use eyre::Context;
    use std::{env, fs, path::PathBuf, process, time::Duration};

    #[cfg(unix)]
    fn fake_solver(name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = env::temp_dir().join(format!("ladr-test-{name}-{}", process::id()));
        fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_completed_run_captures_output_and_cleans_up() {
        let exe = fake_solver("echo", "echo THEOREM PROVED; echo oops >&2");
        let input = write_input("formulas(assumptions).\nend_of_list.\n").unwrap();
        let input_path = input.path().to_path_buf();

        let result = OsRunner
            .run(&exe, input, Duration::from_secs(5))
            .wrap_err("running fake solver")
            .unwrap();
        match result {
            RunResult::Completed { stdout, stderr, .. } => {
                assert!(stdout.contains("THEOREM PROVED"));
                assert!(stderr.contains("oops"));
            }
            RunResult::TimedOut => panic!("fake solver should not time out"),
        }
        assert!(!input_path.exists(), "input artifact must be deleted");
        fs::remove_file(&exe).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_solver_and_cleans_up() {
        let exe = fake_solver("sleep", "sleep 10");
        let input = write_input("x").unwrap();
        let input_path = input.path().to_path_buf();

        let result = OsRunner
            .run(&exe, input, Duration::from_millis(100))
            .unwrap();
        assert!(matches!(result, RunResult::TimedOut));
        assert!(!input_path.exists(), "input artifact must be deleted");
        fs::remove_file(&exe).unwrap();
    }

    #[test]
    fn test_spawn_failure_still_cleans_up() {
        let exe = env::temp_dir().join("ladr-test-no-such-binary");
        let input = write_input("x").unwrap();
        let input_path = input.path().to_path_buf();

        let result = OsRunner.run(&exe, input, Duration::from_secs(1));
        assert!(result.is_err());
        assert!(!input_path.exists(), "input artifact must be deleted");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_solver_passes_input_via_flag() {
        let exe = fake_solver("cat", r#"cat "$2""#);
        let input = write_input("formulas(assumptions).\nP(a).\nend_of_list.").unwrap();

        let result = run_solver(&exe, input.path(), Duration::from_secs(5)).unwrap();
        match result {
            RunResult::Completed { stdout, status, .. } => {
                assert!(status.success());
                assert!(stdout.contains("P(a)."));
            }
            RunResult::TimedOut => panic!("cat should not time out"),
        }
    }
}
