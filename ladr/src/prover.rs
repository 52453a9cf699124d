// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! High-level interface to the Prover9 resolution theorem prover.

use crate::conf::{find_solver, LadrError};
use crate::input;
use crate::outcome::{classify_prover, Outcome};
use crate::proc::{OsRunner, RunResult, Runner};
use fol::syntax::Formula;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Short limit for [`Prover::check_syntax`]: a syntax error surfaces
/// immediately, so there is no point waiting out a real proof search.
const SYNTAX_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to a Prover9 binary.
///
/// Construction probes for the binary and fails fast; after that, every
/// request is a self-contained build-input/run/classify round trip and
/// always produces an [`Outcome`], never a propagated error.
#[derive(Debug)]
pub struct Prover<R = OsRunner> {
    exe: PathBuf,
    runner: R,
}

impl Prover<OsRunner> {
    /// Locate `prover9` under `dir`.
    pub fn new(dir: &Path) -> Result<Self, LadrError> {
        Ok(Self {
            exe: find_solver(dir, "prover9")?,
            runner: OsRunner,
        })
    }
}

impl<R: Runner> Prover<R> {
    /// Use an explicit runner; tests substitute one with canned output.
    pub fn with_runner(exe: PathBuf, runner: R) -> Self {
        Self { exe, runner }
    }

    /// Attempt to derive `goal` from `premises` within `timeout`.
    pub fn prove(&self, premises: &[Formula], goal: &Formula, timeout: Duration) -> Outcome {
        let contents = input::prove_input(premises, goal);
        self.run(&contents, timeout)
    }

    /// Run the prover over `statements` with a dummy always-true goal and a
    /// short timeout, purely to surface solver-side syntax errors. The
    /// statements are well-formed as far as the solver is concerned iff the
    /// outcome is not an error.
    pub fn check_syntax(&self, statements: &[Formula]) -> SyntaxCheck {
        let goal = Formula::new("true");
        let details = self.prove(statements, &goal, SYNTAX_CHECK_TIMEOUT);
        SyntaxCheck {
            valid: !matches!(details, Outcome::Error { .. }),
            details,
        }
    }

    fn run(&self, contents: &str, timeout: Duration) -> Outcome {
        let artifact = match input::write_input(contents) {
            Ok(artifact) => artifact,
            Err(err) => {
                return Outcome::Error {
                    reason: "could not write prover input".to_string(),
                    detail: err.to_string(),
                }
            }
        };
        match self.runner.run(&self.exe, artifact, timeout) {
            Ok(RunResult::Completed { stdout, stderr, .. }) => classify_prover(&stdout, &stderr),
            Ok(RunResult::TimedOut) => Outcome::Timeout {
                seconds: timeout.as_secs(),
            },
            Err(err) => Outcome::Error {
                reason: "could not run prover9".to_string(),
                detail: err.to_string(),
            },
        }
    }
}

/// Result of [`Prover::check_syntax`].
#[derive(Debug, Clone, Serialize)]
pub struct SyntaxCheck {
    /// Whether the solver accepted the statements.
    pub valid: bool,
    /// The underlying solver outcome, kept for diagnosis.
    pub details: Outcome,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::input::InputArtifact;
    use std::io;

    /// A runner that never touches the OS: it hands back canned streams (or
    /// a canned timeout/failure) and lets the artifact drop like the real
    /// one would.
    pub(crate) struct FakeRunner {
        pub stdout: &'static str,
        pub stderr: &'static str,
        pub timeout: bool,
        pub spawn_error: bool,
    }

    impl FakeRunner {
        pub(crate) fn completed(stdout: &'static str, stderr: &'static str) -> Self {
            Self {
                stdout,
                stderr,
                timeout: false,
                spawn_error: false,
            }
        }
    }

    impl Runner for FakeRunner {
        fn run(
            &self,
            _exe: &Path,
            input: InputArtifact,
            _timeout: Duration,
        ) -> io::Result<RunResult> {
            drop(input);
            if self.spawn_error {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such binary"));
            }
            if self.timeout {
                return Ok(RunResult::TimedOut);
            }
            Ok(RunResult::Completed {
                stdout: self.stdout.to_string(),
                stderr: self.stderr.to_string(),
                status: success_status(),
            })
        }
    }

    #[cfg(unix)]
    pub(crate) fn success_status() -> std::process::ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(0)
    }

    #[cfg(not(unix))]
    pub(crate) fn success_status() -> std::process::ExitStatus {
        std::process::Command::new("cmd")
            .args(["/C", "exit 0"])
            .status()
            .unwrap()
    }

    fn fake_prover(runner: FakeRunner) -> Prover<FakeRunner> {
        Prover::with_runner(PathBuf::from("/nonexistent/prover9"), runner)
    }

    const PROVED: &str =
        "THEOREM PROVED\n==== PROOF =================\n1 $F.\n====================";

    #[test]
    fn test_prove_classifies_canned_success() {
        let prover = fake_prover(FakeRunner::completed(PROVED, ""));
        let premises = [Formula::new("man(socrates)")];
        let outcome = prover.prove(
            &premises,
            &Formula::new("mortal(socrates)"),
            Duration::from_secs(60),
        );
        match outcome {
            Outcome::Proved { proof, .. } => assert_eq!(proof, "1 $F."),
            other => panic!("expected Proved, got {other:?}"),
        }
    }

    #[test]
    fn test_prove_reports_timeout_with_limit() {
        let prover = fake_prover(FakeRunner {
            stdout: "",
            stderr: "",
            timeout: true,
            spawn_error: false,
        });
        let outcome = prover.prove(&[], &Formula::new("true"), Duration::from_secs(7));
        assert_eq!(outcome, Outcome::Timeout { seconds: 7 });
    }

    #[test]
    fn test_spawn_failure_becomes_error_outcome() {
        let prover = fake_prover(FakeRunner {
            stdout: "",
            stderr: "",
            timeout: false,
            spawn_error: true,
        });
        let outcome = prover.prove(&[], &Formula::new("true"), Duration::from_secs(1));
        match outcome {
            Outcome::Error { reason, detail } => {
                assert!(reason.contains("prover9"));
                assert!(detail.contains("no such binary"));
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_check_syntax_accepts_non_error_outcomes() {
        let prover = fake_prover(FakeRunner::completed("=== SEARCH FAILED ===", ""));
        let check = prover.check_syntax(&[Formula::new("p(a)")]);
        assert!(check.valid);
        assert!(matches!(check.details, Outcome::Unprovable { .. }));
    }

    #[test]
    fn test_check_syntax_rejects_fatal_errors() {
        let prover = fake_prover(FakeRunner::completed("", "Fatal error: bad token"));
        let check = prover.check_syntax(&[Formula::new("not ) valid")]);
        assert!(!check.valid);
        assert!(matches!(check.details, Outcome::Error { .. }));
    }

    /// End-to-end against a real Prover9; set LADR_BIN_DIR to run it.
    #[test]
    fn test_socrates_end_to_end() {
        let Ok(dir) = std::env::var("LADR_BIN_DIR") else {
            eprintln!("LADR_BIN_DIR not set, skipping prover9 end-to-end test");
            return;
        };
        let prover = Prover::new(Path::new(&dir)).unwrap();
        let premises = [
            Formula::new("all x (man(x) -> mortal(x))"),
            Formula::new("man(socrates)"),
        ];
        let outcome = prover.prove(
            &premises,
            &Formula::new("mortal(socrates)"),
            Duration::from_secs(60),
        );
        match outcome {
            Outcome::Proved { proof, .. } => assert!(!proof.is_empty()),
            other => panic!("expected Proved, got {other:?}"),
        }
    }
}
