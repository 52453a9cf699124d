// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! High-level interface to the Mace4 finite model finder.
//!
//! Structurally parallel to [`crate::prover`]: build an input, run the
//! binary under a deadline, classify the text that comes back. The extra
//! piece is counterexample search, where the goal is negated into the
//! input so any model Mace4 finds refutes the entailment.

use crate::conf::{find_solver, LadrError};
use crate::input;
use crate::outcome::{classify_mace, Outcome};
use crate::proc::{OsRunner, RunResult, Runner};
use fol::syntax::Formula;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Handle to a Mace4 binary.
#[derive(Debug)]
pub struct ModelFinder<R = OsRunner> {
    exe: PathBuf,
    runner: R,
}

impl ModelFinder<OsRunner> {
    /// Locate `mace4` under `dir`.
    pub fn new(dir: &Path) -> Result<Self, LadrError> {
        Ok(Self {
            exe: find_solver(dir, "mace4")?,
            runner: OsRunner,
        })
    }
}

impl<R: Runner> ModelFinder<R> {
    /// Use an explicit runner; tests substitute one with canned output.
    pub fn with_runner(exe: PathBuf, runner: R) -> Self {
        Self { exe, runner }
    }

    /// Search for a finite model satisfying `premises`. With no pinned
    /// `domain_size` the search runs incrementally over sizes 2 through 10.
    pub fn find_model(
        &self,
        premises: &[Formula],
        domain_size: Option<usize>,
        timeout: Duration,
    ) -> Outcome {
        let contents = input::model_input(premises, None, domain_size, timeout.as_secs());
        self.run(&contents, timeout)
    }

    /// Search for a model where every premise holds but `conclusion` is
    /// false, demonstrating that the conclusion does not follow. A found
    /// model is annotated with a counterexample statement naming the
    /// falsified conclusion.
    pub fn find_counterexample(
        &self,
        premises: &[Formula],
        conclusion: &Formula,
        domain_size: Option<usize>,
        timeout: Duration,
    ) -> Outcome {
        let contents =
            input::model_input(premises, Some(conclusion), domain_size, timeout.as_secs());
        let mut outcome = self.run(&contents, timeout);
        if let Outcome::ModelFound { interpretation, .. } = &mut outcome {
            *interpretation = Some(format!(
                "Counterexample found: the premises are satisfied but the conclusion \
                 '{conclusion}' is false in this model."
            ));
        }
        outcome
    }

    fn run(&self, contents: &str, timeout: Duration) -> Outcome {
        let artifact = match input::write_input(contents) {
            Ok(artifact) => artifact,
            Err(err) => {
                return Outcome::Error {
                    reason: "could not write model finder input".to_string(),
                    detail: err.to_string(),
                }
            }
        };
        match self.runner.run(&self.exe, artifact, timeout) {
            Ok(RunResult::Completed { stdout, stderr, .. }) => classify_mace(&stdout, &stderr),
            Ok(RunResult::TimedOut) => Outcome::Timeout {
                seconds: timeout.as_secs(),
            },
            Err(err) => Outcome::Error {
                reason: "could not run mace4".to_string(),
                detail: err.to_string(),
            },
        }
    }
}
