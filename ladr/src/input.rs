// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Synthesis of the line-oriented input files the LADR solvers read.
//!
//! Both solvers consume `formulas(assumptions). ... end_of_list.` blocks;
//! Mace4 additionally takes `assign(...)` control directives. Inputs are
//! written to uniquely named files in the OS temp directory and owned by an
//! [`InputArtifact`] whose `Drop` removes the file, so a single invocation's
//! artifact is cleaned up on every exit path.

use fol::syntax::Formula;
use itertools::Itertools;
use lazy_static::lazy_static;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
    process,
    sync::Mutex,
};

/// Default wall-clock limit, in seconds, for either solver.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Where Mace4's incremental domain search starts when no size is pinned.
const DEFAULT_START_SIZE: usize = 2;
/// Ceiling for the incremental domain search.
const DEFAULT_END_SIZE: usize = 10;

lazy_static! {
    static ref INPUT_COUNT: Mutex<usize> = Mutex::new(0);
}

fn new_input_id() -> usize {
    let mut count = INPUT_COUNT.lock().unwrap();
    let id = *count;
    *count += 1;
    id
}

/// Serialize premises and a goal into a Prover9 input. Premise order is
/// preserved: the solver doesn't care, but its diagnostics refer to line
/// numbers.
pub fn prove_input(premises: &[Formula], goal: &Formula) -> String {
    let premises = premises.iter().map(|p| p.terminated()).join("\n");
    format!(
        "formulas(assumptions).\n{premises}\nend_of_list.\n\n\
         formulas(goals).\n{goal}\nend_of_list.",
        goal = goal.terminated()
    )
}

/// Serialize a Mace4 input: domain-size and timeout directives, the premise
/// block, and optionally a goals block containing the *negated* goal.
///
/// The negation is the point: Mace4 searches for a model satisfying every
/// listed formula, so a model of the premises plus `-((goal))` is exactly a
/// counterexample to "goal follows from the premises".
pub fn model_input(
    premises: &[Formula],
    goal: Option<&Formula>,
    domain_size: Option<usize>,
    max_seconds: u64,
) -> String {
    let mut lines = Vec::new();
    match domain_size {
        Some(n) => lines.push(format!("assign(domain_size, {n}).")),
        None => {
            lines.push(format!("assign(domain_size, {DEFAULT_START_SIZE})."));
            lines.push(format!("assign(end_size, {DEFAULT_END_SIZE})."));
        }
    }
    lines.push(format!("assign(max_seconds, {max_seconds})."));
    lines.push(String::new());

    lines.push("formulas(assumptions).".to_string());
    lines.extend(premises.iter().map(|p| p.terminated()));
    lines.push("end_of_list.".to_string());

    if let Some(goal) = goal {
        lines.push(String::new());
        lines.push("formulas(goals).".to_string());
        lines.push(format!("-(({})).", goal.without_terminator()));
        lines.push("end_of_list.".to_string());
    }
    lines.join("\n")
}

/// One solver invocation's input file. The file is deleted when the
/// artifact drops, whether the invocation succeeded, failed, timed out, or
/// unwound; deletion failure is swallowed.
#[derive(Debug)]
pub struct InputArtifact {
    path: PathBuf,
}

impl InputArtifact {
    /// Path of the on-disk input file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InputArtifact {
    fn drop(&mut self) {
        _ = fs::remove_file(&self.path);
    }
}

/// Write `contents` to a fresh, uniquely named `.in` file in the OS temp
/// directory. Names are unique per process and per call, so concurrent
/// invocations never share an artifact.
pub fn write_input(contents: &str) -> io::Result<InputArtifact> {
    let path = env::temp_dir().join(format!("ladr-{}-{}.in", process::id(), new_input_id()));
    fs::write(&path, contents)?;
    log::debug!("wrote solver input {}:\n{contents}", path.display());
    Ok(InputArtifact { path })
}
