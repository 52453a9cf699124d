// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Locating solver binaries in the filesystem.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that prevent a solver session from starting at all. Per-request
/// process failures are folded into [`Outcome`](crate::outcome::Outcome)
/// values instead so a single bad request never crashes the session.
#[derive(Error, Debug)]
pub enum LadrError {
    /// Neither the suffixed nor the bare binary name exists under the
    /// configured directory.
    #[error("solver binary not found at {0} (also probed with .exe suffix)")]
    BinaryNotFound(PathBuf),
}

/// Locate a solver binary under `dir`, probing the `.exe`-suffixed name
/// first and falling back to the bare name.
///
/// This runs once when a solver handle is constructed, so a missing binary
/// fails the whole session immediately rather than each request.
pub fn find_solver(dir: &Path, name: &str) -> Result<PathBuf, LadrError> {
    let suffixed = dir.join(format!("{name}.exe"));
    if suffixed.exists() {
        return Ok(suffixed);
    }
    let plain = dir.join(name);
    if plain.exists() {
        return Ok(plain);
    }
    Err(LadrError::BinaryNotFound(plain))
}

#[cfg(test)]
mod tests {
    use super::find_solver;
    use std::{env, fs, process};

    #[test]
    fn test_missing_binary_is_reported() {
        let dir = env::temp_dir();
        let err = find_solver(&dir, "no-such-solver-here").unwrap_err();
        assert!(err.to_string().contains("no-such-solver-here"));
    }

    #[test]
    fn test_suffixed_name_takes_priority() {
        let dir = env::temp_dir().join(format!("ladr-conf-test-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("mace4.exe"), "").unwrap();
        fs::write(dir.join("mace4"), "").unwrap();
        let found = find_solver(&dir, "mace4").unwrap();
        assert_eq!(found, dir.join("mace4.exe"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bare_name_as_fallback() {
        let dir = env::temp_dir().join(format!("ladr-conf-bare-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("prover9"), "").unwrap();
        let found = find_solver(&dir, "prover9").unwrap();
        assert_eq!(found, dir.join("prover9"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
