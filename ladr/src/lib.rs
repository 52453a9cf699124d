// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Integration with the LADR batch solvers: Prover9 (a resolution theorem
//! prover) and Mace4 (a finite model finder).
//!
//! The solvers are opaque external binaries. This crate only prepares their
//! line-oriented input files, invokes them with a wall-clock timeout, and
//! classifies their plain-text output into a closed [`Outcome`] type; it
//! implements no proving or model search of its own.

// configure clippy
#![allow(clippy::needless_return)]
#![allow(clippy::large_enum_variant)]
#![allow(clippy::type_complexity)]
#![deny(clippy::uninlined_format_args)]
// documentation-related lints (only checked when running rustdoc)
#![warn(missing_docs)]
#![allow(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod conf;
pub mod input;
pub mod mace;
pub mod outcome;
pub mod proc;
pub mod prover;

pub use conf::{find_solver, LadrError};
pub use mace::ModelFinder;
pub use outcome::{Model, Outcome};
pub use prover::{Prover, SyntaxCheck};
