// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! First-order formulas in the LADR surface syntax: representation,
//! pre-flight syntax validation, and canned axiom sets for algebraic and
//! categorical theories.

// configure clippy
#![allow(clippy::needless_return)]
#![allow(clippy::type_complexity)]
#![deny(clippy::uninlined_format_args)]
// documentation-related lints (only checked when running rustdoc)
#![warn(missing_docs)]
#![allow(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod axioms;
pub mod syntax;
pub mod validate;

pub use syntax::Formula;
pub use validate::{validate, ValidationReport};
