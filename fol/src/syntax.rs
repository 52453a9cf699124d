// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! The [`Formula`] type shared by every layer of the pipeline.

use serde::Serialize;
use std::fmt;

/// A formula in the restricted first-order syntax the LADR tools accept:
/// quantifiers `all`/`exists`, connectives `->`, `<->`, `&`, `|`, negation
/// `-`, n-ary application `name(arg1,...,argn)`, and equality `=`.
///
/// Formulas are immutable values. The only implicit normalization is
/// terminator handling: solver input lines must end in exactly one `.`,
/// which [`Formula::terminated`] guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Formula(String);

impl Formula {
    /// Wrap a formula string as-is.
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    /// The formula text exactly as constructed.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The formula with exactly one trailing terminator period. A formula
    /// already ending in `.` is returned unchanged, never double-terminated.
    pub fn terminated(&self) -> String {
        if self.0.ends_with('.') {
            self.0.clone()
        } else {
            format!("{}.", self.0)
        }
    }

    /// The formula with any trailing terminator periods removed.
    pub fn without_terminator(&self) -> &str {
        self.0.trim_end_matches('.')
    }
}

impl From<&str> for Formula {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Formula {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
