// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Pre-flight syntax validation for formulas before they are handed to a
//! solver.
//!
//! The checks here are lexical and structural only; they know nothing about
//! the solvers and never spawn one. A clean report does not guarantee the
//! solver will accept the formula, and a dirty one is advisory data for the
//! caller, never a hard rejection.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Words that structure a LADR input file or are built-in; using one as a
/// predicate or function name breaks the surrounding block.
const RESERVED: [&str; 5] = ["all", "exists", "true", "false", "end_of_list"];

lazy_static! {
    static ref QUANTIFIER: Regex =
        Regex::new(r"\b(all|exists)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap();
    static ref APPLICATION: Regex = Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap();
    static ref TIGHT_IMPLIES: Regex = Regex::new(r"\w->\w").unwrap();
    static ref TIGHT_IFF: Regex = Regex::new(r"\w<->\w").unwrap();
}

/// Result of validating a single formula. Errors block use; warnings do not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems that would make the solver reject or misread the formula.
    pub errors: Vec<String>,
    /// Stylistic issues and likely typos.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// A formula is valid when no errors fired; warnings are ignored.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate one formula. Pure and stateless: each call starts from an empty
/// report. Checks are non-exclusive, so several issues may fire at once.
pub fn validate(formula: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    // the terminator period is not part of the formula proper
    let formula = formula.trim_end_matches('.');

    check_balanced_parens(formula, &mut report);
    check_quantifiers(formula, &mut report);
    check_operators(formula, &mut report);
    check_naming(formula, &mut report);
    check_common_mistakes(formula, &mut report);

    report
}

fn check_balanced_parens(formula: &str, report: &mut ValidationReport) {
    let mut stack = Vec::new();
    for (i, c) in formula.chars().enumerate() {
        match c {
            '(' => stack.push(i),
            ')' => {
                if stack.pop().is_none() {
                    report
                        .errors
                        .push(format!("unmatched closing parenthesis at position {i}"));
                }
            }
            _ => (),
        }
    }
    if let Some(&i) = stack.first() {
        report
            .errors
            .push(format!("unmatched opening parenthesis at position {i}"));
    }
}

fn check_quantifiers(formula: &str, report: &mut ValidationReport) {
    for caps in QUANTIFIER.captures_iter(formula) {
        let quantifier = &caps[1];
        let var = &caps[2];
        if !var.starts_with(|c: char| c.is_ascii_lowercase()) {
            report.warnings.push(format!(
                "quantifier variable '{var}' should start with a lowercase letter"
            ));
        }
        // the quantified scope must be parenthesized
        let rest = formula[caps.get(0).unwrap().end()..].trim_start();
        if !rest.starts_with('(') {
            report.errors.push(format!(
                "quantifier '{quantifier} {var}' must be followed by a formula in parentheses"
            ));
        }
    }
}

fn check_operators(formula: &str, report: &mut ValidationReport) {
    for op in ['&', '|'] {
        let doubled: String = [op, op].iter().collect();
        if formula.contains(&doubled) {
            report.warnings.push(format!(
                "doubled operator '{doubled}' found - did you mean to use it twice?"
            ));
        }
    }
    if formula.matches("->").count() > 1 && !formula.contains('(') {
        report.warnings.push(
            "multiple implications without parentheses - add parentheses to fix the associativity"
                .to_string(),
        );
    }
}

fn check_naming(formula: &str, report: &mut ValidationReport) {
    for caps in APPLICATION.captures_iter(formula) {
        let name = &caps[1];
        // `all`/`exists` followed by `(` is a quantifier scope, not a call
        if name == "all" || name == "exists" {
            continue;
        }
        if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            report.warnings.push(format!(
                "predicate or function '{name}' starts with an uppercase letter - \
                 lowercase names are conventional"
            ));
        }
        if RESERVED.contains(&name) {
            report.errors.push(format!(
                "'{name}' is a reserved word and cannot name a predicate or function"
            ));
        }
    }
}

fn check_common_mistakes(formula: &str, report: &mut ValidationReport) {
    for (re, op) in [(&*TIGHT_IMPLIES, "->"), (&*TIGHT_IFF, "<->")] {
        if re.is_match(formula) {
            report
                .warnings
                .push(format!("missing whitespace around '{op}'"));
        }
    }
    if formula.contains('"') || formula.contains('\'') {
        report.warnings.push(
            "quoted strings are not part of the formula syntax - use predicates or constants"
                .to_string(),
        );
    }
    if formula.contains("()") {
        report.errors.push(
            "empty parentheses found - predicates and functions must have arguments".to_string(),
        );
    }
}
