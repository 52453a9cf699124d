// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! The named-tool dispatcher.
//!
//! Tool invocations arrive as a name plus a JSON object of arguments and
//! come back as JSON-rendered text, so any request/response transport can
//! sit in front of this without knowing about solvers. Solver outcomes are
//! data, not errors: only unknown tools and malformed arguments fail the
//! dispatch itself.

use fol::syntax::Formula;
use fol::validate;
use ladr::input::DEFAULT_TIMEOUT_SECS;
use ladr::proc::{OsRunner, Runner};
use ladr::{LadrError, ModelFinder, Prover};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Ways a tool dispatch itself can fail. Solver-side failures are never
/// dispatch failures; they come back inside the response text.
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool by that name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// A required argument was missing or had the wrong shape.
    #[error("missing or malformed argument '{0}'")]
    BadArgument(&'static str),
}

/// The named tools backed by one Prover9/Mace4 installation.
pub struct ToolKit<R = OsRunner> {
    prover: Prover<R>,
    finder: ModelFinder<R>,
}

impl ToolKit<OsRunner> {
    /// Probe for both binaries under `dir`. A missing binary is fatal to
    /// the whole session, not to individual requests.
    pub fn new(dir: &Path) -> Result<Self, LadrError> {
        Ok(Self {
            prover: Prover::new(dir)?,
            finder: ModelFinder::new(dir)?,
        })
    }
}

impl<R: Runner> ToolKit<R> {
    /// Assemble a toolkit from explicit solver handles.
    pub fn with_parts(prover: Prover<R>, finder: ModelFinder<R>) -> Self {
        Self { prover, finder }
    }

    /// Dispatch one named tool invocation.
    pub fn call(&self, name: &str, args: &Value) -> Result<String, ToolError> {
        log::debug!("tool call {name} with args {args}");
        match name {
            "prove" => {
                let premises = formula_list(args, "premises")?;
                let conclusion = formula_arg(args, "conclusion")?;
                let outcome = self.prover.prove(&premises, &conclusion, timeout_arg(args));
                Ok(render(&outcome))
            }
            "check-well-formed" => {
                let statements = formula_list(args, "statements")?;
                Ok(render(&self.prover.check_syntax(&statements)))
            }
            "find-model" => {
                let premises = formula_list(args, "premises")?;
                let outcome =
                    self.finder
                        .find_model(&premises, domain_size_arg(args)?, timeout_arg(args));
                Ok(render(&outcome))
            }
            "find-counterexample" => {
                let premises = formula_list(args, "premises")?;
                let conclusion = formula_arg(args, "conclusion")?;
                let outcome = self.finder.find_counterexample(
                    &premises,
                    &conclusion,
                    domain_size_arg(args)?,
                    timeout_arg(args),
                );
                Ok(render(&outcome))
            }
            "validate-syntax" => validate_tool(args),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

/// Validate each statement without touching a solver; reports are advisory
/// and returned per formula alongside an overall verdict.
fn validate_tool(args: &Value) -> Result<String, ToolError> {
    let statements = string_list(args, "statements")?;
    validate_statements(&statements)
}

pub(crate) fn validate_statements(statements: &[String]) -> Result<String, ToolError> {
    let mut all_valid = true;
    let results: Vec<Value> = statements
        .iter()
        .map(|s| {
            let report = validate::validate(s);
            all_valid &= report.is_valid();
            json!({
                "formula": s,
                "valid": report.is_valid(),
                "errors": report.errors,
                "warnings": report.warnings,
            })
        })
        .collect();
    Ok(render(&json!({
        "valid": all_valid,
        "formula_results": results,
    })))
}

fn render<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).expect("outcome serializes to JSON")
}

fn string_list(args: &Value, key: &'static str) -> Result<Vec<String>, ToolError> {
    let items = args
        .get(key)
        .and_then(Value::as_array)
        .ok_or(ToolError::BadArgument(key))?;
    items
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(ToolError::BadArgument(key))
}

fn formula_list(args: &Value, key: &'static str) -> Result<Vec<Formula>, ToolError> {
    Ok(string_list(args, key)?
        .into_iter()
        .map(Formula::from)
        .collect())
}

fn formula_arg(args: &Value, key: &'static str) -> Result<Formula, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(Formula::from)
        .ok_or(ToolError::BadArgument(key))
}

/// Optional `domain_size`; must be at least 1 when present.
fn domain_size_arg(args: &Value) -> Result<Option<usize>, ToolError> {
    match args.get("domain_size") {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match v.as_u64() {
            Some(n) if n >= 1 => Ok(Some(n as usize)),
            _ => Err(ToolError::BadArgument("domain_size")),
        },
    }
}

/// Optional `timeout` in seconds, defaulting to the solvers' 60s.
fn timeout_arg(args: &Value) -> Duration {
    let seconds = args
        .get("timeout")
        .and_then(Value::as_u64)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(seconds)
}
