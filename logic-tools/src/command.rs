// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! The logic-tools binary's command-line interface.

use clap::{Args, Parser, Subcommand};
use fol::axioms;
use serde_json::json;
use std::path::Path;
use std::process;

use crate::tools::ToolKit;

#[derive(Args, Clone, Debug)]
struct SolverArgs {
    /// Directory containing the prover9 and mace4 binaries; required by
    /// every subcommand that runs a solver
    #[arg(long, global = true)]
    solver_path: Option<String>,

    #[arg(long, default_value_t = 60, global = true)]
    /// Solver wall-clock timeout in seconds
    timeout: u64,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    /// Prove a conclusion from premises with Prover9
    Prove {
        /// Logical premises (repeatable)
        #[arg(short, long)]
        premise: Vec<String>,

        /// Statement to prove
        conclusion: String,
    },
    /// Run statements through Prover9 to surface solver-side syntax errors
    Check {
        /// Statements to check
        statements: Vec<String>,
    },
    /// Search for a finite model of the premises with Mace4
    FindModel {
        /// Logical premises (repeatable)
        #[arg(short, long)]
        premise: Vec<String>,

        #[arg(long)]
        /// Pin the domain size instead of searching sizes 2 through 10
        domain_size: Option<usize>,
    },
    /// Search for a model satisfying the premises and falsifying the
    /// conclusion
    Counterexample {
        /// Logical premises (repeatable)
        #[arg(short, long)]
        premise: Vec<String>,

        /// Conclusion to refute
        conclusion: String,

        #[arg(long)]
        /// Pin the domain size instead of searching sizes 2 through 10
        domain_size: Option<usize>,
    },
    /// Validate formula syntax without running a solver
    Validate {
        /// Statements to validate
        statements: Vec<String>,
    },
    /// Print the axioms of a named theory
    /// (category, monoid, group, functor, naturality)
    Axioms {
        /// Theory name
        theory: String,

        #[arg(long, default_value = "F")]
        /// Functor name, for the functor and naturality theories
        functor: String,

        #[arg(long, default_value = "G")]
        /// Second functor name, for the naturality theory
        second_functor: String,

        #[arg(long, default_value = "alpha")]
        /// Natural transformation component name
        component: String,
    },
    /// Print the premises and conclusion asserting two morphism paths
    /// compose equally (diagram commutativity)
    Commutes {
        /// Morphisms of the first path, in order
        #[arg(long, value_delimiter = ',')]
        path_a: Vec<String>,

        /// Morphisms of the second path, in order
        #[arg(long, value_delimiter = ',')]
        path_b: Vec<String>,

        /// Common start object
        #[arg(long)]
        from: String,

        /// Common end object
        #[arg(long)]
        to: String,
    },
}

#[derive(Parser, Debug)]
#[command(about = "Batch first-order logic tools backed by Prover9 and Mace4")]
/// The command-line application.
pub struct App {
    #[command(flatten)]
    solver: SolverArgs,

    #[command(subcommand)]
    command: Command,
}

impl App {
    /// Run the selected command, printing its result to stdout.
    pub fn exec(self) {
        let App { solver, command } = self;
        let timeout = solver.timeout;
        match command {
            Command::Prove {
                premise,
                conclusion,
            } => run_tool(
                &solver,
                "prove",
                json!({ "premises": premise, "conclusion": conclusion, "timeout": timeout }),
            ),
            Command::Check { statements } => run_tool(
                &solver,
                "check-well-formed",
                json!({ "statements": statements }),
            ),
            Command::FindModel {
                premise,
                domain_size,
            } => run_tool(
                &solver,
                "find-model",
                json!({ "premises": premise, "domain_size": domain_size, "timeout": timeout }),
            ),
            Command::Counterexample {
                premise,
                conclusion,
                domain_size,
            } => run_tool(
                &solver,
                "find-counterexample",
                json!({
                    "premises": premise,
                    "conclusion": conclusion,
                    "domain_size": domain_size,
                    "timeout": timeout,
                }),
            ),
            Command::Validate { statements } => {
                // validation is solver-free; no binaries needed
                match crate::tools::validate_statements(&statements) {
                    Ok(text) => println!("{text}"),
                    Err(err) => fail(&err.to_string()),
                }
            }
            Command::Axioms {
                theory,
                functor,
                second_functor,
                component,
            } => {
                let formulas = match theory.as_str() {
                    "category" => axioms::category_axioms(),
                    "monoid" => axioms::monoid_axioms(),
                    "group" => axioms::group_axioms(),
                    "functor" => axioms::functor_axioms(&functor),
                    "naturality" => {
                        axioms::naturality_condition(&functor, &second_functor, &component)
                    }
                    other => {
                        fail(&format!("unknown theory: {other}"));
                    }
                };
                for formula in formulas {
                    println!("{formula}");
                }
            }
            Command::Commutes {
                path_a,
                path_b,
                from,
                to,
            } => {
                let a: Vec<&str> = path_a.iter().map(String::as_str).collect();
                let b: Vec<&str> = path_b.iter().map(String::as_str).collect();
                if a.is_empty() || b.is_empty() {
                    fail("both paths need at least one morphism");
                }
                let (premises, conclusion) = axioms::commuting_diagram(&a, &b, &from, &to);
                for premise in premises {
                    println!("{premise}");
                }
                println!("conclusion: {conclusion}");
            }
        }
    }
}

fn run_tool(solver: &SolverArgs, name: &str, args: serde_json::Value) {
    let Some(dir) = &solver.solver_path else {
        fail("--solver-path is required for this subcommand");
    };
    let kit = match ToolKit::new(Path::new(dir)) {
        Ok(kit) => kit,
        Err(err) => fail(&err.to_string()),
    };
    match kit.call(name, &args) {
        Ok(text) => println!("{text}"),
        Err(err) => fail(&err.to_string()),
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("{msg}");
    process::exit(1);
}
