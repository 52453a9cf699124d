// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Classification of raw solver output into structured outcomes.
//!
//! Both classifiers are pure functions over the captured text. They apply
//! an ordered list of marker checks where the first match wins; the order
//! is part of the contract (a successful proof beats a stray fatal-error
//! line further down the output).

use serde::Serialize;
use std::collections::BTreeMap;

/// A finite model extracted from Mace4 output.
///
/// The structured maps are best-effort: Mace4's interpretation language is
/// richer than what is parsed here, and `raw_interpretation` is always
/// populated as the authoritative fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    /// Cardinality of the finite universe, if it could be read off.
    pub domain_size: Option<usize>,
    /// `relation(...)` entries by name.
    pub predicates: BTreeMap<String, String>,
    /// `function(...)` entries with arguments, by name.
    pub functions: BTreeMap<String, String>,
    /// Zero-argument `function(...)` entries, by name.
    pub constants: BTreeMap<String, String>,
    /// The verbatim interpretation block.
    pub raw_interpretation: String,
}

/// Everything one solver invocation can come back with.
///
/// Process-level failures fold into `Error` rather than propagating, and
/// output matching no known marker becomes `Unknown` rather than being
/// silently dropped. Every carrying variant keeps enough raw text to
/// diagnose without re-running the solver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// Prover9 derived the goal.
    Proved {
        /// The extracted proof trace.
        proof: String,
        /// Full raw stdout.
        complete_output: String,
    },
    /// Prover9 exhausted its search without a proof.
    Unprovable {
        /// Human-readable explanation.
        reason: String,
        /// Full raw stdout.
        complete_output: String,
    },
    /// Mace4 found a model.
    ModelFound {
        /// Best-effort structured model.
        model: Model,
        /// Counterexample annotation, set when the request carried a goal.
        #[serde(skip_serializing_if = "Option::is_none")]
        interpretation: Option<String>,
        /// Full raw stdout.
        complete_output: String,
    },
    /// Mace4 exhausted its domain sizes without a model.
    NoModelFound {
        /// Human-readable explanation.
        reason: String,
        /// Full raw stdout.
        complete_output: String,
    },
    /// The wall-clock limit expired before the solver finished.
    Timeout {
        /// The limit that was exceeded, in seconds.
        seconds: u64,
    },
    /// Malformed input, a solver-reported fatal condition, or a process
    /// failure.
    Error {
        /// What went wrong.
        reason: String,
        /// Raw diagnostic text.
        detail: String,
    },
    /// Output was captured but matched none of the recognized markers.
    Unknown {
        /// Raw stdout.
        output: String,
        /// Raw stderr.
        error: String,
    },
}

/// Classify Prover9 output. Marker priority: proved, search failed, fatal
/// error on stderr, then the unexpected-output safety net.
pub fn classify_prover(stdout: &str, stderr: &str) -> Outcome {
    if stdout.contains("THEOREM PROVED") {
        return match extract_proof(stdout) {
            Some(proof) => Outcome::Proved {
                proof,
                complete_output: stdout.to_string(),
            },
            // the marker promises a PROOF block; its absence is a defect
            // worth surfacing, not an empty proof
            None => Outcome::Error {
                reason: "THEOREM PROVED without a delimited proof block".to_string(),
                detail: stdout.to_string(),
            },
        };
    }
    if stdout.contains("SEARCH FAILED") {
        return Outcome::Unprovable {
            reason: "proof search failed".to_string(),
            complete_output: stdout.to_string(),
        };
    }
    if stderr.contains("Fatal error") {
        return Outcome::Error {
            reason: "syntax error".to_string(),
            detail: stderr.to_string(),
        };
    }
    Outcome::Error {
        reason: "unexpected prover output".to_string(),
        detail: format!("stdout:\n{stdout}\nstderr:\n{stderr}"),
    }
}

/// The proof trace is the text between the first `PROOF =` marker and the
/// next `====` delimiter, trimmed. The marker sits in a banner line padded
/// with `=`, which must be skipped or the trace would read as empty.
fn extract_proof(stdout: &str) -> Option<String> {
    let (_, rest) = stdout.split_once("PROOF =")?;
    let rest = rest.trim_start_matches('=');
    let (proof, _) = rest.split_once("====")?;
    Some(proof.trim().to_string())
}

/// Classify Mace4 output. Marker priority: model found, search exhausted,
/// fatal error (either stream), then `Unknown`.
pub fn classify_mace(stdout: &str, stderr: &str) -> Outcome {
    if stdout.contains("DOMAIN SIZE") && stdout.contains("interpretation(") {
        return Outcome::ModelFound {
            model: parse_model(stdout),
            interpretation: None,
            complete_output: stdout.to_string(),
        };
    }
    if stdout.contains("SEARCH FAILED") || stdout.contains("SEARCH TERMINATED") {
        return Outcome::NoModelFound {
            reason: "no finite model found within the domain size limits".to_string(),
            complete_output: stdout.to_string(),
        };
    }
    if stderr.contains("Fatal error") || stdout.contains("Fatal error") {
        let detail = if stderr.is_empty() { stdout } else { stderr };
        return Outcome::Error {
            reason: "syntax error or invalid input".to_string(),
            detail: detail.to_string(),
        };
    }
    Outcome::Unknown {
        output: stdout.to_string(),
        error: stderr.to_string(),
    }
}

/// Best-effort extraction of a structured [`Model`] from Mace4 stdout.
///
/// Intentionally not a full parser for the interpretation language: the
/// domain size comes from the first `DOMAIN SIZE` line (its final token),
/// the raw block from the first `interpretation(` through `end_of_list`,
/// and single-line `relation(`/`function(` entries populate the maps.
pub fn parse_model(output: &str) -> Model {
    let mut model = Model::default();

    if let Some(line) = output.lines().find(|l| l.contains("DOMAIN SIZE")) {
        // a non-numeric final token leaves the size unset, by contract
        model.domain_size = line.split_whitespace().last().and_then(|t| t.parse().ok());
    }

    if let Some(start) = output.find("interpretation(") {
        let rest = &output[start..];
        if let Some(end) = rest.find("end_of_list") {
            let block = &rest[..end + "end_of_list".len()];
            model.raw_interpretation = block.trim().to_string();

            for line in block.lines() {
                let line = line.trim();
                if let Some(entry) = line.strip_prefix("relation(") {
                    if let Some((name, value)) = split_entry(entry) {
                        model.predicates.insert(name, value);
                        model.raw_interpretation.push_str(&format!("\n{line}"));
                    }
                } else if let Some(entry) = line.strip_prefix("function(") {
                    if let Some((name, value)) = split_entry(entry) {
                        if name.contains('(') {
                            model.functions.insert(name, value);
                        } else {
                            model.constants.insert(name, value);
                        }
                        model.raw_interpretation.push_str(&format!("\n{line}"));
                    }
                }
            }
        }
    }
    model
}

/// Split `name(args), [ values ])...` into the symbol (with its argument
/// shape) and the bracketed value list. The splitting comma is the first
/// one outside the symbol's own parentheses.
fn split_entry(entry: &str) -> Option<(String, String)> {
    let mut depth = 0usize;
    for (i, c) in entry.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                let name = entry[..i].trim().to_string();
                let rest = &entry[i + 1..];
                let open = rest.find('[')?;
                let close = rest[open..].find(']')? + open;
                return Some((name, rest[open..=close].to_string()));
            }
            _ => (),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROVED: &str = "\
=============== Prover9 ===============
THEOREM PROVED
============================== PROOF =================================
1 man(socrates).
2 -mortal(socrates).
3 $F.
============================== end of proof ==========================";

    #[test]
    fn test_theorem_proved_extracts_trace() {
        match classify_prover(PROVED, "") {
            Outcome::Proved {
                proof,
                complete_output,
            } => {
                assert!(proof.starts_with("1 man(socrates)."));
                assert!(proof.ends_with("3 $F."));
                assert_eq!(complete_output, PROVED);
            }
            other => panic!("expected Proved, got {other:?}"),
        }
    }

    #[test]
    fn test_proved_marker_beats_fatal_stderr() {
        // priority is documented: the proved check runs before the stderr check
        let outcome = classify_prover(PROVED, "Fatal error: leftover warning");
        assert!(matches!(outcome, Outcome::Proved { .. }));
    }

    #[test]
    fn test_proved_without_proof_block_is_a_defect() {
        let outcome = classify_prover("THEOREM PROVED\nno delimiters here", "");
        match outcome {
            Outcome::Error { reason, .. } => assert!(reason.contains("proof block")),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_search_failed_is_unprovable() {
        let outcome = classify_prover("=== SEARCH FAILED ===", "");
        assert!(matches!(outcome, Outcome::Unprovable { .. }));
    }

    #[test]
    fn test_fatal_stderr_is_error() {
        let outcome = classify_prover("", "Fatal error: bad formula on line 2");
        match outcome {
            Outcome::Error { reason, detail } => {
                assert_eq!(reason, "syntax error");
                assert!(detail.contains("line 2"));
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_prover_output_keeps_both_streams() {
        let outcome = classify_prover("something odd", "on stderr too");
        match outcome {
            Outcome::Error { reason, detail } => {
                assert!(reason.contains("unexpected"));
                assert!(detail.contains("something odd"));
                assert!(detail.contains("on stderr too"));
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    const MODEL: &str = "\
=============== Mace4 ===============
DOMAIN SIZE 2

interpretation( 2, [number=1, seconds=0], [
    function(a, [ 0 ]),
    function(f(_), [ 0, 1 ]),
    relation(P(_), [ 1, 0 ])
]).
end_of_list.
trailing chatter";

    #[test]
    fn test_model_found_with_domain_size() {
        match classify_mace(MODEL, "") {
            Outcome::ModelFound {
                model,
                interpretation,
                ..
            } => {
                assert_eq!(model.domain_size, Some(2));
                assert!(model.raw_interpretation.starts_with("interpretation( 2"));
                assert!(model.raw_interpretation.contains("end_of_list"));
                assert!(!model.raw_interpretation.contains("trailing chatter"));
                assert_eq!(model.constants.get("a").map(String::as_str), Some("[ 0 ]"));
                assert_eq!(
                    model.functions.get("f(_)").map(String::as_str),
                    Some("[ 0, 1 ]")
                );
                assert_eq!(
                    model.predicates.get("P(_)").map(String::as_str),
                    Some("[ 1, 0 ]")
                );
                assert!(interpretation.is_none());
            }
            other => panic!("expected ModelFound, got {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_domain_size_is_left_unset() {
        let output = "==== DOMAIN SIZE ====\ninterpretation( 2, [], []).\nend_of_list.";
        match classify_mace(output, "") {
            Outcome::ModelFound { model, .. } => assert_eq!(model.domain_size, None),
            other => panic!("expected ModelFound, got {other:?}"),
        }
    }

    #[test]
    fn test_search_exhausted_is_no_model_found() {
        for marker in ["SEARCH FAILED", "SEARCH TERMINATED"] {
            let outcome = classify_mace(marker, "");
            assert!(
                matches!(outcome, Outcome::NoModelFound { .. }),
                "{marker} misclassified"
            );
        }
    }

    #[test]
    fn test_mace_fatal_error_prefers_stderr_detail() {
        match classify_mace("Fatal error here too", "Fatal error: stderr wins") {
            Outcome::Error { detail, .. } => assert!(detail.contains("stderr wins")),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_mace_output_is_unknown() {
        match classify_mace("nothing to see", "nor here") {
            Outcome::Unknown { output, error } => {
                assert_eq!(output, "nothing to see");
                assert_eq!(error, "nor here");
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn test_model_found_needs_both_markers() {
        // DOMAIN SIZE alone isn't a model; this one falls through to Unknown
        let outcome = classify_mace("DOMAIN SIZE 2", "");
        assert!(matches!(outcome, Outcome::Unknown { .. }));
    }

    #[test]
    fn test_outcome_serializes_with_result_tag() {
        let outcome = Outcome::Timeout { seconds: 60 };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["result"], "timeout");
        assert_eq!(json["seconds"], 60);
    }
}
