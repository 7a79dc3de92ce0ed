// crates/rob-verdict-rules/tests/schema_artifacts.rs
//! Unit tests for the canonical rule document schemas.
// ============================================================================
// Module: Schema Artifact Tests
// Description: Tests for schema compilation and acceptance boundaries.
// ============================================================================
//! ## Overview
//! Verifies that both canonical schemas compile under Draft 2020-12 and draw
//! the intended acceptance boundary: minimal and fully-featured documents
//! pass, while structurally broken documents are rejected before
//! deserialization ever runs.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use jsonschema::Draft;
use jsonschema::Validator;
use rob_verdict_rules::domain_rules_schema;
use rob_verdict_rules::global_rules_schema;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Compiles a schema under the draft used by the loader.
fn compile(schema: &Value) -> Validator {
    jsonschema::options().with_draft(Draft::Draft202012).build(schema).unwrap()
}

// ============================================================================
// SECTION: Domain Rules Schema
// ============================================================================

#[test]
fn domain_rules_schema_compiles() {
    compile(&domain_rules_schema());
}

#[test]
fn domain_rules_schema_accepts_a_full_document() {
    let validator = compile(&domain_rules_schema());
    let document = json!({
        "domains": [
            {
                "domain": 1,
                "rules": [
                    {
                        "when": {
                            "1.1": { "in": ["Y", "PY"], "not_in": ["NA"] },
                            "1.2": { "equals": "N", "not_equals": "NI" }
                        },
                        "result": "Low",
                        "rationale": "adequate process"
                    },
                    { "result": "Some concerns", "default": true }
                ]
            }
        ]
    });
    assert!(validator.is_valid(&document));
}

#[test]
fn domain_rules_schema_rejects_missing_result() {
    let validator = compile(&domain_rules_schema());
    let document = json!({"domains": [{"domain": 1, "rules": [{"when": {}}]}]});
    assert!(!validator.is_valid(&document));
}

#[test]
fn domain_rules_schema_rejects_unknown_answer_tokens() {
    let validator = compile(&domain_rules_schema());
    let document = json!({
        "domains": [
            {"domain": 1, "rules": [{"when": {"1.1": {"in": ["YES"]}}, "result": "Low"}]}
        ]
    });
    assert!(!validator.is_valid(&document));
}

#[test]
fn domain_rules_schema_rejects_zero_domain_ids() {
    let validator = compile(&domain_rules_schema());
    let document = json!({"domains": [{"domain": 0, "rules": []}]});
    assert!(!validator.is_valid(&document));
}

#[test]
fn domain_rules_schema_rejects_empty_question_ids() {
    let validator = compile(&domain_rules_schema());
    let document = json!({
        "domains": [
            {"domain": 1, "rules": [{"when": {"": {"in": ["Y"]}}, "result": "Low"}]}
        ]
    });
    assert!(!validator.is_valid(&document));
}

// ============================================================================
// SECTION: Global Rules Schema
// ============================================================================

#[test]
fn global_rules_schema_compiles() {
    compile(&global_rules_schema());
}

#[test]
fn global_rules_schema_accepts_all_three_lists() {
    let validator = compile(&global_rules_schema());
    let document = json!({
        "global": {
            "high_if": [ { "any_domain": "High" } ],
            "some_concerns_if": [ { "any_domain": "Some concerns" } ],
            "low_if": [ { "all_domains": "Low" } ]
        }
    });
    assert!(validator.is_valid(&document));
}

#[test]
fn global_rules_schema_accepts_an_empty_section() {
    let validator = compile(&global_rules_schema());
    assert!(validator.is_valid(&json!({"global": {}})));
}

#[test]
fn global_rules_schema_rejects_a_missing_section() {
    let validator = compile(&global_rules_schema());
    assert!(!validator.is_valid(&json!({})));
}

#[test]
fn global_rules_schema_rejects_mismatched_condition_keys() {
    let validator = compile(&global_rules_schema());
    let document = json!({"global": {"low_if": [ { "any_domain": "Low" } ]}});
    assert!(!validator.is_valid(&document));
}

#[test]
fn global_rules_schema_rejects_blank_targets() {
    let validator = compile(&global_rules_schema());
    let document = json!({"global": {"high_if": [ { "any_domain": "" } ]}});
    assert!(!validator.is_valid(&document));
}
