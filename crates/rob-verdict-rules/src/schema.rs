// crates/rob-verdict-rules/src/schema.rs
// ============================================================================
// Module: Rule Document Schemas
// Description: JSON Schema builders for the rule documents.
// Purpose: Provide canonical validation schemas for rule artifacts.
// Dependencies: rob-verdict-core, serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schemas for the domain rules document and the
//! global rules document. The schemas are generated from the canonical model
//! vocabulary (answer tokens come from [`AnswerCode::ALL`]) and are applied to
//! every document before deserialization, so malformed rules fail at load
//! time with a schema message instead of surfacing later as serde errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rob_verdict_core::AnswerCode;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Document Schemas
// ============================================================================

/// Returns the JSON Schema for the domain rules document.
#[must_use]
pub fn domain_rules_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "rob-verdict://schemas/domain-rules.schema.json",
        "title": "Risk-of-Bias Domain Decision Rules",
        "description": "Ordered per-domain decision rules evaluated first-match-wins.",
        "type": "object",
        "properties": {
            "domains": {
                "type": "array",
                "items": domain_entry_schema(),
            },
        },
        "required": ["domains"],
        "additionalProperties": false,
    })
}

/// Returns the JSON Schema for the global rules document.
#[must_use]
pub fn global_rules_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "rob-verdict://schemas/global-rules.schema.json",
        "title": "Risk-of-Bias Global Aggregation Rules",
        "description": "Prioritized aggregation conditions over domain judgements.",
        "type": "object",
        "properties": {
            "global": {
                "type": "object",
                "properties": {
                    "high_if": {
                        "type": "array",
                        "items": any_domain_condition_schema(),
                    },
                    "some_concerns_if": {
                        "type": "array",
                        "items": any_domain_condition_schema(),
                    },
                    "low_if": {
                        "type": "array",
                        "items": all_domains_condition_schema(),
                    },
                },
                "additionalProperties": false,
            },
        },
        "required": ["global"],
        "additionalProperties": false,
    })
}

// ============================================================================
// SECTION: Component Schemas
// ============================================================================

/// Returns the schema for one per-domain entry.
fn domain_entry_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "domain": {
                "type": "integer",
                "minimum": 1,
            },
            "rules": {
                "type": "array",
                "items": rule_schema(),
            },
        },
        "required": ["domain", "rules"],
        "additionalProperties": false,
    })
}

/// Returns the schema for one decision rule.
fn rule_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "when": {
                "type": "object",
                "propertyNames": {
                    "minLength": 1,
                },
                "additionalProperties": condition_schema(),
            },
            "result": {
                "type": "string",
                "minLength": 1,
            },
            "rationale": {
                "type": "string",
            },
            "default": {
                "type": "boolean",
            },
        },
        "required": ["result"],
        "additionalProperties": false,
    })
}

/// Returns the schema for one answer condition.
fn condition_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "in": {
                "type": "array",
                "items": answer_code_schema(),
            },
            "not_in": {
                "type": "array",
                "items": answer_code_schema(),
            },
            "equals": answer_code_schema(),
            "not_equals": answer_code_schema(),
        },
        "additionalProperties": false,
    })
}

/// Returns the schema for one any-domain aggregation condition.
fn any_domain_condition_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "any_domain": {
                "type": "string",
                "minLength": 1,
            },
        },
        "required": ["any_domain"],
        "additionalProperties": false,
    })
}

/// Returns the schema for one all-domains aggregation condition.
fn all_domains_condition_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "all_domains": {
                "type": "string",
                "minLength": 1,
            },
        },
        "required": ["all_domains"],
        "additionalProperties": false,
    })
}

/// Returns the closed answer token vocabulary as a schema enum.
fn answer_code_schema() -> Value {
    let tokens: Vec<Value> =
        AnswerCode::ALL.iter().map(|code| Value::String(code.as_str().to_string())).collect();
    json!({
        "type": "string",
        "enum": tokens,
    })
}
