// crates/rob-verdict-core/tests/judgement_lexicon.rs
//! Unit tests for judgement label classification.
// ============================================================================
// Module: Judgement Lexicon Tests
// Description: Tests for label classification, equivalence, and serde forms.
// ============================================================================
//! ## Overview
//! Verifies the lexicon mapping from display labels to canonical classes,
//! including Portuguese synonyms and accent folding, the equivalence rules
//! used by aggregation, and the transparent string serialization of
//! judgement values.

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

use rob_verdict_core::Judgement;
use rob_verdict_core::JudgementClass;
use serde_json::json;

// ============================================================================
// SECTION: Classification
// ============================================================================

#[test]
fn english_labels_classify() {
    assert_eq!(JudgementClass::classify("Low"), JudgementClass::Low);
    assert_eq!(JudgementClass::classify("Some concerns"), JudgementClass::SomeConcerns);
    assert_eq!(JudgementClass::classify("High"), JudgementClass::High);
    assert_eq!(JudgementClass::classify("Not applicable"), JudgementClass::NotApplicable);
}

#[test]
fn portuguese_labels_classify() {
    assert_eq!(JudgementClass::classify("Baixo"), JudgementClass::Low);
    assert_eq!(JudgementClass::classify("Algumas preocupações"), JudgementClass::SomeConcerns);
    assert_eq!(JudgementClass::classify("Alto"), JudgementClass::High);
    assert_eq!(JudgementClass::classify("Não aplicável"), JudgementClass::NotApplicable);
}

#[test]
fn classification_ignores_case_and_surrounding_whitespace() {
    assert_eq!(JudgementClass::classify("  LOW  "), JudgementClass::Low);
    assert_eq!(JudgementClass::classify("ALGUMAS PREOCUPAÇÕES"), JudgementClass::SomeConcerns);
    assert_eq!(JudgementClass::classify("n/a"), JudgementClass::NotApplicable);
}

#[test]
fn unknown_labels_classify_as_unrecognized() {
    assert_eq!(JudgementClass::classify("Critical"), JudgementClass::Unrecognized);
    assert_eq!(JudgementClass::classify(""), JudgementClass::Unrecognized);
}

// ============================================================================
// SECTION: Equivalence
// ============================================================================

#[test]
fn recognized_judgements_compare_by_class_across_languages() {
    assert!(Judgement::new("Baixo").is_equivalent_to(&Judgement::new("Low")));
    assert!(Judgement::new("Alto").is_equivalent_to(&Judgement::high()));
    assert!(!Judgement::new("Baixo").is_equivalent_to(&Judgement::high()));
}

#[test]
fn unrecognized_judgements_compare_by_normalized_label() {
    assert!(Judgement::new("Critical").is_equivalent_to(&Judgement::new("critical")));
    assert!(!Judgement::new("Critical").is_equivalent_to(&Judgement::new("Moderate")));
}

#[test]
fn recognized_and_unrecognized_labels_do_not_cross_match() {
    assert!(!Judgement::new("Low").is_equivalent_to(&Judgement::new("Lowest")));
}

// ============================================================================
// SECTION: Display and Serde
// ============================================================================

#[test]
fn display_preserves_the_document_label() {
    let judgement = Judgement::new("Algumas preocupações");
    assert_eq!(judgement.to_string(), "Algumas preocupações");
    assert_eq!(judgement.label(), "Algumas preocupações");
    assert_eq!(judgement.class(), JudgementClass::SomeConcerns);
}

#[test]
fn judgements_serialize_as_plain_labels() {
    let judgement = Judgement::new("Baixo");
    assert_eq!(serde_json::to_value(&judgement).unwrap(), json!("Baixo"));
}

#[test]
fn judgements_deserialize_from_plain_labels_with_classification() {
    let judgement: Judgement = serde_json::from_value(json!("Alto")).unwrap();
    assert_eq!(judgement.label(), "Alto");
    assert_eq!(judgement.class(), JudgementClass::High);
}
