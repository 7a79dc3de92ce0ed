// crates/rob-verdict-core/src/runtime/condition.rs
// ============================================================================
// Module: Verdict Condition Matching
// Description: Condition evaluation against recorded answers.
// Purpose: Decide conjunctive clause satisfaction with explicit missing-answer
//          semantics.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A condition is a conjunction of clauses over one question's answer. An
//! unanswered question satisfies a condition only when the `in` clause
//! explicitly admits uninformative codes (`NI`/`NA`); no information is not
//! evidence of absence, so every other clause, and a condition with no
//! clauses at all, fails against a missing answer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::AnswerCode;
use crate::core::AnswerCondition;
use crate::core::AnswerSet;
use crate::core::QuestionId;

// ============================================================================
// SECTION: Condition Matching
// ============================================================================

/// Evaluates one condition against the recorded answer for its question.
#[must_use]
pub fn condition_matches(condition: &AnswerCondition, answer: Option<AnswerCode>) -> bool {
    let Some(answer) = answer else {
        return condition.admits_missing();
    };

    if condition.allowed.as_ref().is_some_and(|allowed| !allowed.contains(&answer)) {
        return false;
    }
    if condition.forbidden.as_ref().is_some_and(|forbidden| forbidden.contains(&answer)) {
        return false;
    }
    if condition.equals.is_some_and(|required| answer != required) {
        return false;
    }
    if condition.not_equals.is_some_and(|rejected| answer == rejected) {
        return false;
    }
    true
}

/// Evaluates a rule's `when` clause against an answer set.
///
/// An empty clause matches every answer set.
#[must_use]
pub fn when_clause_matches(
    when: &BTreeMap<QuestionId, AnswerCondition>,
    answers: &AnswerSet,
) -> bool {
    when.iter().all(|(question, condition)| {
        condition_matches(condition, answers.answer(question))
    })
}
