// crates/rob-verdict-core/src/runtime/domain.rs
// ============================================================================
// Module: Verdict Domain Evaluation
// Description: First-match-wins evaluation of a domain's decision rules.
// Purpose: Produce a deterministic per-domain judgement with provenance.
// Dependencies: crate::core, crate::runtime::condition
// ============================================================================

//! ## Overview
//! Domain evaluation walks the domain's rules in declaration order, skipping
//! (but remembering) the rule flagged as default. The first non-default rule
//! whose `when` clause is fully satisfied decides the judgement; otherwise
//! the default rule applies; otherwise a fixed conservative fallback. The
//! evaluator is total: every input yields a judgement, never an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::AnswerSet;
use crate::core::DomainId;
use crate::core::DomainRuleSet;
use crate::core::Judgement;
use crate::runtime::condition::when_clause_matches;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Rationale attached to the fixed fallback judgement.
pub const NO_RULE_RATIONALE: &str = "No decision rule applied to this domain.";

// ============================================================================
// SECTION: Evaluation Output
// ============================================================================

/// Provenance of a domain judgement.
///
/// # Invariants
/// - Positions are zero-based indexes into the domain's declared rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchSource {
    /// A non-default rule matched.
    Rule {
        /// Position of the matching rule.
        position: usize,
    },
    /// No rule matched; the domain's default rule applied.
    DefaultRule {
        /// Position of the default rule.
        position: usize,
    },
    /// No rule matched and no default exists; the fixed fallback applied.
    Fallback,
}

/// Domain evaluation output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainJudgement {
    /// Judgement decided for the domain.
    pub judgement: Judgement,
    /// Justification attached to the matched rule (possibly empty).
    pub rationale: String,
    /// Which rule decided the judgement.
    pub source: MatchSource,
}

// ============================================================================
// SECTION: Domain Evaluator
// ============================================================================

/// Evaluates answer sets against a domain rule set.
pub struct DomainEvaluator<'a> {
    /// Rule set the evaluator reads from.
    rules: &'a DomainRuleSet,
}

impl<'a> DomainEvaluator<'a> {
    /// Creates an evaluator over the provided rule set.
    #[must_use]
    pub const fn new(rules: &'a DomainRuleSet) -> Self {
        Self {
            rules,
        }
    }

    /// Returns the underlying rule set.
    #[must_use]
    pub const fn rules(&self) -> &'a DomainRuleSet {
        self.rules
    }

    /// Evaluates a domain's rules against the recorded answers.
    ///
    /// Unknown domain identifiers evaluate against an empty rule list, so the
    /// result is the fixed fallback rather than an error.
    #[must_use]
    pub fn evaluate(&self, domain: DomainId, answers: &AnswerSet) -> DomainJudgement {
        let mut default_rule = None;
        for (position, rule) in self.rules.rules_for(domain).iter().enumerate() {
            if rule.is_default {
                if default_rule.is_none() {
                    default_rule = Some((position, rule));
                }
                continue;
            }
            if when_clause_matches(&rule.when, answers) {
                return DomainJudgement {
                    judgement: rule.result.clone(),
                    rationale: rule.rationale.clone().unwrap_or_default(),
                    source: MatchSource::Rule {
                        position,
                    },
                };
            }
        }

        if let Some((position, rule)) = default_rule {
            return DomainJudgement {
                judgement: rule.result.clone(),
                rationale: rule.rationale.clone().unwrap_or_default(),
                source: MatchSource::DefaultRule {
                    position,
                },
            };
        }

        DomainJudgement {
            judgement: Judgement::some_concerns(),
            rationale: NO_RULE_RATIONALE.to_string(),
            source: MatchSource::Fallback,
        }
    }
}
