// crates/rob-verdict-core/src/core/rules.rs
// ============================================================================
// Module: Verdict Rule Model
// Description: Domain decision rules and global aggregation rules.
// Purpose: Define canonical rule structures with validation helpers.
// Dependencies: crate::core::{answers, identifiers, judgement}, serde, thiserror
// ============================================================================

//! ## Overview
//! Decision rules are externally authored data, not code. A domain rule set
//! maps each bias domain to an ordered rule list evaluated first-match-wins;
//! the global rule set holds three prioritized condition lists evaluated over
//! the per-domain judgements. Rule sets are validated once at load time:
//! structural violations are errors, while tolerated configuration smells
//! (such as several rules flagged as default) surface as warnings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::answers::AnswerCode;
use crate::core::identifiers::DomainId;
use crate::core::identifiers::QuestionId;
use crate::core::judgement::Judgement;

// ============================================================================
// SECTION: Conditions
// ============================================================================

/// Predicate attached to one question identifier within a rule.
///
/// # Invariants
/// - All present clauses must hold for the condition to be satisfied.
/// - A condition with no clauses is satisfied by any recorded answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerCondition {
    /// Allowed answer codes (`in` clause).
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<AnswerCode>>,
    /// Forbidden answer codes (`not_in` clause).
    #[serde(rename = "not_in", default, skip_serializing_if = "Option::is_none")]
    pub forbidden: Option<Vec<AnswerCode>>,
    /// Single required answer code (`equals` clause).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<AnswerCode>,
    /// Single forbidden answer code (`not_equals` clause).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<AnswerCode>,
}

impl AnswerCondition {
    /// Returns a condition requiring the answer to be in the given set.
    #[must_use]
    pub fn any_of(codes: impl Into<Vec<AnswerCode>>) -> Self {
        Self {
            allowed: Some(codes.into()),
            ..Self::default()
        }
    }

    /// Returns true when the condition has no clauses, in which case any
    /// recorded answer satisfies it.
    #[must_use]
    pub const fn is_vacuous(&self) -> bool {
        self.allowed.is_none()
            && self.forbidden.is_none()
            && self.equals.is_none()
            && self.not_equals.is_none()
    }

    /// Returns true when the `in` set explicitly admits uninformative codes,
    /// which is what lets a rule match an unanswered question.
    #[must_use]
    pub fn admits_missing(&self) -> bool {
        self.allowed
            .as_ref()
            .is_some_and(|codes| codes.iter().any(|code| code.is_uninformative()))
    }
}

// ============================================================================
// SECTION: Domain Rules
// ============================================================================

/// One decision rule within a bias domain.
///
/// # Invariants
/// - Rule order within a domain is significant; the first match wins.
/// - An empty `when` map matches every answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainRule {
    /// Conditions keyed by question identifier, all of which must hold.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub when: BTreeMap<QuestionId, AnswerCondition>,
    /// Judgement produced when the rule matches.
    pub result: Judgement,
    /// Free-text justification attached to the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    /// Marks the fallback rule used when no other rule matches.
    #[serde(rename = "default", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}

/// Ordered decision rules keyed by bias domain.
///
/// # Invariants
/// - Rule vectors preserve document declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainRuleSet {
    /// Rules per domain in declaration order.
    domains: BTreeMap<DomainId, Vec<DomainRule>>,
}

/// Empty rule slice returned for unknown domain identifiers.
const NO_RULES: &[DomainRule] = &[];

impl DomainRuleSet {
    /// Creates a rule set from per-domain rule lists.
    #[must_use]
    pub const fn new(domains: BTreeMap<DomainId, Vec<DomainRule>>) -> Self {
        Self {
            domains,
        }
    }

    /// Returns the ordered rules for a domain, or an empty slice when the
    /// domain is unknown.
    #[must_use]
    pub fn rules_for(&self, domain: DomainId) -> &[DomainRule] {
        self.domains.get(&domain).map_or(NO_RULES, Vec::as_slice)
    }

    /// Iterates the configured domain identifiers in ascending order.
    pub fn domain_ids(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.domains.keys().copied()
    }

    /// Returns the number of configured domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Returns true when no domain has rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Validates structural invariants, returning tolerated smells as
    /// warnings.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError`] when a rule violates a hard invariant.
    pub fn validate(&self) -> Result<Vec<RuleSetWarning>, RuleSetError> {
        let mut warnings = Vec::new();
        for (&domain, rules) in &self.domains {
            let mut default_seen = false;
            for (position, rule) in rules.iter().enumerate() {
                if rule.result.label().trim().is_empty() {
                    return Err(RuleSetError::EmptyResultLabel {
                        domain,
                        position,
                    });
                }
                if rule.is_default {
                    if default_seen {
                        warnings.push(RuleSetWarning::DuplicateDefault {
                            domain,
                            position,
                        });
                    }
                    default_seen = true;
                    if !rule.when.is_empty() {
                        warnings.push(RuleSetWarning::DefaultRuleHasConditions {
                            domain,
                            position,
                        });
                    }
                }
                for (question, condition) in &rule.when {
                    if condition.allowed.as_ref().is_some_and(Vec::is_empty) {
                        warnings.push(RuleSetWarning::EmptyAllowedSet {
                            domain,
                            position,
                            question: question.clone(),
                        });
                    }
                }
            }
        }
        Ok(warnings)
    }
}

// ============================================================================
// SECTION: Global Rules
// ============================================================================

/// Aggregation condition matching any domain judgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnyDomainCondition {
    /// Target judgement searched for across the domain judgements.
    #[serde(rename = "any_domain")]
    pub target: Judgement,
}

/// Aggregation condition matching all domain judgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllDomainsCondition {
    /// Target judgement every domain judgement must equal.
    #[serde(rename = "all_domains")]
    pub target: Judgement,
}

/// Global aggregation rule set with fixed-priority condition lists.
///
/// # Invariants
/// - Lists are evaluated in `high_if`, `some_concerns_if`, `low_if` order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalRuleSet {
    /// Conditions that raise the overall judgement to high risk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub high_if: Vec<AnyDomainCondition>,
    /// Conditions that settle the overall judgement on some concerns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub some_concerns_if: Vec<AnyDomainCondition>,
    /// Conditions requiring every domain judgement to match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub low_if: Vec<AllDomainsCondition>,
}

impl GlobalRuleSet {
    /// Validates the aggregation targets.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError`] when a target label is blank.
    pub fn validate(&self) -> Result<(), RuleSetError> {
        validate_targets("high_if", self.high_if.iter().map(|cond| &cond.target))?;
        validate_targets("some_concerns_if", self.some_concerns_if.iter().map(|cond| &cond.target))?;
        validate_targets("low_if", self.low_if.iter().map(|cond| &cond.target))?;
        Ok(())
    }
}

/// Ensures aggregation targets carry non-blank labels.
fn validate_targets<'a>(
    list: &'static str,
    targets: impl Iterator<Item = &'a Judgement>,
) -> Result<(), RuleSetError> {
    for (position, target) in targets.enumerate() {
        if target.label().trim().is_empty() {
            return Err(RuleSetError::EmptyTargetLabel {
                list,
                position,
            });
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Errors and Warnings
// ============================================================================

/// Rule set validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    /// A rule result label is blank.
    #[error("rule {position} for domain {domain} has a blank result label")]
    EmptyResultLabel {
        /// Domain owning the offending rule.
        domain: DomainId,
        /// Zero-based rule position within the domain.
        position: usize,
    },
    /// A global aggregation target label is blank.
    #[error("condition {position} in {list} has a blank target label")]
    EmptyTargetLabel {
        /// Name of the aggregation list.
        list: &'static str,
        /// Zero-based condition position within the list.
        position: usize,
    },
}

/// Tolerated configuration smells reported at load time.
///
/// # Invariants
/// - Warnings never change evaluation behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSetWarning {
    /// More than one rule is flagged as default; the first one wins.
    DuplicateDefault {
        /// Domain owning the extra default rule.
        domain: DomainId,
        /// Zero-based position of the ignored default rule.
        position: usize,
    },
    /// A default rule carries conditions, which are never evaluated.
    DefaultRuleHasConditions {
        /// Domain owning the rule.
        domain: DomainId,
        /// Zero-based rule position within the domain.
        position: usize,
    },
    /// An `in` clause with an empty set can never be satisfied.
    EmptyAllowedSet {
        /// Domain owning the rule.
        domain: DomainId,
        /// Zero-based rule position within the domain.
        position: usize,
        /// Question the unsatisfiable condition is attached to.
        question: QuestionId,
    },
}

impl fmt::Display for RuleSetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDefault {
                domain,
                position,
            } => {
                write!(f, "domain {domain}: rule {position} is an extra default rule (first default wins)")
            }
            Self::DefaultRuleHasConditions {
                domain,
                position,
            } => {
                write!(f, "domain {domain}: default rule {position} has conditions that are never evaluated")
            }
            Self::EmptyAllowedSet {
                domain,
                position,
                question,
            } => {
                write!(f, "domain {domain}: rule {position} has an empty `in` set for question {question}")
            }
        }
    }
}
