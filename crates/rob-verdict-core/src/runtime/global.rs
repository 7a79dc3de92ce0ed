// crates/rob-verdict-core/src/runtime/global.rs
// ============================================================================
// Module: Verdict Global Aggregation
// Description: Fixed-priority aggregation of per-domain judgements.
// Purpose: Produce the overall judgement for an assessment deterministically.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Global aggregation filters out not-applicable judgements, then evaluates
//! the three condition lists in fixed priority: any domain at the `high_if`
//! target raises the overall judgement to high; any domain at a
//! `some_concerns_if` target settles on some concerns; all domains at a
//! `low_if` target yield low. Anything else, including an empty or all-NA
//! input, falls back to the conservative some-concerns judgement.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::GlobalRuleSet;
use crate::core::Judgement;

// ============================================================================
// SECTION: Global Aggregator
// ============================================================================

/// Aggregates per-domain judgements into one overall judgement.
pub struct GlobalAggregator<'a> {
    /// Aggregation rule set the aggregator reads from.
    rules: &'a GlobalRuleSet,
}

impl<'a> GlobalAggregator<'a> {
    /// Creates an aggregator over the provided rule set.
    #[must_use]
    pub const fn new(rules: &'a GlobalRuleSet) -> Self {
        Self {
            rules,
        }
    }

    /// Returns the underlying rule set.
    #[must_use]
    pub const fn rules(&self) -> &'a GlobalRuleSet {
        self.rules
    }

    /// Aggregates domain judgements in domain order into one judgement.
    ///
    /// Not-applicable entries are dropped before evaluation; an empty
    /// remainder yields the conservative fallback.
    #[must_use]
    pub fn aggregate(&self, judgements: &[Judgement]) -> Judgement {
        let considered: Vec<&Judgement> =
            judgements.iter().filter(|judgement| !judgement.is_not_applicable()).collect();
        if considered.is_empty() {
            return Judgement::some_concerns();
        }

        for condition in &self.rules.high_if {
            if considered.iter().any(|judgement| judgement.is_equivalent_to(&condition.target)) {
                return Judgement::high();
            }
        }
        for condition in &self.rules.some_concerns_if {
            if considered.iter().any(|judgement| judgement.is_equivalent_to(&condition.target)) {
                return Judgement::some_concerns();
            }
        }
        for condition in &self.rules.low_if {
            if considered.iter().all(|judgement| judgement.is_equivalent_to(&condition.target)) {
                return Judgement::low();
            }
        }

        Judgement::some_concerns()
    }
}
