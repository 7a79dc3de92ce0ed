// crates/rob-verdict-rules/src/documents.rs
// ============================================================================
// Module: Rule Documents
// Description: JSON document model for the two externally-authored rule files.
// Purpose: Strict deserialization envelopes converted into core rule sets.
// Dependencies: rob-verdict-core, serde, thiserror
// ============================================================================

//! ## Overview
//! Two documents drive the engine: the domain rules document (a list of
//! per-domain entries, each carrying an ordered rule list) and the global
//! rules document (three optional aggregation condition lists). Both parse
//! strictly: unknown fields and unknown answer tokens are rejected, and
//! duplicate domain entries are a conversion error rather than a silent
//! last-wins overwrite.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use rob_verdict_core::DomainId;
use rob_verdict_core::DomainRule;
use rob_verdict_core::DomainRuleSet;
use rob_verdict_core::GlobalRuleSet;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Domain Rules Document
// ============================================================================

/// Top-level domain rules document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainRulesDocument {
    /// Per-domain rule entries in document order.
    pub domains: Vec<DomainRulesEntry>,
}

/// One per-domain entry in the domain rules document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainRulesEntry {
    /// Domain identifier the rules belong to.
    pub domain: DomainId,
    /// Ordered decision rules for the domain.
    pub rules: Vec<DomainRule>,
}

impl DomainRulesDocument {
    /// Converts the document into the core rule set.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::DuplicateDomain`] when two entries share a
    /// domain identifier.
    pub fn into_rule_set(self) -> Result<DomainRuleSet, DocumentError> {
        let mut domains = BTreeMap::new();
        for entry in self.domains {
            if domains.insert(entry.domain, entry.rules).is_some() {
                return Err(DocumentError::DuplicateDomain {
                    domain: entry.domain,
                });
            }
        }
        Ok(DomainRuleSet::new(domains))
    }
}

// ============================================================================
// SECTION: Global Rules Document
// ============================================================================

/// Top-level global rules document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalRulesDocument {
    /// Aggregation condition lists; absent lists default to empty.
    pub global: GlobalRuleSet,
}

impl GlobalRulesDocument {
    /// Converts the document into the core rule set.
    #[must_use]
    pub fn into_rule_set(self) -> GlobalRuleSet {
        self.global
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Document conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Two entries in the domain rules document share a domain identifier.
    #[error("duplicate entry for domain {domain}")]
    DuplicateDomain {
        /// The duplicated domain identifier.
        domain: DomainId,
    },
}
