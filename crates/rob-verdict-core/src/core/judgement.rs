// crates/rob-verdict-core/src/core/judgement.rs
// ============================================================================
// Module: Verdict Judgement Model
// Description: Judgement values, canonical classes, and the label lexicon.
// Purpose: Map free-form rule-document labels onto a closed judgement set.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Rule documents carry judgement labels as display strings, possibly
//! localized (the reference documents use Portuguese labels such as "Baixo"
//! and "Algumas preocupações"). The engine classifies every label onto a
//! closed set of canonical classes at construction time, so aggregation
//! comparisons are exhaustive and typo-resistant while the original display
//! string is preserved for callers. Labels the lexicon does not recognize
//! stay usable: they classify as [`JudgementClass::Unrecognized`] and compare
//! by normalized label instead of by class.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Canonical Labels
// ============================================================================

/// Canonical display label for a low-risk judgement.
pub const LOW_LABEL: &str = "Low";
/// Canonical display label for a some-concerns judgement.
pub const SOME_CONCERNS_LABEL: &str = "Some concerns";
/// Canonical display label for a high-risk judgement.
pub const HIGH_LABEL: &str = "High";
/// Canonical display label for a not-applicable judgement.
pub const NOT_APPLICABLE_LABEL: &str = "NA";

/// Lexicon entries recognized as low risk.
const LOW_SYNONYMS: [&str; 4] = ["low", "low risk", "baixo", "baixo risco"];
/// Lexicon entries recognized as some concerns.
const SOME_CONCERNS_SYNONYMS: [&str; 2] = ["some concerns", "algumas preocupacoes"];
/// Lexicon entries recognized as high risk.
const HIGH_SYNONYMS: [&str; 4] = ["high", "high risk", "alto", "alto risco"];
/// Lexicon entries recognized as not applicable.
const NOT_APPLICABLE_SYNONYMS: [&str; 4] = ["na", "n/a", "not applicable", "nao aplicavel"];

// ============================================================================
// SECTION: Judgement Classes
// ============================================================================

/// Canonical judgement class.
///
/// # Invariants
/// - Represents the closed set of judgement meanings used by aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgementClass {
    /// Low risk of bias.
    Low,
    /// Some concerns about bias.
    SomeConcerns,
    /// High risk of bias.
    High,
    /// Judgement does not apply (excluded from aggregation).
    NotApplicable,
    /// Label not present in the lexicon; compared by normalized label.
    Unrecognized,
}

impl JudgementClass {
    /// Classifies a display label via the built-in lexicon.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let normalized = normalize_label(label);
        if LOW_SYNONYMS.contains(&normalized.as_str()) {
            Self::Low
        } else if SOME_CONCERNS_SYNONYMS.contains(&normalized.as_str()) {
            Self::SomeConcerns
        } else if HIGH_SYNONYMS.contains(&normalized.as_str()) {
            Self::High
        } else if NOT_APPLICABLE_SYNONYMS.contains(&normalized.as_str()) {
            Self::NotApplicable
        } else {
            Self::Unrecognized
        }
    }
}

// ============================================================================
// SECTION: Judgement Values
// ============================================================================

/// Judgement value pairing the document display label with its class.
///
/// # Invariants
/// - `class` is always the lexicon classification of `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Judgement {
    /// Display label as written in the rule document.
    label: String,
    /// Canonical class assigned by the lexicon.
    class: JudgementClass,
}

impl Judgement {
    /// Creates a judgement from a display label, classifying it.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let class = JudgementClass::classify(&label);
        Self {
            label,
            class,
        }
    }

    /// Returns the canonical low-risk judgement.
    #[must_use]
    pub fn low() -> Self {
        Self::new(LOW_LABEL)
    }

    /// Returns the canonical some-concerns judgement.
    #[must_use]
    pub fn some_concerns() -> Self {
        Self::new(SOME_CONCERNS_LABEL)
    }

    /// Returns the canonical high-risk judgement.
    #[must_use]
    pub fn high() -> Self {
        Self::new(HIGH_LABEL)
    }

    /// Returns the canonical not-applicable judgement.
    #[must_use]
    pub fn not_applicable() -> Self {
        Self::new(NOT_APPLICABLE_LABEL)
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the canonical class.
    #[must_use]
    pub const fn class(&self) -> JudgementClass {
        self.class
    }

    /// Returns true when the judgement is excluded from aggregation.
    #[must_use]
    pub const fn is_not_applicable(&self) -> bool {
        matches!(self.class, JudgementClass::NotApplicable)
    }

    /// Returns true when two judgements denote the same outcome.
    ///
    /// Recognized judgements compare by class, so "Baixo" and "Low" are
    /// equivalent. When either side is unrecognized, comparison falls back to
    /// the normalized label.
    #[must_use]
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        if self.class == JudgementClass::Unrecognized || other.class == JudgementClass::Unrecognized
        {
            normalize_label(&self.label) == normalize_label(&other.label)
        } else {
            self.class == other.class
        }
    }
}

impl fmt::Display for Judgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl From<String> for Judgement {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

impl From<&str> for Judgement {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<Judgement> for String {
    fn from(judgement: Judgement) -> Self {
        judgement.label
    }
}

// ============================================================================
// SECTION: Label Normalization
// ============================================================================

/// Normalizes a label for lexicon lookup and fallback comparison.
fn normalize_label(label: &str) -> String {
    label.trim().chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

/// Folds the accented characters used by the supported lexicon languages.
const fn fold_accent(c: char) -> char {
    match c {
        'á' | 'â' | 'ã' | 'à' => 'a',
        'ç' => 'c',
        'é' | 'ê' => 'e',
        'í' => 'i',
        'ó' | 'ô' | 'õ' => 'o',
        'ú' => 'u',
        other => other,
    }
}
