// crates/rob-verdict-core/src/core/answers.rs
// ============================================================================
// Module: Verdict Answer Model
// Description: Questionnaire answer codes and per-result answer sets.
// Purpose: Provide the closed answer vocabulary consumed by rule evaluation.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Answer codes form the closed vocabulary of questionnaire responses
//! (`Y`/`PY`/`PN`/`N`/`NI`/`NA`). Rule documents and caller-supplied answer
//! sets both use these tokens; unknown tokens are rejected at the boundary
//! rather than silently accepted. A question absent from an answer set means
//! "no answer provided", which is distinct from an explicit `NI` or `NA`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::QuestionId;

// ============================================================================
// SECTION: Answer Codes
// ============================================================================

/// Questionnaire answer code.
///
/// # Invariants
/// - Variants serialize as the stable instrument tokens (`Y`, `PY`, `PN`,
///   `N`, `NI`, `NA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnswerCode {
    /// Yes.
    #[serde(rename = "Y")]
    Yes,
    /// Probably yes.
    #[serde(rename = "PY")]
    ProbablyYes,
    /// Probably no.
    #[serde(rename = "PN")]
    ProbablyNo,
    /// No.
    #[serde(rename = "N")]
    No,
    /// No information.
    #[serde(rename = "NI")]
    NoInformation,
    /// Not applicable.
    #[serde(rename = "NA")]
    NotApplicable,
}

impl AnswerCode {
    /// All answer codes in stable instrument order.
    pub const ALL: [Self; 6] = [
        Self::Yes,
        Self::ProbablyYes,
        Self::ProbablyNo,
        Self::No,
        Self::NoInformation,
        Self::NotApplicable,
    ];

    /// Returns the stable instrument token for the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Y",
            Self::ProbablyYes => "PY",
            Self::ProbablyNo => "PN",
            Self::No => "N",
            Self::NoInformation => "NI",
            Self::NotApplicable => "NA",
        }
    }

    /// Returns true when the code carries no usable information (`NI`/`NA`).
    #[must_use]
    pub const fn is_uninformative(self) -> bool {
        matches!(self, Self::NoInformation | Self::NotApplicable)
    }
}

impl fmt::Display for AnswerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an answer token is not part of the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown answer code: {token}")]
pub struct ParseAnswerCodeError {
    /// The rejected token.
    pub token: String,
}

impl FromStr for AnswerCode {
    type Err = ParseAnswerCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Y" => Ok(Self::Yes),
            "PY" => Ok(Self::ProbablyYes),
            "PN" => Ok(Self::ProbablyNo),
            "N" => Ok(Self::No),
            "NI" => Ok(Self::NoInformation),
            "NA" => Ok(Self::NotApplicable),
            other => Err(ParseAnswerCodeError {
                token: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// SECTION: Answer Sets
// ============================================================================

/// Mapping from question identifier to the recorded answer code.
///
/// # Invariants
/// - Keys are unique; a question absent from the mapping is unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<QuestionId, AnswerCode>);

impl AnswerSet {
    /// Creates an empty answer set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Records an answer, replacing any previous answer for the question.
    pub fn record(&mut self, question: QuestionId, answer: AnswerCode) {
        self.0.insert(question, answer);
    }

    /// Returns the answer for a question, or `None` when unanswered.
    #[must_use]
    pub fn answer(&self, question: &QuestionId) -> Option<AnswerCode> {
        self.0.get(question).copied()
    }

    /// Returns the number of answered questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no question has been answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates answered questions in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, AnswerCode)> {
        self.0.iter().map(|(question, answer)| (question, *answer))
    }
}

impl FromIterator<(QuestionId, AnswerCode)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, AnswerCode)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
