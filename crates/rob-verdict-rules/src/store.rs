// crates/rob-verdict-rules/src/store.rs
// ============================================================================
// Module: Rule Store
// Description: Rule document loading, validation, and process-wide caching.
// Purpose: Provide strict, fail-closed rule parsing with one-time lazy init.
// Dependencies: rob-verdict-core, crate::{documents, schema}, jsonschema,
// serde_json, thiserror
// ============================================================================

//! ## Overview
//! Rule documents are loaded from disk with strict size and path limits,
//! validated against the canonical JSON Schemas, converted into core rule
//! sets, and structurally validated. Any failure is a single fatal
//! [`ConfigError`]; a process cannot safely serve judgements without valid
//! rules. A loaded [`RuleStore`] is immutable for the process lifetime and
//! [`LazyRuleStore`] guards the one-time load against concurrent first
//! access. There is no invalidation: picking up rule-document edits requires
//! a restart.
//!
//! Rule documents are untrusted input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use jsonschema::Draft;
use jsonschema::Validator;
use rob_verdict_core::DomainEvaluator;
use rob_verdict_core::DomainRuleSet;
use rob_verdict_core::GlobalAggregator;
use rob_verdict_core::GlobalRuleSet;
use rob_verdict_core::RuleSetWarning;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::documents::DomainRulesDocument;
use crate::documents::GlobalRulesDocument;
use crate::schema::domain_rules_schema;
use crate::schema::global_rules_schema;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default domain rules filename when no path is specified.
const DEFAULT_DOMAIN_RULES_NAME: &str = "domain-rules.json";
/// Default global rules filename when no path is specified.
const DEFAULT_GLOBAL_RULES_NAME: &str = "global-rules.json";
/// Environment variable used to override the domain rules path.
pub(crate) const DOMAIN_RULES_ENV_VAR: &str = "ROB_VERDICT_DOMAIN_RULES";
/// Environment variable used to override the global rules path.
pub(crate) const GLOBAL_RULES_ENV_VAR: &str = "ROB_VERDICT_GLOBAL_RULES";
/// Maximum rule document size in bytes.
pub(crate) const MAX_RULES_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

/// Embedded default domain rules document.
const BUILTIN_DOMAIN_RULES: &str = include_str!("../rules/domain-rules.json");
/// Embedded default global rules document.
const BUILTIN_GLOBAL_RULES: &str = include_str!("../rules/global-rules.json");

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rule configuration errors, all fatal at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading a rule document.
    #[error("rules io error: {0}")]
    Io(String),
    /// JSON parsing or deserialization error.
    #[error("rules parse error: {0}")]
    Parse(String),
    /// Document rejected by the canonical schema.
    #[error("rules schema violation: {0}")]
    Schema(String),
    /// Invalid rule data.
    #[error("invalid rules: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Rule Sources
// ============================================================================

/// Resolved filesystem locations of the two rule documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSources {
    /// Path to the domain rules document.
    domain_rules: PathBuf,
    /// Path to the global rules document.
    global_rules: PathBuf,
}

impl RuleSources {
    /// Resolves document paths from explicit overrides, environment
    /// variables, or default filenames, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a resolved path violates length limits.
    pub fn resolve(
        domain_rules: Option<&Path>,
        global_rules: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let domain_rules =
            resolve_path(domain_rules, DOMAIN_RULES_ENV_VAR, DEFAULT_DOMAIN_RULES_NAME)?;
        let global_rules =
            resolve_path(global_rules, GLOBAL_RULES_ENV_VAR, DEFAULT_GLOBAL_RULES_NAME)?;
        Ok(Self {
            domain_rules,
            global_rules,
        })
    }

    /// Creates sources from explicit paths without environment resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a path violates length limits.
    pub fn from_paths(
        domain_rules: impl Into<PathBuf>,
        global_rules: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let domain_rules = domain_rules.into();
        let global_rules = global_rules.into();
        validate_path(&domain_rules)?;
        validate_path(&global_rules)?;
        Ok(Self {
            domain_rules,
            global_rules,
        })
    }

    /// Returns the domain rules document path.
    #[must_use]
    pub fn domain_rules(&self) -> &Path {
        &self.domain_rules
    }

    /// Returns the global rules document path.
    #[must_use]
    pub fn global_rules(&self) -> &Path {
        &self.global_rules
    }
}

// ============================================================================
// SECTION: Rule Store
// ============================================================================

/// Immutable parsed rule documents plus load-time warnings.
///
/// # Invariants
/// - Contents never change after construction; evaluation reads only.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleStore {
    /// Parsed and validated domain rule set.
    domain_rules: DomainRuleSet,
    /// Parsed and validated global rule set.
    global_rules: GlobalRuleSet,
    /// Tolerated configuration smells found at load time.
    warnings: Vec<RuleSetWarning>,
}

impl RuleStore {
    /// Loads and validates both rule documents from the resolved sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, schema validation, or
    /// structural validation fails.
    pub fn load(sources: &RuleSources) -> Result<Self, ConfigError> {
        let domain_content = read_rules_file(sources.domain_rules())?;
        let global_content = read_rules_file(sources.global_rules())?;
        Self::from_json(&domain_content, &global_content)
    }

    /// Builds a store from the embedded default rule documents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the embedded documents fail validation,
    /// which indicates a packaging defect.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(BUILTIN_DOMAIN_RULES, BUILTIN_GLOBAL_RULES)
    }

    /// Builds a store from in-memory document JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_json(domain_rules: &str, global_rules: &str) -> Result<Self, ConfigError> {
        let domain_doc: DomainRulesDocument =
            parse_document("domain rules", domain_rules, &domain_rules_schema())?;
        let global_doc: GlobalRulesDocument =
            parse_document("global rules", global_rules, &global_rules_schema())?;
        Self::from_documents(domain_doc, global_doc)
    }

    /// Builds a store from already-parsed documents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when conversion or structural validation
    /// fails.
    pub fn from_documents(
        domain_doc: DomainRulesDocument,
        global_doc: GlobalRulesDocument,
    ) -> Result<Self, ConfigError> {
        let domain_rules =
            domain_doc.into_rule_set().map_err(|err| ConfigError::Invalid(err.to_string()))?;
        let global_rules = global_doc.into_rule_set();
        let warnings =
            domain_rules.validate().map_err(|err| ConfigError::Invalid(err.to_string()))?;
        global_rules.validate().map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(Self {
            domain_rules,
            global_rules,
            warnings,
        })
    }

    /// Returns the domain rule set.
    #[must_use]
    pub const fn domain_rules(&self) -> &DomainRuleSet {
        &self.domain_rules
    }

    /// Returns the global rule set.
    #[must_use]
    pub const fn global_rules(&self) -> &GlobalRuleSet {
        &self.global_rules
    }

    /// Returns the load-time warnings.
    #[must_use]
    pub fn warnings(&self) -> &[RuleSetWarning] {
        &self.warnings
    }

    /// Returns a domain evaluator bound to this store's rules.
    #[must_use]
    pub const fn domain_evaluator(&self) -> DomainEvaluator<'_> {
        DomainEvaluator::new(&self.domain_rules)
    }

    /// Returns a global aggregator bound to this store's rules.
    #[must_use]
    pub const fn global_aggregator(&self) -> GlobalAggregator<'_> {
        GlobalAggregator::new(&self.global_rules)
    }
}

// ============================================================================
// SECTION: Lazy Store
// ============================================================================

/// One-time lazily initialized rule store.
///
/// # Invariants
/// - The load runs at most once per instance, even under concurrent first
///   access; the outcome (store or error) is cached for the process lifetime.
pub struct LazyRuleStore {
    /// Resolved document sources used for the one-time load.
    sources: RuleSources,
    /// Cached load outcome.
    cell: OnceLock<Result<RuleStore, ConfigError>>,
}

impl LazyRuleStore {
    /// Creates a lazy store over resolved sources without loading.
    #[must_use]
    pub const fn new(sources: RuleSources) -> Self {
        Self {
            sources,
            cell: OnceLock::new(),
        }
    }

    /// Returns the resolved sources.
    #[must_use]
    pub const fn sources(&self) -> &RuleSources {
        &self.sources
    }

    /// Returns the cached store, loading it on first access.
    ///
    /// # Errors
    ///
    /// Returns the cached [`ConfigError`] when the one-time load failed.
    pub fn get(&self) -> Result<&RuleStore, ConfigError> {
        self.cell.get_or_init(|| RuleStore::load(&self.sources)).as_ref().map_err(Clone::clone)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves one document path from override, environment, or default.
fn resolve_path(
    path: Option<&Path>,
    env_var: &str,
    default_name: &str,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        let resolved = path.to_path_buf();
        validate_path(&resolved)?;
        return Ok(resolved);
    }
    if let Ok(env_path) = env::var(env_var) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid(format!("{env_var} exceeds max path length")));
        }
        let resolved = PathBuf::from(env_path);
        validate_path(&resolved)?;
        return Ok(resolved);
    }
    Ok(PathBuf::from(default_name))
}

/// Validates a resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("rules path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("rules path component too long".to_string()));
        }
    }
    Ok(())
}

/// Reads a rule document with size and encoding limits.
fn read_rules_file(path: &Path) -> Result<String, ConfigError> {
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    if bytes.len() > MAX_RULES_FILE_SIZE {
        return Err(ConfigError::Invalid(format!(
            "{} exceeds rule document size limit",
            path.display()
        )));
    }
    String::from_utf8(bytes)
        .map_err(|_| ConfigError::Invalid(format!("{} must be utf-8", path.display())))
}

/// Parses a document: JSON parse, schema validation, then deserialization.
fn parse_document<T: DeserializeOwned>(
    label: &str,
    content: &str,
    schema: &Value,
) -> Result<T, ConfigError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|err| ConfigError::Parse(format!("{label}: {err}")))?;
    let validator = compile_schema(schema)?;
    let violations: Vec<String> =
        validator.iter_errors(&value).map(|err| err.to_string()).collect();
    if !violations.is_empty() {
        return Err(ConfigError::Schema(format!("{label}: {}", violations.join("; "))));
    }
    serde_json::from_value(value).map_err(|err| ConfigError::Parse(format!("{label}: {err}")))
}

/// Compiles a JSON Schema for validation.
fn compile_schema(schema: &Value) -> Result<Validator, ConfigError> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| ConfigError::Invalid(format!("invalid schema: {err}")))
}
