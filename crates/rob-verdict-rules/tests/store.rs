// crates/rob-verdict-rules/tests/store.rs
//! Unit tests for the cached rule store.
// ============================================================================
// Module: Rule Store Tests
// Description: Tests for builtin documents, caching, and load warnings.
// ============================================================================
//! ## Overview
//! Verifies that the embedded default documents load and validate cleanly,
//! that the lazy store parses at most once (including under concurrent first
//! access) and caches failures, and that tolerated configuration smells
//! surface through the store's warning list.

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

use std::io::Write;
use std::thread;

use rob_verdict_core::DomainId;
use rob_verdict_core::RuleSetWarning;
use rob_verdict_rules::ConfigError;
use rob_verdict_rules::LazyRuleStore;
use rob_verdict_rules::RuleSources;
use rob_verdict_rules::RuleStore;
use tempfile::NamedTempFile;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Writes content to a fresh temporary file.
fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ============================================================================
// SECTION: Builtin Documents
// ============================================================================

#[test]
fn builtin_documents_load_and_validate() {
    let store = RuleStore::builtin().unwrap();
    assert_eq!(store.domain_rules().len(), 5);
    assert!(store.warnings().is_empty());
    assert_eq!(store.global_rules().high_if.len(), 1);
    assert_eq!(store.global_rules().some_concerns_if.len(), 1);
    assert_eq!(store.global_rules().low_if.len(), 1);
}

#[test]
fn builtin_documents_cover_the_reference_domains() {
    let store = RuleStore::builtin().unwrap();
    for domain in 1 ..= 5 {
        let rules = store.domain_rules().rules_for(DomainId::new(domain));
        assert!(!rules.is_empty(), "domain {domain} has no rules");
        assert!(rules.iter().any(|rule| rule.is_default), "domain {domain} has no default rule");
    }
}

// ============================================================================
// SECTION: Warnings
// ============================================================================

#[test]
fn duplicate_default_rules_surface_as_warnings() {
    let domains = r#"{
        "domains": [
            {
                "domain": 1,
                "rules": [
                    {"result": "Some concerns", "default": true},
                    {"result": "High", "default": true}
                ]
            }
        ]
    }"#;

    let store = RuleStore::from_json(domains, r#"{"global": {}}"#).unwrap();

    assert_eq!(store.warnings(), &[RuleSetWarning::DuplicateDefault {
        domain: DomainId::new(1),
        position: 1,
    }]);
}

// ============================================================================
// SECTION: Lazy Store
// ============================================================================

#[test]
fn lazy_store_parses_once_and_returns_the_same_store() {
    let domain =
        temp_file(r#"{"domains": [{"domain": 1, "rules": [{"result": "Low", "default": true}]}]}"#);
    let global = temp_file(r#"{"global": {}}"#);
    let sources = RuleSources::from_paths(domain.path(), global.path()).unwrap();
    let lazy = LazyRuleStore::new(sources);

    let first = lazy.get().unwrap();
    let second = lazy.get().unwrap();

    assert!(std::ptr::eq(first, second));
}

#[test]
fn lazy_store_caches_load_failures() {
    let sources =
        RuleSources::from_paths("missing-domain-rules.json", "missing-global-rules.json").unwrap();
    let lazy = LazyRuleStore::new(sources);

    let first = lazy.get().unwrap_err();
    let second = lazy.get().unwrap_err();

    assert!(matches!(first, ConfigError::Io(_)));
    assert_eq!(first, second);
}

#[test]
fn lazy_store_is_safe_under_concurrent_first_access() {
    let domain =
        temp_file(r#"{"domains": [{"domain": 1, "rules": [{"result": "Low", "default": true}]}]}"#);
    let global = temp_file(r#"{"global": {}}"#);
    let sources = RuleSources::from_paths(domain.path(), global.path()).unwrap();
    let lazy = LazyRuleStore::new(sources);

    thread::scope(|scope| {
        let handles: Vec<_> = (0 .. 8).map(|_| scope.spawn(|| lazy.get())).collect();
        let stores: Vec<&RuleStore> =
            handles.into_iter().map(|handle| handle.join().unwrap().unwrap()).collect();
        assert!(stores.windows(2).all(|pair| std::ptr::eq(pair[0], pair[1])));
    });
}

// ============================================================================
// SECTION: Source Resolution
// ============================================================================

#[test]
fn resolve_prefers_explicit_paths() {
    let sources = RuleSources::resolve(
        Some(std::path::Path::new("custom-domain.json")),
        Some(std::path::Path::new("custom-global.json")),
    )
    .unwrap();

    assert_eq!(sources.domain_rules(), std::path::Path::new("custom-domain.json"));
    assert_eq!(sources.global_rules(), std::path::Path::new("custom-global.json"));
}
