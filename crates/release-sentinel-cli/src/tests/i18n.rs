// crates/release-sentinel-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Unit tests for catalog lookups and locale parsing.
// Purpose: Ensure CLI messages resolve and substitute deterministically.
// Dependencies: release-sentinel-cli i18n module
// ============================================================================

//! ## Overview
//! Verifies locale parsing is tolerant, placeholders are substituted, and
//! unknown keys fall back to the key itself.

use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::SUPPORTED_LOCALES;
use crate::i18n::catalog_for;
use crate::i18n::translate;

#[test]
fn english_is_the_baseline_locale() {
    assert_eq!(SUPPORTED_LOCALES, &[Locale::En]);
    assert!(catalog_for(Locale::En).contains_key("render.table.title"));
}

#[test]
fn locale_parse_accepts_region_tags_and_case() {
    assert_eq!(Locale::parse("en"), Some(Locale::En));
    assert_eq!(Locale::parse("EN"), Some(Locale::En));
    assert_eq!(Locale::parse("en-US"), Some(Locale::En));
    assert_eq!(Locale::parse("en_gb"), Some(Locale::En));
    assert_eq!(Locale::parse(""), None);
    assert_eq!(Locale::parse("ca"), None);
}

#[test]
fn translate_substitutes_placeholders() {
    let output = translate(
        "render.table.title",
        vec![MessageArg::new("plan_id", "rel-9"), MessageArg::new("environment", "prod")],
    );
    assert_eq!(output, "Release Plan rel-9 (prod)");
}

#[test]
fn unknown_key_falls_back_to_key() {
    assert_eq!(translate("no.such.key", Vec::new()), "no.such.key");
}

#[test]
fn macro_formats_named_arguments() {
    let output = crate::t!("plan.load_failed", error = "boom");
    assert_eq!(output, "Failed to load release plan: boom");
}
