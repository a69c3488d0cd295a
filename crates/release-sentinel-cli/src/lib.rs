// crates/release-sentinel-cli/src/lib.rs
// ============================================================================
// Module: Release Sentinel CLI Library
// Description: Shared helpers for the Release Sentinel command-line interface.
// Purpose: Provide reusable components (i18n, rendering) for the CLI binary and tests.
// Dependencies: release-sentinel-core, serde_json
// ============================================================================

//! ## Overview
//! This library module houses shared CLI utilities: the message catalog and
//! the result renderers. The binary entry point (`src/main.rs`) imports these
//! helpers to keep all user-facing output consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
/// Table, JSON, and policy summary rendering.
pub mod render;
