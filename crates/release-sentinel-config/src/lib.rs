// crates/release-sentinel-config/src/lib.rs
// ============================================================================
// Module: Release Sentinel Config Library
// Description: Policy and release plan document loading.
// Purpose: Single entry point for reading gating inputs from disk.
// Dependencies: release-sentinel-core, serde, serde_json, serde_yaml, toml
// ============================================================================

//! ## Overview
//! `release-sentinel-config` reads policy configurations and release plans
//! from YAML, JSON, or TOML documents. Loading is fail-closed: oversized,
//! non-UTF-8, malformed, or structurally invalid documents are rejected with a
//! [`ConfigError`] before any evaluation happens.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
mod decode;
pub mod document;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use document::DocumentFormat;
pub use document::read_document;
