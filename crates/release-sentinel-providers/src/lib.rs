// crates/release-sentinel-providers/src/lib.rs
// ============================================================================
// Module: Release Sentinel Providers
// Description: Built-in readiness signal providers.
// Purpose: Supply per-service signals from snapshot files and the environment.
// Dependencies: release-sentinel-core, serde, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! This crate ships the built-in signal sources used outside of tests: a
//! snapshot file provider and an environment-driven freeze override that wraps
//! any other provider. Both read their inputs once at construction so that a
//! plan evaluation sees a stable view of readiness.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod env;
pub mod file;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use env::EnvFreezeConfig;
pub use env::EnvFreezeProvider;
pub use file::FileSignalConfig;
pub use file::FileSignalProvider;
pub use file::SignalSourceError;
