// crates/release-sentinel-providers/src/env.rs
// ============================================================================
// Module: Environment Freeze Provider
// Description: Provider wrapper that forces a freeze from an environment flag.
// Purpose: Let operators halt every release without editing snapshots.
// Dependencies: release-sentinel-core
// ============================================================================

//! ## Overview
//! [`EnvFreezeProvider`] wraps another signal provider. When the configured
//! environment variable holds a truthy value (`1`, `true`, `yes`, `on`, any
//! case), every snapshot it returns has `in_freeze` set. The flag is read once
//! at construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use release_sentinel_core::ServiceName;
use release_sentinel_core::ServiceSignals;
use release_sentinel_core::SignalProvider;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default freeze flag variable.
pub const DEFAULT_FREEZE_VAR: &str = "RELEASE_SENTINEL_FREEZE";

/// Configuration for the freeze override.
///
/// # Invariants
/// - `overrides` take precedence over process environment reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFreezeConfig {
    /// Environment variable holding the freeze flag.
    pub variable: String,
    /// Optional override map used for deterministic lookups.
    pub overrides: Option<BTreeMap<String, String>>,
}

impl Default for EnvFreezeConfig {
    fn default() -> Self {
        Self {
            variable: DEFAULT_FREEZE_VAR.to_string(),
            overrides: None,
        }
    }
}

impl EnvFreezeConfig {
    /// Resolves the flag value from overrides or the process environment.
    fn lookup(&self) -> Option<String> {
        match &self.overrides {
            Some(overrides) => overrides.get(&self.variable).cloned(),
            None => std::env::var(&self.variable).ok(),
        }
    }
}

// ============================================================================
// SECTION: Provider Implementation
// ============================================================================

/// Signal provider that applies an environment-wide freeze.
#[derive(Debug, Clone)]
pub struct EnvFreezeProvider<P> {
    /// Wrapped provider.
    inner: P,
    /// True when the freeze flag was set at construction.
    freeze_active: bool,
}

impl<P> EnvFreezeProvider<P> {
    /// Wraps a provider, reading the freeze flag from the environment.
    #[must_use]
    pub fn new(inner: P, config: &EnvFreezeConfig) -> Self {
        let freeze_active = config.lookup().is_some_and(|value| is_truthy(&value));
        Self {
            inner,
            freeze_active,
        }
    }

    /// Returns true when the freeze override is in effect.
    #[must_use]
    pub const fn freeze_active(&self) -> bool {
        self.freeze_active
    }
}

impl<P: SignalProvider> SignalProvider for EnvFreezeProvider<P> {
    fn for_service(&self, service: &ServiceName) -> ServiceSignals {
        let mut signals = self.inner.for_service(service);
        if self.freeze_active {
            signals.in_freeze = true;
        }
        signals
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true for the accepted truthy flag spellings.
fn is_truthy(value: &str) -> bool {
    ["1", "true", "yes", "on"].iter().any(|truthy| value.trim().eq_ignore_ascii_case(truthy))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
