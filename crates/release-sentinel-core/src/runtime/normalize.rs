// crates/release-sentinel-core/src/runtime/normalize.rs
// ============================================================================
// Module: Release Sentinel Risk Normalizer
// Description: Conversion of mixed risk values onto one integer scale.
// Purpose: Provide the single bottleneck used before any risk comparison.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Numeric risks pass through unchanged; named levels map to their fixed rank
//! (`low = 1` .. `critical = 4`). The two scales are deliberately not unified:
//! numeric risk can reach `5`, no named level does.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::PolicyConfig;
use crate::core::RiskValue;
use crate::core::ServiceRelease;

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes a risk value onto the shared integer scale.
#[must_use]
pub const fn normalize_risk(value: RiskValue) -> u8 {
    match value {
        RiskValue::Numeric(risk) => risk.get(),
        RiskValue::Level(level) => level.rank(),
    }
}

/// Returns the normalized risk ceiling that applies to a service release.
///
/// Uses the service policy's `max_risk` when one exists, otherwise the
/// configuration default.
#[must_use]
pub fn effective_max_risk(policy_cfg: &PolicyConfig, release: &ServiceRelease) -> u8 {
    let max_risk = policy_cfg
        .policy_for(&release.name)
        .map_or(policy_cfg.default_max_risk, |policy| policy.max_risk);
    normalize_risk(max_risk)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
