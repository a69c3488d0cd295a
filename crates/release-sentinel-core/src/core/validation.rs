// crates/release-sentinel-core/src/core/validation.rs
// ============================================================================
// Module: Release Sentinel Validation Errors
// Description: Error kinds raised while constructing policy and plan values.
// Purpose: Report out-of-range risks and duplicate keys before evaluation starts.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Validation failures are fatal to the load step and are never partially
//! applied. Lookup misses (unknown windows, services without a policy, unknown
//! signal keys) are not errors and have no variant here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Policy and plan validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Numeric risk falls outside the accepted range.
    #[error("numeric risk must be between 1 and 5, got {0}")]
    RiskOutOfRange(i64),
    /// Numeric risk is not a whole number.
    #[error("numeric risk must be a whole number, got {0}")]
    FractionalRisk(String),
    /// Named risk level is not recognized.
    #[error("invalid risk level '{0}'")]
    UnknownRiskLevel(String),
    /// More than one service policy targets the same service.
    #[error("duplicate service policy: {0}")]
    DuplicateServicePolicy(String),
    /// More than one change window shares a name.
    #[error("duplicate change window: {0}")]
    DuplicateWindow(String),
}
