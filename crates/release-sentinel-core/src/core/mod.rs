// crates/release-sentinel-core/src/core/mod.rs
// ============================================================================
// Module: Release Sentinel Core Types
// Description: Canonical policy, plan, signal, and decision structures.
// Purpose: Provide stable, serializable value types for release gating.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types define the policy configuration, the release plan, readiness
//! signals, and evaluation results. Values are constructed once from external
//! configuration and are read-only for the duration of an evaluation.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod decision;
pub mod identifiers;
pub mod plan;
pub mod policy;
pub mod risk;
pub mod signals;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use decision::ALLOWED_REASON;
pub use decision::EvaluationResult;
pub use decision::GateRule;
pub use decision::ServiceDecision;
pub use identifiers::EnvironmentName;
pub use identifiers::PlanId;
pub use identifiers::ServiceName;
pub use identifiers::WindowName;
pub use plan::MetadataValue;
pub use plan::ReleasePlan;
pub use plan::RolloutMode;
pub use plan::ServiceRelease;
pub use policy::ChangeWindow;
pub use policy::PolicyConfig;
pub use policy::ServicePolicy;
pub use risk::MAX_NUMERIC_RISK;
pub use risk::MIN_NUMERIC_RISK;
pub use risk::NumericRisk;
pub use risk::RiskLevel;
pub use risk::RiskValue;
pub use signals::ServiceSignals;
pub use validation::ValidationError;
