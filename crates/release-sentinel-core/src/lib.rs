// crates/release-sentinel-core/src/lib.rs
// ============================================================================
// Module: Release Sentinel Core Library
// Description: Public API surface for the Release Sentinel core.
// Purpose: Expose the policy/plan model, signal interfaces, and the decision engine.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Release Sentinel core evaluates a declared release plan against a policy
//! configuration and live readiness signals. Every service receives an
//! allow/deny decision with a human-readable reason, and the plan receives an
//! aggregate decision. Evaluation is deterministic and backend-agnostic:
//! readiness data enters only through the [`SignalProvider`] interface.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::DecisionAuditSink;
pub use interfaces::SignalProvider;
pub use runtime::DecisionEngine;
pub use runtime::FileAuditSink;
pub use runtime::GateRuleSpec;
pub use runtime::NoopAuditSink;
pub use runtime::PlanAuditEvent;
pub use runtime::PlanEvaluator;
pub use runtime::RuleChain;
pub use runtime::RuleContext;
pub use runtime::RuleOutcome;
pub use runtime::StaticSignalProvider;
pub use runtime::StderrAuditSink;
pub use runtime::effective_max_risk;
pub use runtime::evaluate_plan;
pub use runtime::healthy_signals_for_plan;
pub use runtime::normalize_risk;
pub use runtime::window_allows;
