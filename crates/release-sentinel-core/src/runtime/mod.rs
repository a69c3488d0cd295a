// crates/release-sentinel-core/src/runtime/mod.rs
// ============================================================================
// Module: Release Sentinel Runtime
// Description: Risk normalization, rule chain, decision engine, and plan evaluator.
// Purpose: Evaluate release plans against policy and readiness signals.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the ordered gating rule chain and drive it across
//! every service of a plan. Evaluation is single-threaded, synchronous, and
//! deterministic; the only external call is the signal provider lookup.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod engine;
pub mod normalize;
pub mod provider;
pub mod rules;
pub mod window;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::DeniedService;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::PlanAuditEvent;
pub use audit::StderrAuditSink;
pub use engine::DecisionEngine;
pub use engine::PlanEvaluator;
pub use engine::evaluate_plan;
pub use normalize::effective_max_risk;
pub use normalize::normalize_risk;
pub use provider::StaticSignalProvider;
pub use provider::healthy_signals_for_plan;
pub use rules::GateRuleSpec;
pub use rules::RuleChain;
pub use rules::RuleContext;
pub use rules::RuleOutcome;
pub use window::window_allows;
