// crates/release-sentinel-core/src/runtime/engine.rs
// ============================================================================
// Module: Release Sentinel Decision Engine
// Description: Per-service rule evaluation and plan-level aggregation.
// Purpose: Turn policy, plan, and signals into a complete evaluation result.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The [`DecisionEngine`] runs the rule chain for one service. The
//! [`PlanEvaluator`] drives the engine across every service of a plan in
//! declared order, fetching one signal snapshot per service, and records a
//! single audit event for the plan.
//!
//! ## Invariants
//! - No service is skipped and no partial result is returned.
//! - Decisions preserve plan service order.
//! - `overall_allowed` is the logical AND of every decision.
//! - Results carry no timestamps; evaluating the same inputs twice yields
//!   identical results.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::EvaluationResult;
use crate::core::PolicyConfig;
use crate::core::ReleasePlan;
use crate::core::ServiceDecision;
use crate::core::ServiceRelease;
use crate::core::ServiceSignals;
use crate::interfaces::DecisionAuditSink;
use crate::interfaces::SignalProvider;
use crate::runtime::audit::NoopAuditSink;
use crate::runtime::audit::PlanAuditEvent;
use crate::runtime::rules::RuleChain;
use crate::runtime::rules::RuleContext;

// ============================================================================
// SECTION: Decision Engine
// ============================================================================

/// Evaluates a single service release against the rule chain.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    /// Ordered gating rules.
    chain: RuleChain,
}

impl DecisionEngine {
    /// Creates an engine with the provided rule chain.
    #[must_use]
    pub const fn new(chain: RuleChain) -> Self {
        Self {
            chain,
        }
    }

    /// Evaluates one service, returning the first failing rule's verdict.
    #[must_use]
    pub fn evaluate_service(
        &self,
        policy_cfg: &PolicyConfig,
        plan: &ReleasePlan,
        release: &ServiceRelease,
        signals: &ServiceSignals,
    ) -> ServiceDecision {
        let ctx = RuleContext {
            policy_cfg,
            plan,
            release,
            signals,
        };
        match self.chain.evaluate(&ctx) {
            Some((rule, reason)) => ServiceDecision::deny(release.name.clone(), rule, reason),
            None => ServiceDecision::allow(release.name.clone()),
        }
    }
}

// ============================================================================
// SECTION: Plan Evaluator
// ============================================================================

/// Drives the decision engine across a plan and records audit events.
pub struct PlanEvaluator {
    /// Engine applied to each service.
    engine: DecisionEngine,
    /// Sink receiving one event per evaluated plan.
    audit: Box<dyn DecisionAuditSink>,
}

impl PlanEvaluator {
    /// Creates an evaluator with the standard rules and no audit output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: DecisionEngine::default(),
            audit: Box::new(NoopAuditSink),
        }
    }

    /// Replaces the decision engine.
    #[must_use]
    pub fn with_engine(mut self, engine: DecisionEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: impl DecisionAuditSink + 'static) -> Self {
        self.audit = Box::new(audit);
        self
    }

    /// Evaluates every service of the plan in declared order.
    pub fn evaluate<P>(
        &self,
        policy_cfg: &PolicyConfig,
        plan: &ReleasePlan,
        provider: &P,
    ) -> EvaluationResult
    where
        P: SignalProvider + ?Sized,
    {
        let decisions = plan
            .services
            .iter()
            .map(|release| {
                let signals = provider.for_service(&release.name);
                self.engine.evaluate_service(policy_cfg, plan, release, &signals)
            })
            .collect();
        let result =
            EvaluationResult::from_decisions(plan.id.clone(), plan.environment.clone(), decisions);
        self.audit.record_plan(&PlanAuditEvent::new(plan, &result));
        result
    }
}

impl Default for PlanEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates a plan with the standard rule chain.
pub fn evaluate_plan<P>(
    policy_cfg: &PolicyConfig,
    plan: &ReleasePlan,
    provider: &P,
) -> EvaluationResult
where
    P: SignalProvider + ?Sized,
{
    PlanEvaluator::new().evaluate(policy_cfg, plan, provider)
}
