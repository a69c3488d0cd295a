// crates/release-sentinel-core/src/core/decision.rs
// ============================================================================
// Module: Release Sentinel Decisions
// Description: Per-service decisions and aggregate plan evaluation results.
// Purpose: Expose verdicts and reasons in a form suitable for rendering.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A [`ServiceDecision`] is produced once per service and is immutable after
//! it is returned. An [`EvaluationResult`] preserves plan service order and
//! its `overall_allowed` flag is the logical AND of every decision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EnvironmentName;
use crate::core::identifiers::PlanId;
use crate::core::identifiers::ServiceName;

// ============================================================================
// SECTION: Gate Rules
// ============================================================================

/// Gating rule identifiers in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateRule {
    /// Release risk exceeds the effective ceiling.
    RiskCeiling,
    /// Service SLO is breached.
    SloBreach,
    /// Deployment freeze is active.
    Freeze,
    /// No configured change window allows the release.
    ChangeWindow,
    /// Policy requires canary but the plan rolls out directly.
    CanaryRequired,
}

impl GateRule {
    /// Returns a stable label for the rule.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RiskCeiling => "risk_ceiling",
            Self::SloBreach => "slo_breach",
            Self::Freeze => "freeze",
            Self::ChangeWindow => "change_window",
            Self::CanaryRequired => "canary_required",
        }
    }
}

impl fmt::Display for GateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Service Decision
// ============================================================================

/// Reason attached to every allowed decision.
pub const ALLOWED_REASON: &str = "ok";

/// Allow/deny verdict for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDecision {
    /// Service the decision applies to.
    pub service: ServiceName,
    /// True when the release may proceed.
    pub allowed: bool,
    /// Human-readable reason.
    pub reason: String,
    /// Rule that denied the release, absent when allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denied_by: Option<GateRule>,
}

impl ServiceDecision {
    /// Builds an allowed decision.
    #[must_use]
    pub fn allow(service: ServiceName) -> Self {
        Self {
            service,
            allowed: true,
            reason: ALLOWED_REASON.to_string(),
            denied_by: None,
        }
    }

    /// Builds a denied decision attributed to a rule.
    #[must_use]
    pub fn deny(service: ServiceName, rule: GateRule, reason: impl Into<String>) -> Self {
        Self {
            service,
            allowed: false,
            reason: reason.into(),
            denied_by: Some(rule),
        }
    }
}

// ============================================================================
// SECTION: Evaluation Result
// ============================================================================

/// Aggregate evaluation of a release plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Plan identifier.
    pub plan_id: PlanId,
    /// Target environment.
    pub environment: EnvironmentName,
    /// True iff every decision is allowed.
    pub overall_allowed: bool,
    /// Decisions in plan service order.
    pub decisions: Vec<ServiceDecision>,
}

impl EvaluationResult {
    /// Builds a result, deriving `overall_allowed` from the decisions.
    #[must_use]
    pub fn from_decisions(
        plan_id: PlanId,
        environment: EnvironmentName,
        decisions: Vec<ServiceDecision>,
    ) -> Self {
        let overall_allowed = decisions.iter().all(|decision| decision.allowed);
        Self {
            plan_id,
            environment,
            overall_allowed,
            decisions,
        }
    }

    /// Returns the denied decisions in plan order.
    pub fn denied(&self) -> impl Iterator<Item = &ServiceDecision> {
        self.decisions.iter().filter(|decision| !decision.allowed)
    }

    /// Returns the first decision recorded for a service.
    #[must_use]
    pub fn decision_for(&self, service: &ServiceName) -> Option<&ServiceDecision> {
        self.decisions.iter().find(|decision| &decision.service == service)
    }
}
