// crates/release-sentinel-core/src/runtime/rules.rs
// ============================================================================
// Module: Release Sentinel Gating Rules
// Description: Ordered predicate/reason pairs evaluated by short-circuit fold.
// Purpose: Keep rule order and deny reasons independently testable.
// Dependencies: crate::core, crate::runtime::{normalize, window}
// ============================================================================

//! ## Overview
//! A [`RuleChain`] is an ordered list of [`GateRuleSpec`] entries. Evaluation
//! returns the first denial and never runs later rules once one fails. The
//! standard chain is, in order: risk ceiling, SLO breach, freeze, change
//! window, canary requirement.
//!
//! `open_incidents` is not consulted by any standard rule.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::GateRule;
use crate::core::PolicyConfig;
use crate::core::ReleasePlan;
use crate::core::RolloutMode;
use crate::core::ServiceRelease;
use crate::core::ServiceSignals;
use crate::runtime::normalize::effective_max_risk;
use crate::runtime::normalize::normalize_risk;
use crate::runtime::window::window_allows;

// ============================================================================
// SECTION: Reasons
// ============================================================================

/// Deny reason for a breached SLO.
pub const REASON_SLO_BREACHED: &str = "SLO is currently breached";
/// Deny reason for an active freeze.
pub const REASON_FREEZE_ACTIVE: &str = "deployment freeze active";
/// Deny reason when no change window admits the release.
pub const REASON_NO_WINDOW: &str = "no matching change window allows this release";
/// Deny reason for a direct rollout under a canary requirement.
pub const REASON_CANARY_REQUIRED: &str = "canary required by policy but plan uses direct rollout";

// ============================================================================
// SECTION: Rule Types
// ============================================================================

/// Inputs visible to a gating rule for one service.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Read-only policy configuration.
    pub policy_cfg: &'a PolicyConfig,
    /// Plan the service belongs to.
    pub plan: &'a ReleasePlan,
    /// Service release under evaluation.
    pub release: &'a ServiceRelease,
    /// Readiness snapshot fetched for the service.
    pub signals: &'a ServiceSignals,
}

/// Outcome of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Rule passed; evaluation continues.
    Pass,
    /// Rule failed with a human-readable reason.
    Deny(String),
}

/// Rule predicate signature.
pub type RuleCheck = fn(&RuleContext<'_>) -> RuleOutcome;

/// One predicate/reason pair in a rule chain.
#[derive(Debug, Clone, Copy)]
pub struct GateRuleSpec {
    /// Rule identifier reported on denial.
    pub rule: GateRule,
    /// Predicate producing the outcome.
    pub check: RuleCheck,
}

impl GateRuleSpec {
    /// Creates a rule entry.
    #[must_use]
    pub const fn new(rule: GateRule, check: RuleCheck) -> Self {
        Self {
            rule,
            check,
        }
    }

    /// Runs the rule against a context.
    #[must_use]
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        (self.check)(ctx)
    }
}

/// Standard rules in their fixed evaluation order.
pub const STANDARD_RULES: [GateRuleSpec; 5] = [
    GateRuleSpec::new(GateRule::RiskCeiling, check_risk_ceiling),
    GateRuleSpec::new(GateRule::SloBreach, check_slo_breach),
    GateRuleSpec::new(GateRule::Freeze, check_freeze),
    GateRuleSpec::new(GateRule::ChangeWindow, check_change_window),
    GateRuleSpec::new(GateRule::CanaryRequired, check_canary_required),
];

// ============================================================================
// SECTION: Rule Chain
// ============================================================================

/// Ordered gating rules evaluated with short-circuit semantics.
#[derive(Debug, Clone)]
pub struct RuleChain {
    /// Rules in evaluation order.
    rules: Vec<GateRuleSpec>,
}

impl RuleChain {
    /// Creates a chain from explicit rules.
    #[must_use]
    pub const fn new(rules: Vec<GateRuleSpec>) -> Self {
        Self {
            rules,
        }
    }

    /// Returns the standard five-rule chain.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(STANDARD_RULES.to_vec())
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[GateRuleSpec] {
        &self.rules
    }

    /// Returns the first denial, or `None` when every rule passes.
    #[must_use]
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<(GateRule, String)> {
        self.rules.iter().find_map(|entry| match entry.evaluate(ctx) {
            RuleOutcome::Pass => None,
            RuleOutcome::Deny(reason) => Some((entry.rule, reason)),
        })
    }
}

impl Default for RuleChain {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// SECTION: Standard Rules
// ============================================================================

/// Denies when normalized release risk exceeds the effective ceiling.
fn check_risk_ceiling(ctx: &RuleContext<'_>) -> RuleOutcome {
    let risk = normalize_risk(ctx.release.risk);
    let max_risk = effective_max_risk(ctx.policy_cfg, ctx.release);
    if risk > max_risk {
        return RuleOutcome::Deny(format!("risk {risk} exceeds max {max_risk}"));
    }
    RuleOutcome::Pass
}

/// Denies while the SLO is breached.
fn check_slo_breach(ctx: &RuleContext<'_>) -> RuleOutcome {
    if ctx.signals.slo_breached {
        return RuleOutcome::Deny(REASON_SLO_BREACHED.to_string());
    }
    RuleOutcome::Pass
}

/// Denies while a deployment freeze is active.
fn check_freeze(ctx: &RuleContext<'_>) -> RuleOutcome {
    if ctx.signals.in_freeze {
        return RuleOutcome::Deny(REASON_FREEZE_ACTIVE.to_string());
    }
    RuleOutcome::Pass
}

/// Denies when no listed change window admits the plan environment.
fn check_change_window(ctx: &RuleContext<'_>) -> RuleOutcome {
    if window_allows(ctx.policy_cfg, &ctx.plan.environment, ctx.release) {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Deny(REASON_NO_WINDOW.to_string())
}

/// Denies direct rollouts of services whose policy requires canary.
fn check_canary_required(ctx: &RuleContext<'_>) -> RuleOutcome {
    let requires_canary =
        ctx.policy_cfg.policy_for(&ctx.release.name).is_some_and(|policy| policy.require_canary);
    if requires_canary && ctx.release.mode == RolloutMode::Direct {
        return RuleOutcome::Deny(REASON_CANARY_REQUIRED.to_string());
    }
    RuleOutcome::Pass
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RiskLevel;
    use crate::core::RiskValue;
    use crate::core::ServicePolicy;

    fn plan() -> ReleasePlan {
        ReleasePlan {
            id: "rel-1".into(),
            environment: "production".into(),
            description: None,
            requested_by: "me@example.com".to_string(),
            at: "2025-01-01T00:00:00Z".to_string(),
            services: Vec::new(),
        }
    }

    #[test]
    fn standard_chain_order_is_fixed() {
        let chain = RuleChain::standard();
        let order: Vec<GateRule> = chain.rules().iter().map(|entry| entry.rule).collect();
        assert_eq!(order, vec![
            GateRule::RiskCeiling,
            GateRule::SloBreach,
            GateRule::Freeze,
            GateRule::ChangeWindow,
            GateRule::CanaryRequired,
        ]);
    }

    #[test]
    fn each_rule_passes_for_compliant_context() {
        let policy_cfg = PolicyConfig::default();
        let plan = plan();
        let release =
            ServiceRelease::new("api", RiskValue::Level(RiskLevel::Low), RolloutMode::Direct);
        let signals = ServiceSignals::healthy("api");
        let ctx = RuleContext {
            policy_cfg: &policy_cfg,
            plan: &plan,
            release: &release,
            signals: &signals,
        };
        for entry in RuleChain::standard().rules() {
            assert_eq!(entry.evaluate(&ctx), RuleOutcome::Pass, "rule {} should pass", entry.rule);
        }
    }

    #[test]
    fn chain_reports_first_failure_only() {
        let policy_cfg = PolicyConfig {
            default_max_risk: RiskValue::Level(RiskLevel::Low),
            windows: Vec::new(),
            services: vec![
                ServicePolicy::new("api", RiskValue::Level(RiskLevel::Low)).with_canary_required(),
            ],
        };
        let plan = plan();
        let release =
            ServiceRelease::new("api", RiskValue::Level(RiskLevel::Low), RolloutMode::Direct);
        let signals = ServiceSignals {
            slo_breached: true,
            in_freeze: true,
            ..ServiceSignals::healthy("api")
        };
        let ctx = RuleContext {
            policy_cfg: &policy_cfg,
            plan: &plan,
            release: &release,
            signals: &signals,
        };
        assert_eq!(
            RuleChain::standard().evaluate(&ctx),
            Some((GateRule::SloBreach, REASON_SLO_BREACHED.to_string()))
        );
    }

    #[test]
    fn custom_chain_can_drop_rules() {
        let chain = RuleChain::new(vec![GateRuleSpec::new(GateRule::Freeze, check_freeze)]);
        let policy_cfg = PolicyConfig::default();
        let plan = plan();
        let release =
            ServiceRelease::new("api", RiskValue::Level(RiskLevel::Critical), RolloutMode::Direct);
        let signals = ServiceSignals::healthy("api");
        let ctx = RuleContext {
            policy_cfg: &policy_cfg,
            plan: &plan,
            release: &release,
            signals: &signals,
        };
        assert_eq!(chain.evaluate(&ctx), None);
    }
}
