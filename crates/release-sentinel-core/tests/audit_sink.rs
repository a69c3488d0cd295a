// crates/release-sentinel-core/tests/audit_sink.rs
// ============================================================================
// Module: Audit Sink Tests
// Description: Tests for plan evaluation audit records.
// ============================================================================
//! ## Overview
//! Validates that one JSON line is appended per evaluated plan and that the
//! record mirrors the evaluation result.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::sync::Arc;
use std::sync::Mutex;

use release_sentinel_core::DecisionAuditSink;
use release_sentinel_core::FileAuditSink;
use release_sentinel_core::PlanAuditEvent;
use release_sentinel_core::PlanEvaluator;
use release_sentinel_core::PolicyConfig;
use release_sentinel_core::ReleasePlan;
use release_sentinel_core::RiskValue;
use release_sentinel_core::RolloutMode;
use release_sentinel_core::ServicePolicy;
use release_sentinel_core::ServiceRelease;
use release_sentinel_core::healthy_signals_for_plan;
use serde_json::Value;

// ============================================================================
// SECTION: Helpers
// ============================================================================

#[derive(Clone, Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<PlanAuditEvent>>>,
}

impl DecisionAuditSink for RecordingSink {
    fn record_plan(&self, event: &PlanAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn fixture() -> (PolicyConfig, ReleasePlan) {
    let policy_cfg = PolicyConfig {
        services: vec![ServicePolicy::new("api", RiskValue::numeric(2).unwrap())],
        ..PolicyConfig::default()
    };
    let plan = ReleasePlan {
        id: "rel-7".into(),
        environment: "staging".into(),
        description: None,
        requested_by: "dev@example.com".to_string(),
        at: "2025-03-01T12:00:00Z".to_string(),
        services: vec![
            ServiceRelease::new("api", RiskValue::numeric(4).unwrap(), RolloutMode::Direct),
            ServiceRelease::new("web", RiskValue::numeric(1).unwrap(), RolloutMode::Canary),
        ],
    };
    (policy_cfg, plan)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn evaluator_records_one_event_per_plan() {
    let sink = RecordingSink::default();
    let evaluator = PlanEvaluator::new().with_audit(sink.clone());
    let (policy_cfg, plan) = fixture();
    let result = evaluator.evaluate(&policy_cfg, &plan, &healthy_signals_for_plan(&plan));

    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.event, "plan_evaluation");
    assert_eq!(event.plan_id, "rel-7");
    assert_eq!(event.services_total, 2);
    assert_eq!(event.overall_allowed, result.overall_allowed);
    assert_eq!(event.denied.len(), 1);
    assert_eq!(event.denied[0].service, "api");
    assert_eq!(event.denied[0].reason, "risk 4 exceeds max 2");
}

#[test]
fn file_sink_appends_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let (policy_cfg, plan) = fixture();
    let provider = healthy_signals_for_plan(&plan);

    for _ in 0 .. 2 {
        let sink = FileAuditSink::new(&path).unwrap();
        PlanEvaluator::new().with_audit(sink).evaluate(&policy_cfg, &plan, &provider);
    }

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    let record: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["event"], "plan_evaluation");
    assert_eq!(record["environment"], "staging");
    assert_eq!(record["requested_by"], "dev@example.com");
    assert_eq!(record["overall_allowed"], false);
    assert_eq!(record["denied"][0]["rule"], "risk_ceiling");
}
