// crates/release-sentinel-core/src/runtime/audit.rs
// ============================================================================
// Module: Release Sentinel Audit Logging
// Description: Structured audit events for plan evaluations.
// Purpose: Emit JSON-line audit records without a logging framework dependency.
// Dependencies: crate::{core, interfaces}, serde, serde_json
// ============================================================================

//! ## Overview
//! One [`PlanAuditEvent`] is recorded per evaluated plan. Sinks write JSON
//! lines to stderr or to an append-only file, or discard events entirely.
//! Sink failures are swallowed and never alter an evaluation result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::EvaluationResult;
use crate::core::GateRule;
use crate::core::ReleasePlan;
use crate::interfaces::DecisionAuditSink;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Denied service entry within an audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeniedService {
    /// Service name.
    pub service: String,
    /// Rule that denied the release.
    pub rule: Option<GateRule>,
    /// Deny reason.
    pub reason: String,
}

/// Plan evaluation audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct PlanAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Plan identifier.
    pub plan_id: String,
    /// Target environment.
    pub environment: String,
    /// Requester identity.
    pub requested_by: String,
    /// Requested execution time as declared by the plan.
    pub at: String,
    /// Aggregate decision.
    pub overall_allowed: bool,
    /// Number of services evaluated.
    pub services_total: usize,
    /// Denied services in plan order.
    pub denied: Vec<DeniedService>,
}

impl PlanAuditEvent {
    /// Creates a new audit event stamped with the current time.
    #[must_use]
    pub fn new(plan: &ReleasePlan, result: &EvaluationResult) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "plan_evaluation",
            timestamp_ms,
            plan_id: result.plan_id.to_string(),
            environment: result.environment.to_string(),
            requested_by: plan.requested_by.clone(),
            at: plan.at.clone(),
            overall_allowed: result.overall_allowed,
            services_total: result.decisions.len(),
            denied: result
                .denied()
                .map(|decision| DeniedService {
                    service: decision.service.to_string(),
                    rule: decision.denied_by,
                    reason: decision.reason.clone(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that discards every event.
pub struct NoopAuditSink;

impl DecisionAuditSink for NoopAuditSink {
    fn record_plan(&self, _event: &PlanAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl DecisionAuditSink for StderrAuditSink {
    fn record_plan(&self, event: &PlanAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DecisionAuditSink for FileAuditSink {
    fn record_plan(&self, event: &PlanAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}
