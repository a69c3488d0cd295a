// crates/release-sentinel-core/src/interfaces/mod.rs
// ============================================================================
// Module: Release Sentinel Interfaces
// Description: Backend-agnostic interfaces for readiness signals and auditing.
// Purpose: Define the contract surfaces used by the Release Sentinel runtime.
// Dependencies: crate::{core, runtime::audit}
// ============================================================================

//! ## Overview
//! Interfaces define how Release Sentinel integrates with external systems
//! without embedding backend-specific details. Signal providers are total:
//! an unknown service yields the healthy default rather than an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ServiceName;
use crate::core::ServiceSignals;
use crate::runtime::audit::PlanAuditEvent;

// ============================================================================
// SECTION: Signal Provider
// ============================================================================

/// Source of per-service readiness signals.
///
/// # Invariants
/// - `for_service` never fails and never returns absence.
/// - Unknown services yield [`ServiceSignals::healthy`].
/// - Each call is independent; the engine never caches results.
pub trait SignalProvider {
    /// Returns the readiness snapshot for a service.
    fn for_service(&self, service: &ServiceName) -> ServiceSignals;
}

impl<T: SignalProvider + ?Sized> SignalProvider for &T {
    fn for_service(&self, service: &ServiceName) -> ServiceSignals {
        (**self).for_service(service)
    }
}

impl<T: SignalProvider + ?Sized> SignalProvider for Box<T> {
    fn for_service(&self, service: &ServiceName) -> ServiceSignals {
        (**self).for_service(service)
    }
}

// ============================================================================
// SECTION: Decision Audit Sink
// ============================================================================

/// Audit sink for plan evaluation events.
pub trait DecisionAuditSink: Send + Sync {
    /// Records a plan evaluation event.
    fn record_plan(&self, event: &PlanAuditEvent);
}

impl<T: DecisionAuditSink + ?Sized> DecisionAuditSink for Box<T> {
    fn record_plan(&self, event: &PlanAuditEvent) {
        (**self).record_plan(event);
    }
}
