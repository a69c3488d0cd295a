// crates/release-sentinel-core/src/core/signals.rs
// ============================================================================
// Module: Release Sentinel Readiness Signals
// Description: Point-in-time readiness snapshot for one service.
// Purpose: Carry SLO, incident, and freeze state into the decision engine.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Signals are supplied externally per evaluation and are neither owned nor
//! cached by the core. `open_incidents` is collected but no gating rule reads
//! it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ServiceName;

// ============================================================================
// SECTION: Service Signals
// ============================================================================

/// Readiness snapshot for a single service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSignals {
    /// Service the snapshot describes.
    pub service: ServiceName,
    /// True while the service's SLO is breached.
    #[serde(default)]
    pub slo_breached: bool,
    /// Number of open incidents.
    #[serde(default)]
    pub open_incidents: u32,
    /// True while a deployment freeze applies to the service.
    #[serde(default)]
    pub in_freeze: bool,
}

impl ServiceSignals {
    /// Returns the synthetic healthy snapshot used for unknown services.
    #[must_use]
    pub fn healthy(service: impl Into<ServiceName>) -> Self {
        Self {
            service: service.into(),
            slo_breached: false,
            open_incidents: 0,
            in_freeze: false,
        }
    }
}
