// crates/release-sentinel-core/src/runtime/provider.rs
// ============================================================================
// Module: Release Sentinel In-Memory Signals
// Description: Name-keyed in-memory signal provider and default-signal helper.
// Purpose: Provide a deterministic provider for tests, demos, and the CLI default.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! [`StaticSignalProvider`] stores signals registered explicitly by service
//! name and answers every other name with the healthy default. Registering a
//! service again replaces its previous snapshot.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::ReleasePlan;
use crate::core::ServiceName;
use crate::core::ServiceSignals;
use crate::interfaces::SignalProvider;

// ============================================================================
// SECTION: Static Provider
// ============================================================================

/// In-memory signal provider keyed by service name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSignalProvider {
    /// Registered signals keyed by service.
    signals: BTreeMap<ServiceName, ServiceSignals>,
}

impl StaticSignalProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the snapshot for its service.
    pub fn register(&mut self, signals: ServiceSignals) {
        self.signals.insert(signals.service.clone(), signals);
    }

    /// Returns true when the service has a registered snapshot.
    #[must_use]
    pub fn contains(&self, service: &ServiceName) -> bool {
        self.signals.contains_key(service)
    }

    /// Returns the number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns true when no service is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl FromIterator<ServiceSignals> for StaticSignalProvider {
    fn from_iter<I: IntoIterator<Item = ServiceSignals>>(iter: I) -> Self {
        let mut provider = Self::new();
        for signals in iter {
            provider.register(signals);
        }
        provider
    }
}

impl SignalProvider for StaticSignalProvider {
    fn for_service(&self, service: &ServiceName) -> ServiceSignals {
        self.signals
            .get(service)
            .cloned()
            .unwrap_or_else(|| ServiceSignals::healthy(service.clone()))
    }
}

// ============================================================================
// SECTION: Default Signals
// ============================================================================

/// Builds a provider that reports every plan service as healthy.
#[must_use]
pub fn healthy_signals_for_plan(plan: &ReleasePlan) -> StaticSignalProvider {
    plan.services.iter().map(|release| ServiceSignals::healthy(release.name.clone())).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_service_is_healthy() {
        let provider = StaticSignalProvider::new();
        let signals = provider.for_service(&"unknown".into());
        assert_eq!(signals, ServiceSignals::healthy("unknown"));
    }

    #[test]
    fn register_replaces_previous_snapshot() {
        let mut provider = StaticSignalProvider::new();
        provider.register(ServiceSignals {
            slo_breached: true,
            ..ServiceSignals::healthy("api")
        });
        provider.register(ServiceSignals {
            open_incidents: 2,
            ..ServiceSignals::healthy("api")
        });
        let signals = provider.for_service(&"api".into());
        assert_eq!(provider.len(), 1);
        assert!(!signals.slo_breached);
        assert_eq!(signals.open_incidents, 2);
    }
}
