// crates/release-sentinel-core/src/core/policy.rs
// ============================================================================
// Module: Release Sentinel Policy Model
// Description: Policy configuration, per-service policies, and change windows.
// Purpose: Hold read-only gating policy with exact-name lookup helpers.
// Dependencies: crate::core::{identifiers, risk, validation}, serde
// ============================================================================

//! ## Overview
//! A [`PolicyConfig`] owns every policy record for one evaluation: the default
//! risk ceiling, the named change windows, and the per-service policies.
//! Lookups are pure and return `None` on a miss; a miss means "nothing
//! configured", never an error.
//!
//! ## Invariants
//! - At most one [`ServicePolicy`] per service name.
//! - At most one [`ChangeWindow`] per window name.
//! - Window `start`/`end` are opaque strings and are never interpreted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EnvironmentName;
use crate::core::identifiers::ServiceName;
use crate::core::identifiers::WindowName;
use crate::core::risk::RiskValue;
use crate::core::validation::ValidationError;

// ============================================================================
// SECTION: Change Windows
// ============================================================================

/// Named, environment-scoped permission record for releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeWindow {
    /// Window name, unique within a policy configuration.
    pub name: WindowName,
    /// Opaque window start (not interpreted).
    pub start: String,
    /// Opaque window end (not interpreted).
    pub end: String,
    /// Environments the window applies to; empty applies to all.
    #[serde(default)]
    pub environments: BTreeSet<EnvironmentName>,
}

impl ChangeWindow {
    /// Returns true when the window applies to the environment.
    #[must_use]
    pub fn applies_to(&self, environment: &EnvironmentName) -> bool {
        self.environments.is_empty() || self.environments.contains(environment)
    }
}

// ============================================================================
// SECTION: Service Policies
// ============================================================================

/// Gating policy for a single service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePolicy {
    /// Service the policy applies to.
    pub service: ServiceName,
    /// Maximum tolerated risk for the service.
    pub max_risk: RiskValue,
    /// Requires a non-direct rollout when set.
    #[serde(default)]
    pub require_canary: bool,
    /// Names of change windows that may allow a release, in evaluation order.
    #[serde(default)]
    pub change_windows: Vec<WindowName>,
}

impl ServicePolicy {
    /// Creates a policy with no canary requirement and no change windows.
    #[must_use]
    pub fn new(service: impl Into<ServiceName>, max_risk: RiskValue) -> Self {
        Self {
            service: service.into(),
            max_risk,
            require_canary: false,
            change_windows: Vec::new(),
        }
    }

    /// Marks the policy as requiring a canary-style rollout.
    #[must_use]
    pub const fn with_canary_required(mut self) -> Self {
        self.require_canary = true;
        self
    }

    /// Replaces the ordered change window list.
    #[must_use]
    pub fn with_change_windows<I, W>(mut self, windows: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<WindowName>,
    {
        self.change_windows = windows.into_iter().map(Into::into).collect();
        self
    }
}

// ============================================================================
// SECTION: Policy Configuration
// ============================================================================

/// Complete policy configuration for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Fallback risk ceiling for services without a policy.
    #[serde(default)]
    pub default_max_risk: RiskValue,
    /// Named change windows.
    #[serde(default)]
    pub windows: Vec<ChangeWindow>,
    /// Per-service policies.
    #[serde(default)]
    pub services: Vec<ServicePolicy>,
}

impl PolicyConfig {
    /// Creates a validated policy configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when service or window names repeat.
    pub fn new(
        default_max_risk: RiskValue,
        windows: Vec<ChangeWindow>,
        services: Vec<ServicePolicy>,
    ) -> Result<Self, ValidationError> {
        let config = Self {
            default_max_risk,
            windows,
            services,
        };
        config.validate()?;
        Ok(config)
    }

    /// Looks up a change window by exact name.
    #[must_use]
    pub fn window_by_name(&self, name: &WindowName) -> Option<&ChangeWindow> {
        self.windows.iter().find(|window| &window.name == name)
    }

    /// Looks up the policy for a service by exact name.
    #[must_use]
    pub fn policy_for(&self, service: &ServiceName) -> Option<&ServicePolicy> {
        self.services.iter().find(|policy| &policy.service == service)
    }

    /// Validates the configuration, returning the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when service or window names repeat.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validation_errors().into_iter().next().map_or(Ok(()), Err)
    }

    /// Collects every validation violation in declaration order.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        let services: Vec<ServiceName> =
            self.services.iter().map(|policy| policy.service.clone()).collect();
        let windows: Vec<WindowName> =
            self.windows.iter().map(|window| window.name.clone()).collect();
        Self::duplicate_name_errors(&services, &windows)
    }

    /// Reports every repeated service and window name.
    ///
    /// Each repeat after the first occurrence yields one error; service
    /// duplicates are listed before window duplicates.
    #[must_use]
    pub fn duplicate_name_errors(
        services: &[ServiceName],
        windows: &[WindowName],
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (index, service) in services.iter().enumerate() {
            if services.iter().take(index).any(|other| other == service) {
                errors.push(ValidationError::DuplicateServicePolicy(service.to_string()));
            }
        }
        for (index, window) in windows.iter().enumerate() {
            if windows.iter().take(index).any(|other| other == window) {
                errors.push(ValidationError::DuplicateWindow(window.to_string()));
            }
        }
        errors
    }
}
