// crates/release-sentinel-core/src/core/plan.rs
// ============================================================================
// Module: Release Sentinel Release Plan
// Description: Declared deployment plan and per-service release entries.
// Purpose: Describe what is about to be released, where, and how.
// Dependencies: crate::core::{identifiers, risk}, serde
// ============================================================================

//! ## Overview
//! A [`ReleasePlan`] lists the services to release into one environment. The
//! order of `services` is significant: evaluation results preserve it.
//! The requested time `at` is carried but does not participate in gating.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EnvironmentName;
use crate::core::identifiers::PlanId;
use crate::core::identifiers::ServiceName;
use crate::core::risk::RiskValue;

// ============================================================================
// SECTION: Rollout Mode
// ============================================================================

/// Deployment strategy declared for a service release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RolloutMode {
    /// Replace all instances at once.
    #[default]
    #[serde(rename = "direct")]
    Direct,
    /// Shift a fraction of traffic first.
    #[serde(rename = "canary")]
    Canary,
    /// Switch traffic between two full environments.
    #[serde(rename = "blue-green")]
    BlueGreen,
}

impl RolloutMode {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Canary => "canary",
            Self::BlueGreen => "blue-green",
        }
    }
}

impl fmt::Display for RolloutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Release Metadata
// ============================================================================

/// Free-form metadata value attached to a service release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Text(String),
}

// ============================================================================
// SECTION: Service Release
// ============================================================================

/// One service entry within a release plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRelease {
    /// Service being released.
    pub name: ServiceName,
    /// Declared release risk.
    pub risk: RiskValue,
    /// Rollout strategy.
    #[serde(default)]
    pub mode: RolloutMode,
    /// Free-form metadata; not consulted by gating rules.
    #[serde(default)]
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl ServiceRelease {
    /// Creates a release entry with empty metadata.
    #[must_use]
    pub fn new(name: impl Into<ServiceName>, risk: RiskValue, mode: RolloutMode) -> Self {
        Self {
            name: name.into(),
            risk,
            mode,
            metadata: BTreeMap::new(),
        }
    }
}

// ============================================================================
// SECTION: Release Plan
// ============================================================================

/// Declared deployment plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleasePlan {
    /// Plan identifier.
    pub id: PlanId,
    /// Target environment.
    pub environment: EnvironmentName,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Requester identity.
    pub requested_by: String,
    /// Opaque requested execution time (not interpreted).
    pub at: String,
    /// Services to release, in declared order.
    #[serde(default)]
    pub services: Vec<ServiceRelease>,
}
