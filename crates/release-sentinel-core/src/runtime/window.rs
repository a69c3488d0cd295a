// crates/release-sentinel-core/src/runtime/window.rs
// ============================================================================
// Module: Release Sentinel Change-Window Gate
// Description: Name and environment matching of configured change windows.
// Purpose: Decide whether any listed change window admits a release.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Window matching is by name and environment only. Window `start`/`end` and
//! the plan's requested time `at` are inert: no time arithmetic is performed.
//! A service without a policy, or whose policy lists no windows, is admitted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::EnvironmentName;
use crate::core::PolicyConfig;
use crate::core::ServiceRelease;

// ============================================================================
// SECTION: Window Gate
// ============================================================================

/// Returns true when a listed change window admits the release.
///
/// Windows are tried in the policy's listed order. Names that do not resolve
/// are skipped.
#[must_use]
pub fn window_allows(
    policy_cfg: &PolicyConfig,
    environment: &EnvironmentName,
    release: &ServiceRelease,
) -> bool {
    let Some(policy) = policy_cfg.policy_for(&release.name) else {
        return true;
    };
    if policy.change_windows.is_empty() {
        return true;
    }
    policy
        .change_windows
        .iter()
        .filter_map(|name| policy_cfg.window_by_name(name))
        .any(|window| window.applies_to(environment))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::core::ChangeWindow;
    use crate::core::RiskLevel;
    use crate::core::RiskValue;
    use crate::core::RolloutMode;
    use crate::core::ServicePolicy;

    fn window(name: &str, environments: &[&str]) -> ChangeWindow {
        ChangeWindow {
            name: name.into(),
            start: "09:00".to_string(),
            end: "17:00".to_string(),
            environments: environments
                .iter()
                .map(|env| EnvironmentName::new(*env))
                .collect::<BTreeSet<_>>(),
        }
    }

    fn release() -> ServiceRelease {
        ServiceRelease::new("api", RiskValue::Level(RiskLevel::Low), RolloutMode::Canary)
    }

    fn policy_with_windows(windows: Vec<ChangeWindow>, listed: &[&str]) -> PolicyConfig {
        PolicyConfig {
            default_max_risk: RiskValue::default(),
            windows,
            services: vec![
                ServicePolicy::new("api", RiskValue::Level(RiskLevel::High))
                    .with_change_windows(listed.iter().copied()),
            ],
        }
    }

    #[test]
    fn missing_policy_is_permissive() {
        let policy_cfg = PolicyConfig::default();
        assert!(window_allows(&policy_cfg, &"production".into(), &release()));
    }

    #[test]
    fn empty_window_list_is_permissive() {
        let policy_cfg = policy_with_windows(vec![window("weekday", &["staging"])], &[]);
        assert!(window_allows(&policy_cfg, &"production".into(), &release()));
    }

    #[test]
    fn unresolved_only_window_denies() {
        let policy_cfg = policy_with_windows(Vec::new(), &["ghost"]);
        assert!(!window_allows(&policy_cfg, &"production".into(), &release()));
    }

    #[test]
    fn environment_scoped_window_must_match() {
        let policy_cfg = policy_with_windows(vec![window("weekday", &["staging"])], &["weekday"]);
        assert!(window_allows(&policy_cfg, &"staging".into(), &release()));
        assert!(!window_allows(&policy_cfg, &"production".into(), &release()));
    }

    #[test]
    fn unscoped_window_applies_everywhere() {
        let windows = vec![window("scoped", &["staging"]), window("any", &[])];
        let policy_cfg = policy_with_windows(windows, &["ghost", "scoped", "any"]);
        assert!(window_allows(&policy_cfg, &"production".into(), &release()));
    }

    #[test]
    fn temporal_fields_are_ignored() {
        let mut closed = window("closed", &[]);
        closed.start = "2099-01-01T00:00:00Z".to_string();
        closed.end = "2000-01-01T00:00:00Z".to_string();
        let policy_cfg = policy_with_windows(vec![closed], &["closed"]);
        assert!(window_allows(&policy_cfg, &"production".into(), &release()));
    }
}
