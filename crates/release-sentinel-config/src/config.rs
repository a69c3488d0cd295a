// crates/release-sentinel-config/src/config.rs
// ============================================================================
// Module: Release Sentinel Configuration
// Description: Loading and validation of policy and release plan documents.
// Purpose: Provide strict, fail-closed input parsing for plan evaluation.
// Dependencies: release-sentinel-core, thiserror
// ============================================================================

//! ## Overview
//! Policies and plans are loaded through [`crate::read_document`] and then
//! decoded field by field into the core model. Every structural error of a
//! document, including duplicate service or window names, is reported in one
//! [`ConfigError::Invalid`].
//!
//! The policy path is resolved from an explicit argument, then the
//! `RELEASE_SENTINEL_POLICIES` environment variable, then
//! `release-policies.yaml` in the working directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::path::Path;
use std::path::PathBuf;

use release_sentinel_core::PolicyConfig;
use release_sentinel_core::ReleasePlan;
use thiserror::Error;

use crate::decode::decode_policy_config;
use crate::decode::decode_release_plan;
use crate::document::MAX_TOTAL_PATH_LENGTH;
use crate::document::read_document;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default policy filename when no path is specified.
pub const DEFAULT_POLICIES_NAME: &str = "release-policies.yaml";
/// Environment variable used to override the policy path.
pub const POLICIES_ENV_VAR: &str = "RELEASE_SENTINEL_POLICIES";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Document loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading a document.
    #[error("config io error: {0}")]
    Io(String),
    /// Document is not well-formed YAML, JSON, or TOML.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Document is well-formed but violates the model.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Loaders
// ============================================================================

/// Loads the policy configuration using the default resolution rules.
///
/// # Errors
///
/// Returns [`ConfigError`] when resolution, loading, or validation fails.
pub fn load_policies(path: Option<&Path>) -> Result<PolicyConfig, ConfigError> {
    let resolved = resolve_policies_path(path)?;
    load_policies_from(&resolved)
}

/// Loads a policy configuration from an explicit path.
///
/// # Errors
///
/// Returns [`ConfigError`] when loading or validation fails.
pub fn load_policies_from(path: &Path) -> Result<PolicyConfig, ConfigError> {
    let root = read_document(path)?;
    decode_policy_config(&root).map_err(|errors| invalid("policy configuration", &errors))
}

/// Loads a release plan from an explicit path.
///
/// # Errors
///
/// Returns [`ConfigError`] when loading or validation fails.
pub fn load_release_plan(path: &Path) -> Result<ReleasePlan, ConfigError> {
    let root = read_document(path)?;
    decode_release_plan(&root).map_err(|errors| invalid("release plan", &errors))
}

/// Resolves the policy path from an argument or environment defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the environment path is too long.
pub fn resolve_policies_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    resolve_with(path, env::var(POLICIES_ENV_VAR).ok())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the policy path from an argument and an environment value.
fn resolve_with(path: Option<&Path>, env_path: Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env_path.filter(|value| !value.is_empty()) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("policy path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_POLICIES_NAME))
}

/// Joins every decoding error of one document into a single error.
fn invalid(label: &str, errors: &[String]) -> ConfigError {
    ConfigError::Invalid(format!("{label} invalid: {}", errors.join("; ")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
