// crates/release-sentinel-providers/src/file.rs
// ============================================================================
// Module: Snapshot File Signal Provider
// Description: Signal provider backed by a YAML or JSON snapshot document.
// Purpose: Feed recorded readiness data into plan evaluation.
// Dependencies: release-sentinel-core, serde, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! A snapshot document has the shape `{ signals: [ {service, slo_breached,
//! open_incidents, in_freeze}, ... ] }`. The file is read once, bounded by
//! [`FileSignalConfig::max_bytes`]; services absent from the snapshot are
//! reported healthy.
//!
//! ## Invariants
//! - Each service appears at most once in a snapshot.
//! - An empty document is an empty snapshot.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;

use release_sentinel_core::ServiceName;
use release_sentinel_core::ServiceSignals;
use release_sentinel_core::SignalProvider;
use release_sentinel_core::StaticSignalProvider;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while loading a signal snapshot.
#[derive(Debug, Error)]
pub enum SignalSourceError {
    /// Snapshot could not be read.
    #[error("signal snapshot io error: {0}")]
    Io(String),
    /// Snapshot is not well-formed.
    #[error("signal snapshot parse error: {0}")]
    Parse(String),
    /// Snapshot is well-formed but invalid.
    #[error("invalid signal snapshot: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the snapshot file provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSignalConfig {
    /// Maximum snapshot size in bytes.
    pub max_bytes: usize,
    /// Accept YAML snapshots in addition to JSON.
    pub allow_yaml: bool,
}

impl Default for FileSignalConfig {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            allow_yaml: true,
        }
    }
}

/// Wire shape of a snapshot document.
#[derive(Debug, Default, Deserialize)]
struct SignalSnapshot {
    /// Recorded signals, one entry per service.
    #[serde(default)]
    signals: Vec<ServiceSignals>,
}

// ============================================================================
// SECTION: Provider Implementation
// ============================================================================

/// Signal provider loaded from a snapshot file.
#[derive(Debug, Clone)]
pub struct FileSignalProvider {
    /// Snapshot contents keyed by service.
    signals: StaticSignalProvider,
}

impl FileSignalProvider {
    /// Loads a snapshot with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SignalSourceError`] when the snapshot cannot be loaded.
    pub fn load(path: &Path) -> Result<Self, SignalSourceError> {
        Self::load_with(path, &FileSignalConfig::default())
    }

    /// Loads a snapshot with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SignalSourceError`] when the snapshot cannot be loaded.
    pub fn load_with(path: &Path, config: &FileSignalConfig) -> Result<Self, SignalSourceError> {
        let content = read_file_limited(path, config.max_bytes)?;
        let snapshot = parse_snapshot(path, &content, config.allow_yaml)?;
        let mut signals = StaticSignalProvider::new();
        for entry in snapshot.signals {
            if signals.contains(&entry.service) {
                return Err(SignalSourceError::Invalid(format!(
                    "duplicate signals for service: {}",
                    entry.service
                )));
            }
            signals.register(entry);
        }
        Ok(Self {
            signals,
        })
    }

    /// Returns the number of services recorded in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns true when the snapshot recorded no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl SignalProvider for FileSignalProvider {
    fn for_service(&self, service: &ServiceName) -> ServiceSignals {
        self.signals.for_service(service)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a file while enforcing a maximum byte limit.
fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, SignalSourceError> {
    let file = File::open(path)
        .map_err(|err| SignalSourceError::Io(format!("{}: {err}", path.display())))?;
    let limit = u64::try_from(max_bytes.saturating_add(1))
        .map_err(|_| SignalSourceError::Invalid("snapshot size limit exceeds u64".to_string()))?;
    let mut buf = Vec::new();
    file.take(limit)
        .read_to_end(&mut buf)
        .map_err(|err| SignalSourceError::Io(format!("{}: {err}", path.display())))?;
    if buf.len() > max_bytes {
        return Err(SignalSourceError::Invalid("snapshot exceeds size limit".to_string()));
    }
    Ok(buf)
}

/// Parses a JSON or YAML snapshot document.
fn parse_snapshot(
    path: &Path,
    content: &[u8],
    allow_yaml: bool,
) -> Result<SignalSnapshot, SignalSourceError> {
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    let value: Value = if ext.eq_ignore_ascii_case("json") {
        serde_json::from_slice(content).map_err(|err| SignalSourceError::Parse(err.to_string()))?
    } else {
        if !allow_yaml {
            return Err(SignalSourceError::Invalid("yaml parsing is disabled".to_string()));
        }
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(SignalSnapshot::default());
        }
        serde_yaml::from_slice(content).map_err(|err| SignalSourceError::Parse(err.to_string()))?
    };
    match value {
        Value::Null => Ok(SignalSnapshot::default()),
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|err| SignalSourceError::Invalid(err.to_string())),
        _ => Err(SignalSourceError::Invalid(format!(
            "expected mapping at root of {}",
            path.display()
        ))),
    }
}
