// crates/release-sentinel-config/src/decode.rs
// ============================================================================
// Module: Release Sentinel Document Decoding
// Description: Field-by-field decoding of policy and plan mappings.
// Purpose: Report every structural error of a document in one pass.
// Dependencies: release-sentinel-core, serde, serde_json
// ============================================================================

//! ## Overview
//! A mapping root is decoded one field at a time, and sequence entries are
//! decoded independently, so one bad value never hides the errors after it.
//! Each error is prefixed with its field path, for example
//! `services[1].risk: invalid risk level 'severe'`. Duplicate service and
//! window names are checked on every name that decoded, even when other
//! fields of the same entry failed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;

use release_sentinel_core::ChangeWindow;
use release_sentinel_core::PolicyConfig;
use release_sentinel_core::ReleasePlan;
use release_sentinel_core::ServiceName;
use release_sentinel_core::ServicePolicy;
use release_sentinel_core::ServiceRelease;
use release_sentinel_core::WindowName;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Error Collection
// ============================================================================

/// Errors gathered while decoding one document, in document order.
#[derive(Debug, Default)]
struct DecodeErrors {
    /// Rendered messages, path-prefixed where a field is known.
    messages: Vec<String>,
}

impl DecodeErrors {
    /// Records an error at a field path.
    fn push(&mut self, path: &str, message: impl Display) {
        self.messages.push(format!("{path}: {message}"));
    }

    /// Records a document-level error.
    fn push_plain(&mut self, message: impl Display) {
        self.messages.push(message.to_string());
    }

    /// Returns the decoded value when nothing failed, otherwise all messages.
    fn finish<T>(self, value: Option<T>) -> Result<T, Vec<String>> {
        match value {
            Some(value) if self.messages.is_empty() => Ok(value),
            _ => Err(self.messages),
        }
    }
}

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Decodes a policy configuration mapping.
pub(crate) fn decode_policy_config(
    root: &Map<String, Value>,
) -> Result<PolicyConfig, Vec<String>> {
    let mut errors = DecodeErrors::default();
    let mut window_names = Vec::new();
    let mut service_names = Vec::new();

    let default_max_risk = optional(root, "", "default_max_risk", &mut errors);
    let windows = sequence(root, "", "windows", &mut errors, |fields, path, errors| {
        decode_change_window(fields, path, errors, &mut window_names)
    });
    let services = sequence(root, "", "services", &mut errors, |fields, path, errors| {
        decode_service_policy(fields, path, errors, &mut service_names)
    });
    for duplicate in PolicyConfig::duplicate_name_errors(&service_names, &window_names) {
        errors.push_plain(duplicate);
    }

    let config = match (default_max_risk, windows, services) {
        (Some(default_max_risk), Some(windows), Some(services)) => Some(PolicyConfig {
            default_max_risk,
            windows,
            services,
        }),
        _ => None,
    };
    errors.finish(config)
}

/// Decodes a release plan mapping.
pub(crate) fn decode_release_plan(
    root: &Map<String, Value>,
) -> Result<ReleasePlan, Vec<String>> {
    let mut errors = DecodeErrors::default();

    let id = required(root, "", "id", &mut errors);
    let environment = required(root, "", "environment", &mut errors);
    let description = optional(root, "", "description", &mut errors);
    let requested_by = required(root, "", "requested_by", &mut errors);
    let at = required(root, "", "at", &mut errors);
    let services = sequence(root, "", "services", &mut errors, decode_service_release);

    let plan = match (id, environment, description, requested_by, at, services) {
        (
            Some(id),
            Some(environment),
            Some(description),
            Some(requested_by),
            Some(at),
            Some(services),
        ) => Some(ReleasePlan {
            id,
            environment,
            description,
            requested_by,
            at,
            services,
        }),
        _ => None,
    };
    errors.finish(plan)
}

// ============================================================================
// SECTION: Entries
// ============================================================================

/// Decodes one change window, recording its name for duplicate checks.
fn decode_change_window(
    fields: &Map<String, Value>,
    path: &str,
    errors: &mut DecodeErrors,
    names: &mut Vec<WindowName>,
) -> Option<ChangeWindow> {
    let name: Option<WindowName> = required(fields, path, "name", errors);
    if let Some(name) = &name {
        names.push(name.clone());
    }
    let start = required(fields, path, "start", errors);
    let end = required(fields, path, "end", errors);
    let environments = optional(fields, path, "environments", errors);
    Some(ChangeWindow {
        name: name?,
        start: start?,
        end: end?,
        environments: environments?,
    })
}

/// Decodes one service policy, recording its service for duplicate checks.
fn decode_service_policy(
    fields: &Map<String, Value>,
    path: &str,
    errors: &mut DecodeErrors,
    names: &mut Vec<ServiceName>,
) -> Option<ServicePolicy> {
    let service: Option<ServiceName> = required(fields, path, "service", errors);
    if let Some(service) = &service {
        names.push(service.clone());
    }
    let max_risk = required(fields, path, "max_risk", errors);
    let require_canary = optional(fields, path, "require_canary", errors);
    let change_windows = optional(fields, path, "change_windows", errors);
    Some(ServicePolicy {
        service: service?,
        max_risk: max_risk?,
        require_canary: require_canary?,
        change_windows: change_windows?,
    })
}

/// Decodes one service release entry.
fn decode_service_release(
    fields: &Map<String, Value>,
    path: &str,
    errors: &mut DecodeErrors,
) -> Option<ServiceRelease> {
    let name = required(fields, path, "name", errors);
    let risk = required(fields, path, "risk", errors);
    let mode = optional(fields, path, "mode", errors);
    let metadata = optional(fields, path, "metadata", errors);
    Some(ServiceRelease {
        name: name?,
        risk: risk?,
        mode: mode?,
        metadata: metadata?,
    })
}

// ============================================================================
// SECTION: Field Readers
// ============================================================================

/// Decodes a field that must be present.
fn required<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    path: &str,
    key: &str,
    errors: &mut DecodeErrors,
) -> Option<T> {
    let field_path = child_path(path, key);
    match fields.get(key) {
        Some(value) => decode_value(value, &field_path, errors),
        None => {
            errors.push(&field_path, "missing required field");
            None
        }
    }
}

/// Decodes a field that falls back to its default when absent.
fn optional<T: DeserializeOwned + Default>(
    fields: &Map<String, Value>,
    path: &str,
    key: &str,
    errors: &mut DecodeErrors,
) -> Option<T> {
    match fields.get(key) {
        Some(value) => decode_value(value, &child_path(path, key), errors),
        None => Some(T::default()),
    }
}

/// Decodes every entry of an optional sequence field independently.
///
/// Returns `None` when the field or any entry failed; errors for all entries
/// are still recorded.
fn sequence<T>(
    fields: &Map<String, Value>,
    path: &str,
    key: &str,
    errors: &mut DecodeErrors,
    mut decode_entry: impl FnMut(&Map<String, Value>, &str, &mut DecodeErrors) -> Option<T>,
) -> Option<Vec<T>> {
    let field_path = child_path(path, key);
    let entries = match fields.get(key) {
        None => return Some(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            errors.push(&field_path, "expected a sequence");
            return None;
        }
    };

    let mut decoded = Vec::with_capacity(entries.len());
    let mut complete = true;
    for (index, entry) in entries.iter().enumerate() {
        let entry_path = format!("{field_path}[{index}]");
        let value = match entry {
            Value::Object(entry_fields) => decode_entry(entry_fields, &entry_path, errors),
            _ => {
                errors.push(&entry_path, "expected a mapping");
                None
            }
        };
        match value {
            Some(value) => decoded.push(value),
            None => complete = false,
        }
    }
    complete.then_some(decoded)
}

/// Deserializes one value, recording the failure at its path.
fn decode_value<T: DeserializeOwned>(
    value: &Value,
    path: &str,
    errors: &mut DecodeErrors,
) -> Option<T> {
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            errors.push(path, err);
            None
        }
    }
}

/// Joins a parent path and a field name.
fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() { key.to_string() } else { format!("{path}.{key}") }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn mapping(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(fields) => fields,
            _ => Map::new(),
        }
    }

    #[test]
    fn entry_errors_carry_indexed_paths() {
        let root = mapping(json!({
            "id": "r", "environment": "e", "requested_by": "u", "at": "t",
            "services": [{"name": "a", "risk": 1}, {"risk": "low", "mode": "rolling"}]
        }));
        let errors = decode_release_plan(&root).err().unwrap_or_default();
        assert_eq!(errors.len(), 2, "{}", errors.join("; "));
        assert_eq!(errors[0], "services[1].name: missing required field");
        assert!(errors[1].starts_with("services[1].mode: "), "{}", errors[1]);
    }

    #[test]
    fn non_mapping_entries_and_sequences_are_reported() {
        let root = mapping(json!({"windows": "nightly", "services": ["api"]}));
        let errors = decode_policy_config(&root).err().unwrap_or_default();
        assert_eq!(errors, ["windows: expected a sequence", "services[0]: expected a mapping"]);
    }
}
