// crates/release-sentinel-cli/src/render.rs
// ============================================================================
// Module: CLI Rendering
// Description: Text and JSON renderings of evaluation results and policies.
// Purpose: Keep presentation separate from command dispatch.
// Dependencies: release-sentinel-core, serde_json
// ============================================================================

//! ## Overview
//! The table rendering titles the output `Release Plan <id> (<env>)` and lays
//! out one row per decision, in plan order, with column widths fitted to the
//! widest cell. The JSON rendering is the serialized evaluation result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use release_sentinel_core::EvaluationResult;
use release_sentinel_core::PolicyConfig;

use crate::t;

// ============================================================================
// SECTION: Evaluation Results
// ============================================================================

/// Renders an evaluation result as a bordered text table.
#[must_use]
pub fn render_table(result: &EvaluationResult) -> String {
    let headers =
        [t!("render.table.service"), t!("render.table.allowed"), t!("render.table.reason")];
    let rows: Vec<[String; 3]> = result
        .decisions
        .iter()
        .map(|decision| {
            [decision.service.to_string(), allowed_label(decision.allowed), decision.reason.clone()]
        })
        .collect();

    let mut widths = headers.each_ref().map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = border_line(&widths);
    let mut out = t!(
        "render.table.title",
        plan_id = result.plan_id,
        environment = result.environment
    );
    out.push('\n');
    for line in [border.clone(), row_line(&headers, &widths), border.clone()] {
        out.push_str(&line);
        out.push('\n');
    }
    for row in &rows {
        out.push_str(&row_line(row, &widths));
        out.push('\n');
    }
    if !rows.is_empty() {
        out.push_str(&border);
        out.push('\n');
    }
    out
}

/// Renders an evaluation result as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when serialization fails.
pub fn render_json(result: &EvaluationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

// ============================================================================
// SECTION: Policies
// ============================================================================

/// Renders the policy summary printed by `show-policies`.
#[must_use]
pub fn render_policies(policy_cfg: &PolicyConfig) -> String {
    let mut out = t!("policies.default_max_risk", risk = policy_cfg.default_max_risk);
    out.push('\n');
    for policy in &policy_cfg.services {
        let windows = policy.change_windows.iter().map(ToString::to_string).collect::<Vec<_>>();
        out.push_str(&t!(
            "policies.service_entry",
            service = policy.service,
            max_risk = policy.max_risk,
            require_canary = policy.require_canary,
            windows = format!("[{}]", windows.join(", "))
        ));
        out.push('\n');
    }
    out
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the localized yes/no label.
fn allowed_label(allowed: bool) -> String {
    if allowed { t!("render.allowed.yes") } else { t!("render.allowed.no") }
}

/// Builds a `+----+` border for the given column widths.
fn border_line(widths: &[usize; 3]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width.saturating_add(2)));
        line.push('+');
    }
    line
}

/// Builds a `| cell |` row padded to the given column widths.
fn row_line(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let padding = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(padding.saturating_add(1)));
        line.push('|');
    }
    line
}
