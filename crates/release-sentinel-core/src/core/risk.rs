// crates/release-sentinel-core/src/core/risk.rs
// ============================================================================
// Module: Release Sentinel Risk Values
// Description: Named risk levels and the numeric/named risk union.
// Purpose: Represent risk as a validated tagged sum that normalizes to one scale.
// Dependencies: crate::core::validation, serde
// ============================================================================

//! ## Overview
//! A risk value is either a raw integer in `[1, 5]` or a named level. Both
//! forms coexist in policies and plans and are only compared after
//! normalization (see [`crate::runtime::normalize_risk`]). Named levels rank
//! `low = 1` through `critical = 4`; no named level reaches numeric `5`.
//!
//! ## Invariants
//! - A [`NumericRisk`] can only be constructed inside `[1, 5]`.
//! - Named levels parse case-insensitively and serialize lowercase.
//! - On the wire, integer strings (`"2"`) and whole floats (`3.0`) are read as
//!   numeric risks; fractional floats are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::core::validation::ValidationError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Smallest accepted numeric risk.
pub const MIN_NUMERIC_RISK: u8 = 1;
/// Largest accepted numeric risk.
pub const MAX_NUMERIC_RISK: u8 = 5;

// ============================================================================
// SECTION: Risk Level
// ============================================================================

/// Ordered named risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RiskLevel {
    /// Low risk (rank 1).
    Low,
    /// Medium risk (rank 2).
    Medium,
    /// High risk (rank 3).
    High,
    /// Critical risk (rank 4).
    Critical,
}

impl RiskLevel {
    /// All named levels in ascending order.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Returns the fixed integer rank of the level.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Parses a level name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownRiskLevel`] when the name is not a level.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ValidationError::UnknownRiskLevel(value.to_string()))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for RiskLevel {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RiskLevel> for String {
    fn from(value: RiskLevel) -> Self {
        value.as_str().to_string()
    }
}

// ============================================================================
// SECTION: Numeric Risk
// ============================================================================

/// Numeric risk guaranteed to lie within `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumericRisk(u8);

impl NumericRisk {
    /// Creates a numeric risk after range validation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RiskOutOfRange`] outside `[1, 5]`.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|risk| (MIN_NUMERIC_RISK ..= MAX_NUMERIC_RISK).contains(risk))
            .map(Self)
            .ok_or(ValidationError::RiskOutOfRange(value))
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

// ============================================================================
// SECTION: Risk Value
// ============================================================================

/// Risk expressed either numerically or as a named level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRisk", into = "RawRisk")]
pub enum RiskValue {
    /// Raw numeric risk in `[1, 5]`.
    Numeric(NumericRisk),
    /// Named risk level.
    Level(RiskLevel),
}

impl RiskValue {
    /// Creates a numeric risk value after range validation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RiskOutOfRange`] outside `[1, 5]`.
    pub fn numeric(value: i64) -> Result<Self, ValidationError> {
        NumericRisk::new(value).map(Self::Numeric)
    }

    /// Creates a named risk value.
    #[must_use]
    pub const fn level(level: RiskLevel) -> Self {
        Self::Level(level)
    }
}

impl Default for RiskValue {
    fn default() -> Self {
        Self::Level(RiskLevel::Medium)
    }
}

impl fmt::Display for RiskValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(risk) => risk.get().fmt(f),
            Self::Level(level) => level.fmt(f),
        }
    }
}

impl From<RiskLevel> for RiskValue {
    fn from(value: RiskLevel) -> Self {
        Self::Level(value)
    }
}

/// Wire form of a risk value before validation.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRisk {
    /// Integer form.
    Numeric(i64),
    /// Float form; only whole numbers are accepted.
    Float(f64),
    /// Level name or integer string form.
    Named(String),
}

impl TryFrom<RawRisk> for RiskValue {
    type Error = ValidationError;

    fn try_from(value: RawRisk) -> Result<Self, Self::Error> {
        match value {
            RawRisk::Numeric(number) => Self::numeric(number),
            RawRisk::Float(number) => whole_number(number)
                .ok_or_else(|| ValidationError::FractionalRisk(number.to_string()))
                .and_then(Self::numeric),
            RawRisk::Named(name) => match name.trim().parse::<i64>() {
                Ok(number) => Self::numeric(number),
                Err(_) => RiskLevel::parse(&name).map(Self::Level),
            },
        }
    }
}

/// Returns the integer a float spells exactly, if any.
fn whole_number(value: f64) -> Option<i64> {
    value.to_string().parse().ok()
}

impl From<RiskValue> for RawRisk {
    fn from(value: RiskValue) -> Self {
        match value {
            RiskValue::Numeric(risk) => Self::Numeric(i64::from(risk.get())),
            RiskValue::Level(level) => Self::Named(level.as_str().to_string()),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_risk_accepts_bounds() {
        assert_eq!(NumericRisk::new(1).map(NumericRisk::get), Ok(1));
        assert_eq!(NumericRisk::new(5).map(NumericRisk::get), Ok(5));
    }

    #[test]
    fn numeric_risk_rejects_out_of_range() {
        assert_eq!(NumericRisk::new(0), Err(ValidationError::RiskOutOfRange(0)));
        assert_eq!(NumericRisk::new(6), Err(ValidationError::RiskOutOfRange(6)));
        assert_eq!(NumericRisk::new(-3), Err(ValidationError::RiskOutOfRange(-3)));
        assert_eq!(NumericRisk::new(300), Err(ValidationError::RiskOutOfRange(300)));
    }

    #[test]
    fn level_parse_ignores_case() {
        assert_eq!(RiskLevel::parse("HIGH"), Ok(RiskLevel::High));
        assert_eq!(RiskLevel::parse("Critical"), Ok(RiskLevel::Critical));
        assert_eq!(
            RiskLevel::parse("severe"),
            Err(ValidationError::UnknownRiskLevel("severe".to_string()))
        );
    }

    #[test]
    fn risk_value_deserializes_both_forms() {
        let numeric: Result<RiskValue, _> = serde_json::from_str("3");
        let named: Result<RiskValue, _> = serde_json::from_str("\"Low\"");
        assert_eq!(numeric.ok(), RiskValue::numeric(3).ok());
        assert_eq!(named.ok(), Some(RiskValue::Level(RiskLevel::Low)));
    }

    #[test]
    fn risk_value_accepts_integer_strings_and_whole_floats() {
        let quoted: Result<RiskValue, _> = serde_json::from_str("\" 2\"");
        let whole: Result<RiskValue, _> = serde_json::from_str("3.0");
        assert_eq!(quoted.ok(), RiskValue::numeric(2).ok());
        assert_eq!(whole.ok(), RiskValue::numeric(3).ok());
    }

    #[test]
    fn fractional_and_out_of_range_floats_are_rejected() {
        let fractional = serde_json::from_str::<RiskValue>("2.5").map_err(|err| err.to_string());
        let expected = "numeric risk must be a whole number, got 2.5";
        assert!(fractional.is_err_and(|err| err.contains(expected)));
        assert_eq!(
            RiskValue::try_from(RawRisk::Float(6.0)),
            Err(ValidationError::RiskOutOfRange(6))
        );
        assert_eq!(
            RiskValue::try_from(RawRisk::Named("9".to_string())),
            Err(ValidationError::RiskOutOfRange(9))
        );
    }

    #[test]
    fn risk_value_rejects_invalid_wire_values() {
        assert!(serde_json::from_str::<RiskValue>("10").is_err());
        assert!(serde_json::from_str::<RiskValue>("\"extreme\"").is_err());
        assert!(serde_json::from_str::<RiskValue>("2.5").is_err());
    }

    #[test]
    fn risk_value_serializes_lowercase_level() {
        let json = serde_json::to_string(&RiskValue::Level(RiskLevel::Medium)).ok();
        assert_eq!(json.as_deref(), Some("\"medium\""));
    }
}
