//! Shared request/response shapes for the calculations resource.
//!
//! Both the HTTP client and the server consume these definitions, so
//! the wire contract cannot drift between the two. No business logic
//! lives here beyond payload validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::state::CalculatorState;

/// The single resource path. GET lists all records, POST creates one.
pub const CALCULATIONS_PATH: &str = "/api/calculations";

/// Create-request body. Numeric fields travel as decimal-formatted
/// text to match the arbitrary-precision storage column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalculation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime_profit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_budget_pct: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_rate_pct: Option<String>,
}

impl NewCalculation {
    pub fn from_state(state: &CalculatorState) -> Self {
        NewCalculation {
            lifetime_profit: Some(state.lifetime_profit.to_string()),
            acquisition_budget_pct: Some(state.acquisition_budget_pct.to_string()),
            conversion_rate_pct: Some(state.conversion_rate_pct.to_string()),
        }
    }

    /// Checks field presence and decimal coercibility. This is the sole
    /// gate in front of storage.
    pub fn validate(&self) -> Result<ValidCalculation, ValidationError> {
        Ok(ValidCalculation {
            lifetime_profit: require_decimal(&self.lifetime_profit, "lifetimeProfit")?,
            acquisition_budget_pct: require_decimal(
                &self.acquisition_budget_pct,
                "acquisitionBudgetPct",
            )?,
            conversion_rate_pct: require_decimal(&self.conversion_rate_pct, "conversionRatePct")?,
        })
    }
}

fn require_decimal(value: &Option<String>, field: &str) -> Result<Decimal, ValidationError> {
    let raw = value.as_deref().ok_or_else(|| ValidationError {
        message: format!("{field} is required"),
        field: Some(field.to_string()),
    })?;
    Decimal::from_str(raw.trim()).map_err(|_| ValidationError {
        message: format!("{field} must be a decimal number"),
        field: Some(field.to_string()),
    })
}

/// A create payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCalculation {
    pub lifetime_profit: Decimal,
    pub acquisition_budget_pct: Decimal,
    pub conversion_rate_pct: Decimal,
}

/// 400 response body: a message plus the offending field when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A stored row. `created_at` is assigned by the server; the decimal
/// fields come back exactly as stored, currency-unbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub id: i64,
    pub lifetime_profit: String,
    pub acquisition_budget_pct: String,
    pub conversion_rate_pct: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_decimal_strings() {
        let payload = NewCalculation {
            lifetime_profit: Some("5000".to_string()),
            acquisition_budget_pct: Some("50".to_string()),
            conversion_rate_pct: Some("10.5".to_string()),
        };
        let valid = payload.validate().unwrap();
        assert_eq!(valid.lifetime_profit, Decimal::from_str("5000").unwrap());
        assert_eq!(
            valid.conversion_rate_pct,
            Decimal::from_str("10.5").unwrap()
        );
    }

    #[test]
    fn test_validate_names_missing_field() {
        let payload = NewCalculation {
            lifetime_profit: Some("5000".to_string()),
            acquisition_budget_pct: None,
            conversion_rate_pct: Some("10".to_string()),
        };
        let err = payload.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("acquisitionBudgetPct"));
        assert!(err.message.contains("acquisitionBudgetPct"));
    }

    #[test]
    fn test_validate_names_non_decimal_field() {
        let payload = NewCalculation {
            lifetime_profit: Some("lots".to_string()),
            acquisition_budget_pct: Some("50".to_string()),
            conversion_rate_pct: Some("10".to_string()),
        };
        let err = payload.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("lifetimeProfit"));
    }

    #[test]
    fn test_from_state_serializes_camel_case_decimal_text() {
        let state = CalculatorState::default();
        let payload = NewCalculation::from_state(&state);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["lifetimeProfit"], "5000");
        assert_eq!(json["acquisitionBudgetPct"], "50");
        assert_eq!(json["conversionRatePct"], "10");
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let payload: NewCalculation = serde_json::from_str(r#"{"lifetimeProfit":"5000"}"#).unwrap();
        assert!(payload.acquisition_budget_pct.is_none());
        assert!(payload.conversion_rate_pct.is_none());
    }

    #[test]
    fn test_validation_error_omits_absent_field() {
        let err = ValidationError {
            message: "internal server error".to_string(),
            field: None,
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(!json.contains("field"));
    }
}
