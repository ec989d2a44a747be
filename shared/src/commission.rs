//! Commission configuration
//!
//! Fields stay as raw JSON values on purpose: marketplace configuration is
//! hand-edited, and a percentage of `"10"` must surface as a typed error
//! rather than silently deserialize to nothing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-party commission settings supplied by the marketplace operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommissionConfig {
    /// Commission as a percentage of the commissionable subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Value>,
    /// Floor for the commission, in minor units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_amount: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_fields() {
        let cfg: CommissionConfig =
            serde_json::from_str(r#"{ "percentage": 10, "minimum_amount": 500 }"#).unwrap();
        assert_eq!(cfg.percentage, Some(Value::from(10)));
        assert_eq!(cfg.minimum_amount, Some(Value::from(500)));
    }

    #[test]
    fn test_non_numeric_values_are_preserved() {
        let cfg: CommissionConfig =
            serde_json::from_str(r#"{ "percentage": "10" }"#).unwrap();
        assert_eq!(cfg.percentage, Some(Value::from("10")));
        assert_eq!(cfg.minimum_amount, None);
    }

    #[test]
    fn test_empty_config() {
        let cfg: CommissionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, CommissionConfig::default());
    }
}
