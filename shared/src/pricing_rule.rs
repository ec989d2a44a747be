//! Pricing rule configuration
//!
//! Rules are externally supplied listing configuration. Unknown rule types
//! must deserialize without failing the whole listing, so the enum carries a
//! catch-all variant and the engine skips what it does not recognize.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discriminator for the rule handler registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleType {
    TimeOfDay,
    #[serde(other)]
    Unknown,
}

/// One configured surcharge rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// Human-readable label; slugified into the line item code
    #[serde(default)]
    pub label: String,
    /// Surcharge amount per overlapping hour, in minor units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surcharge_per_hour_subunits: Option<i64>,
    /// Window start as a local wall-clock hour, 0 to 24
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_hour: Option<Decimal>,
    /// Window end as a local wall-clock hour, 0 to 24
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_hour: Option<Decimal>,
}
