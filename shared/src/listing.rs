//! Listing snapshot consumed by the pricing engine
//!
//! Only the pricing-relevant slice of a listing is modeled here. `public_data`
//! mirrors the operator-editable configuration; everything is optional because
//! listings in the wild carry whatever their creation flow happened to set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::money::Money;
use crate::pricing_rule::PricingRule;

/// How a listing is sold or booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Item,
    Day,
    Night,
    Hour,
    Fixed,
    Week,
    Month,
    Offer,
    Request,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Item => "item",
            UnitType::Day => "day",
            UnitType::Night => "night",
            UnitType::Hour => "hour",
            UnitType::Fixed => "fixed",
            UnitType::Week => "week",
            UnitType::Month => "month",
            UnitType::Offer => "offer",
            UnitType::Request => "request",
        }
    }

    /// Line item code for the base order item of this unit type
    pub fn code(&self) -> String {
        format!("line-item/{}", self.as_str())
    }

    /// Unit types sold against a booking calendar
    pub fn is_bookable(&self) -> bool {
        matches!(
            self,
            UnitType::Day
                | UnitType::Night
                | UnitType::Hour
                | UnitType::Fixed
                | UnitType::Week
                | UnitType::Month
        )
    }

    /// Unit types whose base quantity is a whole-day count
    pub fn uses_day_count(&self) -> bool {
        matches!(
            self,
            UnitType::Day | UnitType::Night | UnitType::Week | UnitType::Month
        )
    }

    /// Unit types priced by a negotiated offer instead of a listed price
    pub fn is_negotiation(&self) -> bool {
        matches!(self, UnitType::Offer | UnitType::Request)
    }
}

/// Alternate fixed price selectable by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Kept raw so a malformed amount disqualifies the variant instead of
    /// failing listing deserialization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_in_subunits: Option<Value>,
}

impl PriceVariant {
    /// The variant amount when it is a valid non-negative integer
    pub fn valid_price_in_subunits(&self) -> Option<i64> {
        self.price_in_subunits
            .as_ref()
            .and_then(Value::as_i64)
            .filter(|amount| *amount >= 0)
    }
}

/// Booking calendar settings; only the timezone matters for pricing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Operator-editable listing configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<UnitType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_variants: Option<Vec<PriceVariant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_variations_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_price_in_subunits_one_item: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_price_in_subunits_additional_items: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_rules: Option<Vec<PricingRule>>,
    /// Legacy single-rule surcharge, superseded by `pricing_rules`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening_surcharge_per_hour_subunits: Option<i64>,
    /// Legacy window start for the evening surcharge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_hours_end: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_timezone: Option<String>,
}

/// Pricing-relevant slice of a listing record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(default)]
    pub public_data: PublicData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_plan: Option<AvailabilityPlan>,
}

impl Listing {
    /// Configured timezone name: `listingTimezone` first, then the
    /// availability plan's timezone
    pub fn timezone_name(&self) -> Option<&str> {
        self.public_data
            .listing_timezone
            .as_deref()
            .or_else(|| {
                self.availability_plan
                    .as_ref()
                    .and_then(|plan| plan.timezone.as_deref())
            })
    }
}
