//! Line item model
//!
//! A transaction price is an ordered list of line items. Each item prices one
//! component (base order, shipping, surcharge, commission) in exactly one
//! mode: a quantity, a percentage of the unit price, or units multiplied by
//! seats. The `include_for` set decides whose total the item counts towards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Namespace prefix every line item code must carry
pub const LINE_ITEM_PREFIX: &str = "line-item/";

/// Maximum total length of a line item code, prefix included
pub const MAX_LINE_ITEM_CODE_LENGTH: usize = 64;

pub const CODE_PROVIDER_COMMISSION: &str = "line-item/provider-commission";
pub const CODE_CUSTOMER_COMMISSION: &str = "line-item/customer-commission";
pub const CODE_SHIPPING_FEE: &str = "line-item/shipping-fee";

/// Counterparty of the transaction a line item applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Customer,
    Provider,
}

impl Party {
    /// Both parties, in customer-first order
    pub fn both() -> Vec<Party> {
        vec![Party::Customer, Party::Provider]
    }
}

/// One priced component of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Code in the `line-item/<slug>` namespace
    pub code: String,
    /// Price of a single unit, or the base amount for percentage items
    pub unit_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<i32>,
    /// Parties whose payin/payout totals this item contributes to
    pub include_for: Vec<Party>,
    /// Derived total, attached during line item validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_total: Option<Money>,
    /// Marks a refund counter-entry; always `false` on freshly built items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reversal: Option<bool>,
}

impl LineItem {
    /// Quantity-priced item
    pub fn from_quantity(
        code: impl Into<String>,
        unit_price: Money,
        quantity: Decimal,
        include_for: Vec<Party>,
    ) -> Self {
        Self {
            code: code.into(),
            unit_price,
            quantity: Some(quantity),
            percentage: None,
            units: None,
            seats: None,
            include_for,
            line_total: None,
            reversal: None,
        }
    }

    /// Percentage-priced item; `unit_price` carries the base amount
    pub fn from_percentage(
        code: impl Into<String>,
        unit_price: Money,
        percentage: Decimal,
        include_for: Vec<Party>,
    ) -> Self {
        Self {
            code: code.into(),
            unit_price,
            quantity: None,
            percentage: Some(percentage),
            units: None,
            seats: None,
            include_for,
            line_total: None,
            reversal: None,
        }
    }

    /// Units-times-seats priced item
    pub fn from_units_and_seats(
        code: impl Into<String>,
        unit_price: Money,
        units: Decimal,
        seats: i32,
        include_for: Vec<Party>,
    ) -> Self {
        Self {
            code: code.into(),
            unit_price,
            quantity: None,
            percentage: None,
            units: Some(units),
            seats: Some(seats),
            include_for,
            line_total: None,
            reversal: None,
        }
    }

    pub fn includes(&self, party: Party) -> bool {
        self.include_for.contains(&party)
    }
}

/// Checks `code` against the `line-item/<slug>` namespace.
///
/// The slug must be non-empty, lowercase alphanumeric with hyphens, and the
/// whole code must fit in [`MAX_LINE_ITEM_CODE_LENGTH`] characters.
pub fn is_valid_line_item_code(code: &str) -> bool {
    if code.len() > MAX_LINE_ITEM_CODE_LENGTH {
        return false;
    }
    let Some(slug) = code.strip_prefix(LINE_ITEM_PREFIX) else {
        return false;
    };
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
