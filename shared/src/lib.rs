//! Shared types for the transaction pricing engine
//!
//! Value objects only: money, line items, and the externally supplied
//! configuration snapshots (listing, order, commission, pricing rules).
//! Everything here is immutable once constructed and serde-compatible with
//! the marketplace API's camelCase JSON.

pub mod commission;
pub mod error;
pub mod line_item;
pub mod listing;
pub mod money;
pub mod order_data;
pub mod pricing_rule;

pub use commission::CommissionConfig;
pub use error::{PricingError, PricingResult};
pub use line_item::{
    is_valid_line_item_code, LineItem, Party, CODE_CUSTOMER_COMMISSION, CODE_PROVIDER_COMMISSION,
    CODE_SHIPPING_FEE, LINE_ITEM_PREFIX, MAX_LINE_ITEM_CODE_LENGTH,
};
pub use listing::{AvailabilityPlan, Listing, PriceVariant, PublicData, UnitType};
pub use money::Money;
pub use order_data::{DeliveryMethod, OrderData};
pub use pricing_rule::{PricingRule, RuleType};
