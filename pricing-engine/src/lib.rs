//! Marketplace transaction pricing engine
//!
//! Computes the itemized price breakdown of one transaction: the base order
//! item for the listing's unit type, delivery fees, timezone-aware
//! time-of-day surcharges, and per-party commissions. The output of
//! [`transaction_line_items`] is both what an order summary renders and the
//! authoritative payload sent to the payment backend.
//!
//! Everything is a pure synchronous function over immutable inputs; the
//! engine performs no I/O and holds no state between invocations.

pub mod commission;
pub mod quantity;
pub mod rules;
pub mod slug;
pub mod totals;
pub mod transaction;

pub use commission::{get_customer_commission_maybe, get_provider_commission_maybe};
pub use quantity::{
    calculate_non_business_hours, calculate_overlapping_hours, calculate_quantity_from_dates,
    calculate_quantity_from_hours,
};
pub use rules::get_pricing_rule_line_items;
pub use slug::slugify_label;
pub use totals::{
    calculate_line_total, calculate_shipping_fee, calculate_total_for_customer,
    calculate_total_for_provider, calculate_total_from_line_items, construct_valid_line_items,
};
pub use transaction::{transaction_line_items, QuantityShape};
