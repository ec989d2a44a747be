//! Error taxonomy for the pricing engine
//!
//! Every failure is a synchronous local validation error raised to the
//! immediate caller; nothing here is transient or retryable. Messages carry
//! enough detail to reconstruct the cause without a debugger.

use thiserror::Error;

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Unified error type for the pricing engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Arithmetic between two different currencies
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    /// Negative seat count
    #[error("value of seats can't be negative, got {0}")]
    InvalidSeats(i32),

    /// Date-based quantity requested for a unit code without day granularity
    #[error("can't calculate quantity from dates for unit type: {0}")]
    UnsupportedUnitType(String),

    /// A line item specifies none of quantity / percentage / units+seats
    #[error(
        "can't calculate the line total of line item {0}: \
         quantity, percentage or both seats and units required"
    )]
    MissingPricingParameters(String),

    /// A line item code outside the `line-item/<slug>` namespace
    #[error("invalid line item code: {0}")]
    InvalidLineItemCode(String),

    /// A commission percentage or minimum amount is present but not numeric
    #[error("{0} is not a number")]
    NonNumericCommissionField(String),

    /// The assembler could not derive a usable quantity from order data
    #[error(
        "order data is missing the following information: {missing}. \
         Quantity or either units & seats is required"
    )]
    MissingQuantityInformation { missing: String },

    /// Neither the listing, a price variant, nor a negotiated offer yields a unit price
    #[error("listing has no price and order data carries no offer for the unit price")]
    MissingUnitPrice,

    /// A resolved minimum commission is larger than the customer pay-in total
    #[error("minimum commission {minimum} exceeds the customer pay-in total {payin}")]
    MinimumExceedsPayin { minimum: i64, payin: i64 },
}
