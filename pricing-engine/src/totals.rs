//! Line item totals
//!
//! A line total comes from exactly one pricing mode: quantity, percentage of
//! the unit price, or units multiplied by seats. Aggregate totals per party
//! run every item through validation first, so the returned collections
//! always carry `line_total` and `reversal`.

use rust_decimal::Decimal;
use shared::{is_valid_line_item_code, LineItem, Money, Party, PricingError, PricingResult};

/// `unit_price × quantity`; quantity may be fractional for hourly items
pub fn calculate_total_price_from_quantity(unit_price: &Money, quantity: Decimal) -> Money {
    unit_price.multiply(quantity)
}

/// `unit_price × percentage / 100`, sign-preserving
pub fn calculate_total_price_from_percentage(unit_price: &Money, percentage: Decimal) -> Money {
    unit_price.percentage(percentage)
}

/// `unit_price × units × seats`
pub fn calculate_total_price_from_seats(
    unit_price: &Money,
    units: Decimal,
    seats: i32,
) -> PricingResult<Money> {
    if seats < 0 {
        return Err(PricingError::InvalidSeats(seats));
    }
    Ok(unit_price.multiply(units * Decimal::from(seats)))
}

/// Total of a single line item, dispatched on its pricing mode.
///
/// A zero percentage is a valid mode and yields a zero total.
pub fn calculate_line_total(item: &LineItem) -> PricingResult<Money> {
    if let Some(quantity) = item.quantity {
        return Ok(calculate_total_price_from_quantity(&item.unit_price, quantity));
    }
    if let Some(percentage) = item.percentage {
        return Ok(calculate_total_price_from_percentage(
            &item.unit_price,
            percentage,
        ));
    }
    if let (Some(units), Some(seats)) = (item.units, item.seats) {
        return calculate_total_price_from_seats(&item.unit_price, units, seats);
    }
    Err(PricingError::MissingPricingParameters(item.code.clone()))
}

/// Sum of line totals across all given items
pub fn calculate_total_from_line_items(
    items: &[LineItem],
    currency: &str,
) -> PricingResult<Money> {
    items.iter().try_fold(Money::zero(currency), |acc, item| {
        acc.add(&calculate_line_total(item)?)
    })
}

/// Validates every code and attaches the derived `line_total` and a
/// `reversal: false` flag
pub fn construct_valid_line_items(items: &[LineItem]) -> PricingResult<Vec<LineItem>> {
    items
        .iter()
        .map(|item| {
            if !is_valid_line_item_code(&item.code) {
                return Err(PricingError::InvalidLineItemCode(item.code.clone()));
            }
            let mut valid = item.clone();
            valid.line_total = Some(calculate_line_total(item)?);
            valid.reversal = Some(false);
            Ok(valid)
        })
        .collect()
}

/// Payout total: sum over items included for the provider
pub fn calculate_total_for_provider(items: &[LineItem], currency: &str) -> PricingResult<Money> {
    calculate_total_for_party(items, currency, Party::Provider)
}

/// Payin total: sum over items included for the customer
pub fn calculate_total_for_customer(items: &[LineItem], currency: &str) -> PricingResult<Money> {
    calculate_total_for_party(items, currency, Party::Customer)
}

fn calculate_total_for_party(
    items: &[LineItem],
    currency: &str,
    party: Party,
) -> PricingResult<Money> {
    let valid = construct_valid_line_items(items)?;
    valid
        .iter()
        .filter(|item| item.includes(party))
        .try_fold(Money::zero(currency), |acc, item| {
            match &item.line_total {
                Some(total) => acc.add(total),
                // construct_valid_line_items always attaches a total
                None => Ok(acc),
            }
        })
}

/// Shipping fee for `quantity` items: first item at `price_one_item`, every
/// further item at `price_additional_items`.
///
/// Returns `None` when shipping does not apply: no single-item price
/// configured, both prices non-positive, quantity below one, or a negative
/// resulting fee. A zero fee with a positive configured price is still a fee.
pub fn calculate_shipping_fee(
    price_one_item: Option<i64>,
    price_additional_items: Option<i64>,
    currency: &str,
    quantity: i64,
) -> Option<Money> {
    let one_item = price_one_item?;
    let additional_items = price_additional_items.unwrap_or(0);
    if one_item <= 0 && additional_items <= 0 {
        return None;
    }
    if quantity < 1 {
        return None;
    }
    let fee = one_item + additional_items * (quantity - 1);
    (fee >= 0).then(|| Money::new(fee, currency))
}
