//! Commission resolution
//!
//! Each party's commission is either a percentage of the commissionable
//! subtotal or a fixed minimum, whichever is larger in magnitude. The
//! minimum stays a positive amount; the provider side carries its sign in a
//! quantity of -1 or a negated percentage.

use rust_decimal::prelude::*;
use serde_json::Value;
use shared::{
    CommissionConfig, LineItem, Money, Party, PricingError, PricingResult,
    CODE_CUSTOMER_COMMISSION, CODE_PROVIDER_COMMISSION,
};

use crate::totals::calculate_total_from_line_items;

/// Commission line item for the provider, or an empty list when no
/// commission is configured. The emitted total is negative (a deduction).
pub fn get_provider_commission_maybe(
    config: &CommissionConfig,
    commissionable_items: &[LineItem],
    currency: &str,
) -> PricingResult<Vec<LineItem>> {
    commission_maybe(config, commissionable_items, currency, Party::Provider)
}

/// Commission line item for the customer, or an empty list when no
/// commission is configured. The emitted total is positive (a charge).
pub fn get_customer_commission_maybe(
    config: &CommissionConfig,
    commissionable_items: &[LineItem],
    currency: &str,
) -> PricingResult<Vec<LineItem>> {
    commission_maybe(config, commissionable_items, currency, Party::Customer)
}

fn commission_maybe(
    config: &CommissionConfig,
    commissionable_items: &[LineItem],
    currency: &str,
    party: Party,
) -> PricingResult<Vec<LineItem>> {
    let percentage = commission_percentage(config)?;
    let minimum = minimum_commission(config)?;
    if percentage.is_none() && minimum.is_none() {
        return Ok(vec![]);
    }

    let (code, sign) = match party {
        Party::Provider => (CODE_PROVIDER_COMMISSION, Decimal::NEGATIVE_ONE),
        Party::Customer => (CODE_CUSTOMER_COMMISSION, Decimal::ONE),
    };

    let subtotal = calculate_total_from_line_items(commissionable_items, currency)?;

    let item = match (minimum, percentage) {
        (Some(minimum), Some(percentage)) => {
            let percentage_amount = subtotal.percentage(percentage);
            if minimum > percentage_amount.amount.abs() {
                fixed_commission(code, minimum, currency, sign, party)
            } else {
                percentage_commission(code, subtotal, percentage * sign, party)
            }
        }
        (Some(minimum), None) => fixed_commission(code, minimum, currency, sign, party),
        (None, Some(percentage)) => percentage_commission(code, subtotal, percentage * sign, party),
        (None, None) => return Ok(vec![]),
    };

    Ok(vec![item])
}

fn fixed_commission(
    code: &str,
    minimum: i64,
    currency: &str,
    sign: Decimal,
    party: Party,
) -> LineItem {
    LineItem::from_quantity(code, Money::new(minimum, currency), sign, vec![party])
}

fn percentage_commission(
    code: &str,
    subtotal: Money,
    percentage: Decimal,
    party: Party,
) -> LineItem {
    LineItem::from_percentage(code, subtotal, percentage, vec![party])
}

/// Effective commission percentage, `None` when absent, null, zero or
/// negative. Errors when present but not a number.
pub fn commission_percentage(config: &CommissionConfig) -> PricingResult<Option<Decimal>> {
    numeric_commission_field(config.percentage.as_ref(), "percentage")
        .map(|value| value.filter(|p| *p > Decimal::ZERO))
}

/// Effective minimum commission in minor units, filtered like the percentage
pub fn minimum_commission(config: &CommissionConfig) -> PricingResult<Option<i64>> {
    let value = numeric_commission_field(config.minimum_amount.as_ref(), "minimum_amount")?;
    Ok(value
        .filter(|minimum| *minimum > Decimal::ZERO)
        .and_then(|minimum| minimum.to_i64()))
}

/// Whether a usable (positive, numeric) percentage is configured
pub fn has_commission_percentage(config: &CommissionConfig) -> PricingResult<bool> {
    Ok(commission_percentage(config)?.is_some())
}

/// Whether a usable (positive, numeric) minimum is configured
pub fn has_minimum_commission(config: &CommissionConfig) -> PricingResult<bool> {
    Ok(minimum_commission(config)?.is_some())
}

fn numeric_commission_field(
    value: Option<&Value>,
    field: &str,
) -> PricingResult<Option<Decimal>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(int) = n.as_i64() {
                return Ok(Some(Decimal::from(int)));
            }
            let float = n
                .as_f64()
                .and_then(Decimal::from_f64)
                .ok_or_else(|| PricingError::NonNumericCommissionField(field.to_string()))?;
            Ok(Some(float))
        }
        Some(_) => Err(PricingError::NonNumericCommissionField(field.to_string())),
    }
}
