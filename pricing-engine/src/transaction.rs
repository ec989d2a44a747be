//! Transaction assembly
//!
//! Single pass from listing plus order data to the final ordered line item
//! collection: resolve the unit price, derive the base quantity for the unit
//! type, evaluate surcharge rules for hourly bookings, then append the
//! per-party commissions. Commission is computed over the base order and the
//! surcharges, never over delivery fees.
//!
//! Every line item for the customer sums into the payin total; every line
//! item for the provider sums into the payout total. The platform keeps the
//! difference.

use rust_decimal::Decimal;
use shared::{
    CommissionConfig, DeliveryMethod, LineItem, Listing, Money, OrderData, Party, PricingError,
    PricingResult, PublicData, UnitType, CODE_CUSTOMER_COMMISSION, CODE_PROVIDER_COMMISSION,
    CODE_SHIPPING_FEE,
};

use crate::commission::{get_customer_commission_maybe, get_provider_commission_maybe};
use crate::quantity::{calculate_quantity_from_dates, calculate_quantity_from_hours};
use crate::rules::get_pricing_rule_line_items;
use crate::totals::{
    calculate_shipping_fee, calculate_total_for_customer, construct_valid_line_items,
};

/// Quantity resolved for the base order line item. A booking either has a
/// bare quantity or splits it into units and seats, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityShape {
    Quantity(Decimal),
    UnitsAndSeats { units: Decimal, seats: i32 },
}

struct QuantityAndExtras {
    quantity: Option<Decimal>,
    units: Option<Decimal>,
    seats: Option<i32>,
    extra_line_items: Vec<LineItem>,
}

impl QuantityAndExtras {
    fn from_quantity(quantity: Option<Decimal>) -> Self {
        Self {
            quantity,
            units: None,
            seats: None,
            extra_line_items: Vec::new(),
        }
    }

    fn from_units_and_seats(units: Option<Decimal>, seats: i32) -> Self {
        Self {
            quantity: None,
            units,
            seats: Some(seats),
            extra_line_items: Vec::new(),
        }
    }

    fn shape(&self) -> PricingResult<QuantityShape> {
        if let (Some(units), Some(seats)) = (self.units, self.seats) {
            return Ok(QuantityShape::UnitsAndSeats { units, seats });
        }
        if let Some(quantity) = self.quantity {
            return Ok(QuantityShape::Quantity(quantity));
        }

        let mut missing = Vec::new();
        if self.quantity.is_none() {
            missing.push("quantity");
        }
        if self.units.is_none() {
            missing.push("units");
        }
        if self.seats.is_none() {
            missing.push("seats");
        }
        Err(PricingError::MissingQuantityInformation {
            missing: missing.join(", "),
        })
    }
}

/// Computes the ordered line items of one transaction.
///
/// Ordering is fixed: base order item, delivery extras, surcharges in rule
/// declaration order, provider commission, customer commission. Every
/// returned item carries its derived `line_total` and `reversal: false`.
pub fn transaction_line_items(
    listing: &Listing,
    order: &OrderData,
    provider_commission: &CommissionConfig,
    customer_commission: &CommissionConfig,
) -> PricingResult<Vec<LineItem>> {
    let public_data = &listing.public_data;
    let Some(unit_type) = public_data.unit_type else {
        // Without a unit type no quantity can be derived at all
        return Err(PricingError::MissingQuantityInformation {
            missing: "quantity, units, seats".to_string(),
        });
    };

    let unit_price = resolve_unit_price(listing, order, unit_type)?;
    let currency = unit_price.currency.clone();

    let derived = match unit_type {
        UnitType::Item => item_quantity_and_line_items(order, public_data, &currency),
        UnitType::Fixed => fixed_quantity_and_line_items(order),
        UnitType::Hour => hour_quantity_and_line_items(order),
        UnitType::Day | UnitType::Night | UnitType::Week | UnitType::Month => {
            date_range_quantity_and_line_items(order, unit_type)?
        }
        UnitType::Offer | UnitType::Request => {
            QuantityAndExtras::from_quantity(Some(Decimal::ONE))
        }
    };

    let order_item = match derived.shape()? {
        QuantityShape::Quantity(quantity) => {
            LineItem::from_quantity(unit_type.code(), unit_price, quantity, Party::both())
        }
        QuantityShape::UnitsAndSeats { units, seats } => LineItem::from_units_and_seats(
            unit_type.code(),
            unit_price,
            units,
            seats,
            Party::both(),
        ),
    };

    // Surcharge rules only apply to hourly bookings
    let surcharge_line_items = if unit_type == UnitType::Hour {
        get_pricing_rule_line_items(listing, order, &currency)
    } else {
        Vec::new()
    };

    let mut commissionable = vec![order_item.clone()];
    commissionable.extend(surcharge_line_items.iter().cloned());

    let provider_items =
        get_provider_commission_maybe(provider_commission, &commissionable, &currency)?;
    let customer_items =
        get_customer_commission_maybe(customer_commission, &commissionable, &currency)?;

    let mut line_items = vec![order_item];
    line_items.extend(derived.extra_line_items);
    line_items.extend(surcharge_line_items);
    line_items.extend(provider_items);
    line_items.extend(customer_items);

    let valid = construct_valid_line_items(&line_items)?;
    check_minimums_against_payin(&valid, &currency)?;
    Ok(valid)
}

/// Unit price resolution order: selected price variant for bookable listings
/// with variant pricing enabled, then a negotiated offer for negotiation unit
/// types, then the listing's base price.
fn resolve_unit_price(
    listing: &Listing,
    order: &OrderData,
    unit_type: UnitType,
) -> PricingResult<Money> {
    let public_data = &listing.public_data;
    let currency = listing
        .price
        .as_ref()
        .map(|price| price.currency.clone())
        .or_else(|| order.currency.clone());

    if unit_type.is_bookable()
        && public_data.price_variations_enabled == Some(true)
        && let Some(variants) = &public_data.price_variants
        && let Some(name) = order.price_variant_name.as_deref()
        && let Some(variant) = variants.iter().find(|v| v.name.as_deref() == Some(name))
        && let Some(amount) = variant.valid_price_in_subunits()
        && let Some(currency) = currency.clone()
    {
        return Ok(Money::new(amount, currency));
    }

    if unit_type.is_negotiation()
        && let Some(offer) = order.offer_in_subunits
        && let Some(currency) = currency
    {
        return Ok(Money::new(offer, currency));
    }

    listing.price.clone().ok_or(PricingError::MissingUnitPrice)
}

fn item_quantity_and_line_items(
    order: &OrderData,
    public_data: &PublicData,
    currency: &str,
) -> QuantityAndExtras {
    let stock_quantity = order.stock_reservation_quantity.filter(|q| *q != 0);

    // Pickup is free, only shipping adds a delivery line item
    let shipping_fee = if order.delivery_method == Some(DeliveryMethod::Shipping) {
        stock_quantity.and_then(|quantity| {
            calculate_shipping_fee(
                public_data.shipping_price_in_subunits_one_item,
                public_data.shipping_price_in_subunits_additional_items,
                currency,
                quantity,
            )
        })
    } else {
        None
    };

    let mut derived = QuantityAndExtras::from_quantity(stock_quantity.map(Decimal::from));
    if let Some(fee) = shipping_fee {
        derived.extra_line_items.push(LineItem::from_quantity(
            CODE_SHIPPING_FEE,
            fee,
            Decimal::ONE,
            Party::both(),
        ));
    }
    derived
}

fn fixed_quantity_and_line_items(order: &OrderData) -> QuantityAndExtras {
    // With seats the quantity splits into factors, e.g. 1 session x 2 seats
    match order.seats.filter(|s| *s != 0) {
        Some(seats) => QuantityAndExtras::from_units_and_seats(Some(Decimal::ONE), seats),
        None => QuantityAndExtras::from_quantity(Some(Decimal::ONE)),
    }
}

fn hour_quantity_and_line_items(order: &OrderData) -> QuantityAndExtras {
    let units = match (order.booking_start, order.booking_end) {
        (Some(start), Some(end)) => {
            Some(calculate_quantity_from_hours(start, end)).filter(|u| !u.is_zero())
        }
        _ => None,
    };

    match order.seats.filter(|s| *s != 0) {
        Some(seats) => QuantityAndExtras::from_units_and_seats(units, seats),
        None => QuantityAndExtras::from_quantity(units),
    }
}

fn date_range_quantity_and_line_items(
    order: &OrderData,
    unit_type: UnitType,
) -> PricingResult<QuantityAndExtras> {
    let units = match (order.booking_start, order.booking_end) {
        (Some(start), Some(end)) => {
            let days = calculate_quantity_from_dates(start, end, unit_type)?;
            Some(Decimal::from(days)).filter(|u| !u.is_zero())
        }
        _ => None,
    };

    Ok(match order.seats.filter(|s| *s != 0) {
        Some(seats) => QuantityAndExtras::from_units_and_seats(units, seats),
        None => QuantityAndExtras::from_quantity(units),
    })
}

/// A fixed minimum commission must not exceed what the customer pays in
fn check_minimums_against_payin(items: &[LineItem], currency: &str) -> PricingResult<()> {
    let fixed_minimums: Vec<i64> = items
        .iter()
        .filter(|item| {
            (item.code == CODE_PROVIDER_COMMISSION || item.code == CODE_CUSTOMER_COMMISSION)
                && item.quantity.is_some()
        })
        .map(|item| item.unit_price.amount)
        .collect();
    if fixed_minimums.is_empty() {
        return Ok(());
    }

    let payin = calculate_total_for_customer(items, currency)?;
    for minimum in fixed_minimums {
        if minimum > payin.amount {
            return Err(PricingError::MinimumExceedsPayin {
                minimum,
                payin: payin.amount,
            });
        }
    }
    Ok(())
}
