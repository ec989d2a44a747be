//! Pricing rule evaluation
//!
//! Rules come from listing configuration and run through a handler registry
//! keyed by rule type. Handlers are infallible; a rule that does not apply to
//! the booking simply produces no line item. Legacy listings configured a
//! single evening surcharge through two flat fields, which migrate here into
//! one equivalent time-of-day rule.

use std::collections::HashSet;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::{LineItem, Listing, Money, OrderData, Party, PricingRule, PublicData, RuleType};

use crate::quantity::{
    calculate_overlapping_hours, default_timezone, DEFAULT_BUSINESS_HOURS_END,
    DEFAULT_SURCHARGE_FROM_HOUR, DEFAULT_SURCHARGE_TO_HOUR, DEFAULT_TIMEZONE,
};
use crate::slug::slugify_label;

/// Handler contract: evaluate one rule against the order, or yield nothing
pub type RuleHandler = fn(&PricingRule, &OrderData, Tz, &str) -> Option<LineItem>;

/// Registry lookup for a rule type
pub fn handler_for(rule_type: RuleType) -> Option<RuleHandler> {
    match rule_type {
        RuleType::TimeOfDay => Some(time_of_day_line_item),
        RuleType::Unknown => None,
    }
}

/// Surcharge line items for the configured rules, deduplicated by code.
/// Returns an empty list when no rule applies.
pub fn get_pricing_rule_line_items(
    listing: &Listing,
    order: &OrderData,
    currency: &str,
) -> Vec<LineItem> {
    let timezone = listing_timezone(listing);
    let rules = effective_pricing_rules(&listing.public_data);

    let items = rules
        .iter()
        .filter_map(|rule| match handler_for(rule.rule_type) {
            Some(handler) => handler(rule, order, timezone, currency),
            None => {
                tracing::debug!(rule_type = ?rule.rule_type, "no handler for pricing rule type, skipping");
                None
            }
        })
        .collect();

    deduplicate_line_item_codes(items)
}

/// Timezone for rule evaluation, with a fixed fallback for unconfigured or
/// unrecognized names
pub fn listing_timezone(listing: &Listing) -> Tz {
    let Some(name) = listing.timezone_name() else {
        return default_timezone();
    };
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(
                timezone = name,
                "unrecognized listing timezone, falling back to {DEFAULT_TIMEZONE}"
            );
            default_timezone()
        }
    }
}

/// Configured rules, or the legacy evening surcharge migrated into one rule.
/// An explicit non-empty `pricingRules` array always wins over legacy fields.
fn effective_pricing_rules(public_data: &PublicData) -> Vec<PricingRule> {
    if let Some(rules) = &public_data.pricing_rules
        && !rules.is_empty()
    {
        return rules.clone();
    }

    match public_data.evening_surcharge_per_hour_subunits {
        Some(surcharge) if surcharge > 0 => {
            tracing::debug!(
                surcharge_per_hour_subunits = surcharge,
                "migrating legacy evening surcharge fields to a time-of-day rule"
            );
            vec![PricingRule {
                id: None,
                rule_type: RuleType::TimeOfDay,
                label: "evening-surcharge".to_string(),
                surcharge_per_hour_subunits: Some(surcharge),
                from_hour: Some(
                    public_data
                        .business_hours_end
                        .map(Decimal::from)
                        .unwrap_or(DEFAULT_BUSINESS_HOURS_END),
                ),
                to_hour: Some(DEFAULT_SURCHARGE_TO_HOUR),
            }]
        }
        _ => vec![],
    }
}

fn time_of_day_line_item(
    rule: &PricingRule,
    order: &OrderData,
    timezone: Tz,
    currency: &str,
) -> Option<LineItem> {
    let surcharge = rule.surcharge_per_hour_subunits.filter(|s| *s > 0)?;
    let start = order.booking_start?;
    let end = order.booking_end?;

    let from_hour = rule.from_hour.unwrap_or(DEFAULT_SURCHARGE_FROM_HOUR);
    let to_hour = rule.to_hour.unwrap_or(DEFAULT_SURCHARGE_TO_HOUR);
    let hours = calculate_overlapping_hours(start, end, timezone, from_hour, to_hour);
    if hours <= Decimal::ZERO {
        return None;
    }

    let code = format!("line-item/{}", slugify_label(&rule.label));
    Some(LineItem::from_quantity(
        code,
        Money::new(surcharge, currency),
        hours,
        Party::both(),
    ))
}

/// First occurrence keeps the bare code; later collisions get `-2`, `-3`, …
fn deduplicate_line_item_codes(items: Vec<LineItem>) -> Vec<LineItem> {
    let mut seen: HashSet<String> = HashSet::new();
    items
        .into_iter()
        .map(|mut item| {
            if seen.contains(&item.code) {
                let mut counter = 2;
                let mut candidate = format!("{}-{counter}", item.code);
                while seen.contains(&candidate) {
                    counter += 1;
                    candidate = format!("{}-{counter}", item.code);
                }
                item.code = candidate;
            }
            seen.insert(item.code.clone());
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn evening_booking() -> OrderData {
        // 18:00-21:00 in Europe/Zurich
        OrderData {
            booking_start: Some(utc("2025-06-15T16:00:00Z")),
            booking_end: Some(utc("2025-06-15T19:00:00Z")),
            ..Default::default()
        }
    }

    fn rule(label: &str, surcharge: i64) -> PricingRule {
        PricingRule {
            id: None,
            rule_type: RuleType::TimeOfDay,
            label: label.to_string(),
            surcharge_per_hour_subunits: Some(surcharge),
            from_hour: Some(Decimal::from(17)),
            to_hour: Some(Decimal::from(24)),
        }
    }

    fn listing_with_rules(rules: Vec<PricingRule>) -> Listing {
        let mut listing = Listing::default();
        listing.public_data.pricing_rules = Some(rules);
        listing
    }

    #[test]
    fn test_time_of_day_rule_emits_surcharge() {
        let listing = listing_with_rules(vec![rule("Evening surcharge", 10000)]);
        let items = get_pricing_rule_line_items(&listing, &evening_booking(), "CHF");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "line-item/evening-surcharge");
        assert_eq!(items[0].unit_price, Money::new(10000, "CHF"));
        assert_eq!(items[0].quantity, Some(Decimal::from(3)));
        assert_eq!(items[0].include_for, Party::both());
    }

    #[test]
    fn test_inactive_rule_skipped() {
        let listing = listing_with_rules(vec![rule("Evening surcharge", 0)]);
        assert!(get_pricing_rule_line_items(&listing, &evening_booking(), "CHF").is_empty());
    }

    #[test]
    fn test_rule_without_overlap_skipped() {
        // 08:00-10:00 local, entirely before the window
        let order = OrderData {
            booking_start: Some(utc("2025-06-15T06:00:00Z")),
            booking_end: Some(utc("2025-06-15T08:00:00Z")),
            ..Default::default()
        };
        let listing = listing_with_rules(vec![rule("Evening surcharge", 10000)]);
        assert!(get_pricing_rule_line_items(&listing, &order, "CHF").is_empty());
    }

    #[test]
    fn test_missing_booking_dates_skipped() {
        let listing = listing_with_rules(vec![rule("Evening surcharge", 10000)]);
        assert!(get_pricing_rule_line_items(&listing, &OrderData::default(), "CHF").is_empty());
    }

    #[test]
    fn test_unknown_rule_type_skipped() {
        let mut unknown = rule("Weekend", 10000);
        unknown.rule_type = RuleType::Unknown;
        let listing = listing_with_rules(vec![unknown, rule("Evening surcharge", 10000)]);
        let items = get_pricing_rule_line_items(&listing, &evening_booking(), "CHF");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "line-item/evening-surcharge");
    }

    #[test]
    fn test_duplicate_labels_get_suffixes() {
        let listing = listing_with_rules(vec![
            rule("Aufschlag", 10000),
            rule("Aufschlag", 5000),
            rule("Aufschlag", 2000),
        ]);
        let items = get_pricing_rule_line_items(&listing, &evening_booking(), "CHF");
        let codes: Vec<&str> = items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                "line-item/aufschlag",
                "line-item/aufschlag-2",
                "line-item/aufschlag-3"
            ]
        );
    }

    #[test]
    fn test_legacy_evening_surcharge_migration() {
        let mut listing = Listing::default();
        listing.public_data.evening_surcharge_per_hour_subunits = Some(10000);
        listing.public_data.business_hours_end = Some(18);

        let items = get_pricing_rule_line_items(&listing, &evening_booking(), "CHF");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "line-item/evening-surcharge");
        // booking is 18:00-21:00 local against window [18,24)
        assert_eq!(items[0].quantity, Some(Decimal::from(3)));
    }

    #[test]
    fn test_explicit_rules_win_over_legacy_fields() {
        let mut listing = listing_with_rules(vec![rule("Night owl", 5000)]);
        listing.public_data.evening_surcharge_per_hour_subunits = Some(10000);

        let items = get_pricing_rule_line_items(&listing, &evening_booking(), "CHF");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "line-item/night-owl");
        assert_eq!(items[0].unit_price, Money::new(5000, "CHF"));
    }

    #[test]
    fn test_unrecognized_timezone_falls_back() {
        let mut listing = listing_with_rules(vec![rule("Evening surcharge", 10000)]);
        listing.public_data.listing_timezone = Some("Mars/Olympus_Mons".to_string());
        let items = get_pricing_rule_line_items(&listing, &evening_booking(), "CHF");
        assert_eq!(items[0].quantity, Some(Decimal::from(3)));
    }

    #[test]
    fn test_listing_timezone_resolution() {
        let mut listing = Listing::default();
        assert_eq!(listing_timezone(&listing), chrono_tz::Europe::Zurich);

        listing.public_data.listing_timezone = Some("America/New_York".to_string());
        assert_eq!(listing_timezone(&listing), chrono_tz::America::New_York);
    }
}
