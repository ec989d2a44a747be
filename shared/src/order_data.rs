//! Order parameters supplied by the checkout flow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a purchased item reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Shipping,
    Pickup,
}

/// Raw order input for one pricing computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_end: Option<DateTime<Utc>>,
    /// Requested stock count for item-type listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_reservation_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<DeliveryMethod>,
    /// Selected price variant, matched against the listing's variants by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_variant_name: Option<String>,
    /// Pre-negotiated unit price for offer/request listings, in minor units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_in_subunits: Option<i64>,
    /// Currency hint for listings without a price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_booking_order() {
        let json = r#"{
            "bookingStart": "2025-06-15T16:00:00Z",
            "bookingEnd": "2025-06-15T19:00:00Z",
            "seats": 2,
            "deliveryMethod": "shipping"
        }"#;
        let order: OrderData = serde_json::from_str(json).unwrap();
        assert!(order.booking_start.is_some());
        assert_eq!(order.seats, Some(2));
        assert_eq!(order.delivery_method, Some(DeliveryMethod::Shipping));
        assert_eq!(order.stock_reservation_quantity, None);
    }

    #[test]
    fn test_default_is_empty() {
        let order = OrderData::default();
        assert!(order.booking_start.is_none());
        assert!(order.currency.is_none());
    }
}
