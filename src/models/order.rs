use serde::{Deserialize, Serialize};

use super::{non_blank, null_as_default};

/// Enum representing the possible statuses of an order.
///
/// Transitions happen server-side; the client only mirrors them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
    Dispatched,
    Delivered,
    #[serde(other)]
    Unknown,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Unknown
    }
}

impl OrderStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

/// What an order asks for: a head count or a weight, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum OrderRequest {
    Quantity(i64),
    Weight(f64),
}

impl OrderRequest {
    pub fn kind(&self) -> OrderKind {
        match self {
            OrderRequest::Quantity(_) => OrderKind::Quantity,
            OrderRequest::Weight(_) => OrderKind::Weight,
        }
    }

    /// Wire pair `(quantity, weight)` with the unused side zeroed.
    pub fn as_wire(&self) -> (i64, f64) {
        match *self {
            OrderRequest::Quantity(q) => (q, 0.0),
            OrderRequest::Weight(w) => (0, w),
        }
    }
}

impl std::fmt::Display for OrderRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderRequest::Quantity(q) => write!(f, "{} birds", q),
            OrderRequest::Weight(w) => write!(f, "{} kg", w),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderKind {
    #[default]
    Quantity,
    Weight,
}

/// Dispatch record attached once an order has been accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    pub vehicle_no: String,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub final_weight: Option<f64>,
    pub final_quantity: Option<i64>,
    pub price_per_kg: Option<f64>,
    pub total_amount: Option<f64>,
}

/// An order as returned by the admin and vendor listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vendor_name: String,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub batch_id: Option<i64>,
    #[serde(default)]
    pub batch_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_date: String,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub driver_phone: Option<String>,
    #[serde(default)]
    pub received_weight: Option<f64>,
    #[serde(default)]
    pub received_quantity: Option<i64>,
    #[serde(default)]
    pub price_per_kg: Option<f64>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub actual_delivery_time: Option<String>,
}

impl Order {
    pub fn request(&self) -> OrderRequest {
        if self.quantity > 0 {
            OrderRequest::Quantity(self.quantity)
        } else {
            OrderRequest::Weight(self.weight)
        }
    }

    pub fn breed_or_default(&self) -> &str {
        non_blank(&self.breed).unwrap_or("Broiler")
    }

    pub fn shop_name_or_blank(&self) -> &str {
        self.shop_name.as_deref().unwrap_or("")
    }

    /// Date shown in listings: delivery date, else the date part of the order timestamp.
    pub fn display_date(&self) -> &str {
        self.delivery_date
            .as_deref()
            .unwrap_or_else(|| self.order_date.split('T').next().unwrap_or(""))
    }

    /// Dispatch details, present once a vehicle has been assigned.
    ///
    /// Received figures win over the requested ones; zero counts as absent.
    pub fn fulfillment(&self) -> Option<Fulfillment> {
        let vehicle_no = non_blank(&self.vehicle_number)?.to_string();
        let positive_f = |v: Option<f64>| v.filter(|v| *v != 0.0);
        let positive_i = |v: Option<i64>| v.filter(|v| *v != 0);

        Some(Fulfillment {
            vehicle_no,
            driver_name: self.driver_name.clone(),
            driver_phone: self.driver_phone.clone(),
            final_weight: positive_f(self.received_weight).or(positive_f(Some(self.weight))),
            final_quantity: positive_i(self.received_quantity).or(positive_i(Some(self.quantity))),
            price_per_kg: positive_f(self.price_per_kg),
            total_amount: positive_f(self.total_price),
        })
    }

    pub fn has_billing(&self) -> bool {
        self.received_quantity.is_some()
            || self.received_weight.is_some()
            || self.price_per_kg.is_some()
            || self.total_price.is_some()
    }
}

/// Body of `POST /api/orders/vendor/place-order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub batch_id: i64,
    pub batch_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    pub quantity: i64,
    pub weight: f64,
    pub vendor_name: String,
    pub phone_number: String,
    pub shop_name: String,
    pub address: String,
    pub delivery_date: String,
}

/// Body of `POST /api/orders/admin/add-delivery/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    pub vehicle_number: String,
    pub driver_name: String,
    pub driver_phone: String,
    pub weight: f64,
    pub quantity: i64,
    pub price_per_kg: f64,
    pub total_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(json: &str) -> Order {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn quantity_wins_when_positive() {
        let o = order(r#"{"id":1,"quantity":40,"weight":0,"status":"PENDING"}"#);
        assert_eq!(o.request(), OrderRequest::Quantity(40));

        let o = order(r#"{"id":2,"quantity":0,"weight":85.5,"status":"PENDING"}"#);
        assert_eq!(o.request(), OrderRequest::Weight(85.5));
        assert_eq!(o.request().as_wire(), (0, 85.5));
    }

    #[test]
    fn unknown_status_does_not_fail_decoding() {
        let o = order(r#"{"id":3,"status":"ON_HOLD"}"#);
        assert_eq!(o.status, OrderStatus::Unknown);
        let o = order(r#"{"id":4,"status":null}"#);
        assert_eq!(o.status, OrderStatus::Unknown);
        assert_eq!(o.breed_or_default(), "Broiler");
    }

    #[test]
    fn fulfillment_prefers_received_figures() {
        let o = order(
            r#"{"id":5,"status":"DISPATCHED","quantity":100,"weight":0,
                "vehicleNumber":"TS32T8889","driverName":"Ravi","receivedWeight":210.4,
                "pricePerKg":73.0,"totalPrice":15359.0}"#,
        );
        let f = o.fulfillment().unwrap();
        assert_eq!(f.vehicle_no, "TS32T8889");
        assert_eq!(f.final_weight, Some(210.4));
        assert_eq!(f.final_quantity, Some(100));
        assert_eq!(f.total_amount, Some(15359.0));
        assert!(o.has_billing());
    }

    #[test]
    fn no_vehicle_means_no_fulfillment() {
        let o = order(r#"{"id":6,"status":"PENDING","vehicleNumber":"  "}"#);
        assert!(o.fulfillment().is_none());
        assert!(!o.has_billing());
    }

    #[test]
    fn display_date_falls_back_to_order_date() {
        let o = order(r#"{"id":7,"orderDate":"2025-08-01T10:20:00"}"#);
        assert_eq!(o.display_date(), "2025-08-01");
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("dispatched".parse::<OrderStatus>().unwrap(), OrderStatus::Dispatched);
        assert_eq!(OrderStatus::Delivered.to_string(), "DELIVERED");
    }
}
