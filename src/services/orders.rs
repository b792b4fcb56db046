use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, instrument, warn};
use validator::ValidationErrors;

use crate::{
    client::{ApiClient, Service},
    errors::{ClientError, ClientResult},
    models::{
        DeliveryRequest, Order, OrderKind, OrderRequest, OrderStatus, PlaceOrderRequest, StockBatch,
    },
    pricing, validation,
};

/// Tabs of the admin order board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderTab {
    #[default]
    Pending,
    Processed,
}

/// Orders as shown on the admin board, newest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderBoard {
    orders: Vec<Order>,
}

impl OrderBoard {
    /// Builds the board from the server listing, which arrives oldest first.
    pub fn from_listing(mut orders: Vec<Order>) -> Self {
        orders.reverse();
        Self { orders }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn tab(&self, tab: OrderTab) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| match tab {
                OrderTab::Pending => order.status.is_pending(),
                OrderTab::Processed => !order.status.is_pending(),
            })
            .collect()
    }

    pub fn find(&self, id: i64) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Marks a pending order rejected. This only changes the local board.
    pub fn reject(&mut self, id: i64) -> ClientResult<&Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("order {}", id)))?;

        if !order.status.is_pending() {
            return Err(ClientError::Validation(format!(
                "Order {} is {} and cannot be rejected.",
                id, order.status
            )));
        }

        order.status = OrderStatus::Rejected;
        warn!(order_id = id, "order rejected locally; no backend endpoint exists");
        Ok(order)
    }
}

/// Batch fields copied into an order when the admin picks a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedBatch {
    pub id: i64,
    pub code: String,
    pub breed: String,
}

impl From<&StockBatch> for SelectedBatch {
    fn from(batch: &StockBatch) -> Self {
        Self {
            id: batch.id,
            code: batch.batch_code.clone(),
            breed: batch.breed_label().to_string(),
        }
    }
}

/// Order placed by the admin on a vendor's behalf.
#[derive(Debug, Clone, Default)]
pub struct AdminOrderForm {
    pub vendor_name: String,
    pub phone: String,
    pub shop_name: String,
    pub address: String,
    pub order_by: OrderKind,
    pub order_value: String,
    pub batch: Option<SelectedBatch>,
}

impl AdminOrderForm {
    pub fn select_batch(&mut self, batch: &StockBatch) {
        self.batch = Some(SelectedBatch::from(batch));
    }

    pub fn request(&self) -> OrderRequest {
        match self.order_by {
            OrderKind::Quantity => OrderRequest::Quantity(pricing::parse_lenient_i64(&self.order_value)),
            OrderKind::Weight => OrderRequest::Weight(pricing::parse_lenient_f64(&self.order_value)),
        }
    }

    /// Validates the form and builds the request body, delivering on `today`.
    pub fn to_request(&self, today: NaiveDate) -> Result<PlaceOrderRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::require(&mut errors, "vendor_name", &self.vendor_name);
        validation::require(&mut errors, "phone", &self.phone);
        validation::require(&mut errors, "order_value", &self.order_value);
        validation::require(&mut errors, "address", &self.address);
        validation::require(&mut errors, "shop_name", &self.shop_name);

        match &self.batch {
            None => validation::reject(&mut errors, "batch_code", "required", "is required"),
            Some(batch) => validation::require(&mut errors, "batch_code", &batch.code),
        }
        validation::finish(errors)?;

        let batch = self.batch.clone().unwrap_or_default();
        let (quantity, weight) = self.request().as_wire();

        Ok(PlaceOrderRequest {
            batch_id: batch.id,
            batch_code: batch.code,
            breed: Some(batch.breed),
            quantity,
            weight,
            vendor_name: self.vendor_name.trim().to_string(),
            phone_number: self.phone.trim().to_string(),
            shop_name: self.shop_name.trim().to_string(),
            address: self.address.trim().to_string(),
            delivery_date: today.format("%Y-%m-%d").to_string(),
        })
    }
}

/// Dispatch details entered when assigning a vehicle to an order.
#[derive(Debug, Clone, Default)]
pub struct DeliveryForm {
    pub vehicle_number: String,
    pub driver_name: String,
    pub driver_phone: String,
    pub final_weight: String,
    pub final_quantity: String,
    pub price_per_kg: String,
}

impl DeliveryForm {
    /// Pre-fills the final quantity when the order was placed by head count.
    pub fn for_order(order: &Order) -> Self {
        let final_quantity = match order.request() {
            OrderRequest::Quantity(q) => q.to_string(),
            OrderRequest::Weight(_) => String::new(),
        };

        Self {
            final_quantity,
            ..Self::default()
        }
    }

    /// `round(final weight × price per kg)`.
    pub fn total_amount(&self) -> i64 {
        pricing::bill_total(&self.final_weight, &self.price_per_kg)
    }

    pub fn to_request(&self) -> Result<DeliveryRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::require(&mut errors, "vehicle_number", &self.vehicle_number);
        validation::require(&mut errors, "driver_name", &self.driver_name);
        validation::require(&mut errors, "driver_phone", &self.driver_phone);
        validation::require(&mut errors, "final_weight", &self.final_weight);
        validation::require(&mut errors, "price_per_kg", &self.price_per_kg);
        validation::finish(errors)?;

        Ok(DeliveryRequest {
            vehicle_number: self.vehicle_number.trim().to_string(),
            driver_name: self.driver_name.trim().to_string(),
            driver_phone: self.driver_phone.trim().to_string(),
            weight: pricing::parse_lenient_f64(&self.final_weight),
            quantity: pricing::parse_lenient_i64(&self.final_quantity),
            price_per_kg: pricing::parse_lenient_f64(&self.price_per_kg),
            total_amount: self.total_amount() as f64,
        })
    }
}

/// Admin side of order handling.
#[derive(Debug, Clone)]
pub struct OrderService {
    client: ApiClient,
}

impl OrderService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> ClientResult<OrderBoard> {
        let url = self
            .client
            .url(Service::Api, &["api", "orders", "admin", "allOrders"])?;
        let orders: Vec<Order> = self.client.get_list(url).await?;
        Ok(OrderBoard::from_listing(orders))
    }

    #[instrument(skip(self, form), fields(vendor = %form.vendor_name))]
    pub async fn place_order(&self, form: &AdminOrderForm) -> ClientResult<PlaceOrderRequest> {
        let request = form.to_request(Local::now().date_naive())?;
        let url = self
            .client
            .url(Service::Api, &["api", "orders", "vendor", "place-order"])?;
        self.client.post_json(url, &request).await?;

        info!(batch_code = %request.batch_code, "order placed for vendor");
        Ok(request)
    }

    #[instrument(skip(self, form))]
    pub async fn assign_delivery(&self, order_id: i64, form: &DeliveryForm) -> ClientResult<DeliveryRequest> {
        let request = form.to_request()?;
        let id = order_id.to_string();
        let url = self
            .client
            .url(Service::Api, &["api", "orders", "admin", "add-delivery", &id])?;
        self.client.post_json(url, &request).await?;

        info!(total_amount = request.total_amount, "vehicle assigned");
        Ok(request)
    }
}
