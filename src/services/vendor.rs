use serde::Serialize;
use tracing::{info, instrument, warn};
use validator::ValidationErrors;

use crate::{
    auth::Claims,
    client::{ApiClient, Service},
    errors::{ClientError, ClientResult},
    models::{Order, OrderKind, OrderRequest, PlaceOrderRequest, StockBatch},
    pricing, validation,
};

/// Shortest phone accepted as an order-history key.
const MIN_PHONE_LEN: usize = 3;

/// Sort orders of the vendor's batch browser.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SortBy {
    #[default]
    Recent,
    SizeDesc,
    AvailableDesc,
}

impl SortBy {
    /// Next sort in the toggle cycle.
    pub fn next(self) -> Self {
        match self {
            SortBy::Recent => SortBy::SizeDesc,
            SortBy::SizeDesc => SortBy::AvailableDesc,
            SortBy::AvailableDesc => SortBy::Recent,
        }
    }
}

/// Batches whose `"{code} {breed} {id}"` contains `search` (ignoring case), in `sort` order.
pub fn filter_batches<'a>(batches: &'a [StockBatch], search: &str, sort: SortBy) -> Vec<&'a StockBatch> {
    let needle = search.trim().to_lowercase();

    let mut list: Vec<&StockBatch> = batches
        .iter()
        .filter(|batch| {
            if needle.is_empty() {
                return true;
            }
            let haystack = format!(
                "{} {} {}",
                batch.batch_code,
                batch.breed.as_deref().unwrap_or(""),
                batch.id
            );
            haystack.to_lowercase().contains(&needle)
        })
        .collect();

    match sort {
        SortBy::Recent => list.sort_by(|a, b| {
            b.date_created
                .as_deref()
                .unwrap_or("")
                .cmp(a.date_created.as_deref().unwrap_or(""))
        }),
        SortBy::SizeDesc => list.sort_by(|a, b| b.total_hens.cmp(&a.total_hens)),
        SortBy::AvailableDesc => list.sort_by(|a, b| b.available_hens.cmp(&a.available_hens)),
    }

    list
}

/// Order a vendor places against one batch.
#[derive(Debug, Clone)]
pub struct VendorOrderForm {
    pub batch_id: i64,
    pub batch_code: String,
    pub breed: Option<String>,
    pub order_by: OrderKind,
    pub quantity: String,
    pub weight: String,
    pub vendor_name: String,
    pub phone_number: String,
    pub shop_name: String,
    pub address: String,
    pub delivery_date: String,
}

impl VendorOrderForm {
    /// Opens the form for `batch`. Sold-out batches cannot be ordered from.
    pub fn for_batch(batch: &StockBatch) -> ClientResult<Self> {
        if batch.is_sold_out() {
            return Err(ClientError::Validation(format!(
                "Batch {} is sold out.",
                batch.batch_code
            )));
        }

        Ok(Self {
            batch_id: batch.id,
            batch_code: batch.batch_code.clone(),
            breed: batch.breed.clone(),
            order_by: OrderKind::Quantity,
            quantity: "50".to_string(),
            weight: String::new(),
            vendor_name: String::new(),
            phone_number: String::new(),
            shop_name: String::new(),
            address: String::new(),
            delivery_date: String::new(),
        })
    }

    pub fn request(&self) -> OrderRequest {
        match self.order_by {
            OrderKind::Quantity => OrderRequest::Quantity(pricing::parse_lenient_i64(&self.quantity)),
            OrderKind::Weight => OrderRequest::Weight(pricing::parse_lenient_f64(&self.weight)),
        }
    }

    pub fn to_request(&self) -> Result<PlaceOrderRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::require(&mut errors, "vendor_name", &self.vendor_name);
        validation::require(&mut errors, "phone_number", &self.phone_number);
        validation::require(&mut errors, "shop_name", &self.shop_name);
        validation::require(&mut errors, "address", &self.address);
        validation::require(&mut errors, "delivery_date", &self.delivery_date);

        let request = self.request();
        let positive = match request {
            OrderRequest::Quantity(q) => q > 0,
            OrderRequest::Weight(w) => w > 0.0,
        };
        if !positive {
            let field = match self.order_by {
                OrderKind::Quantity => "quantity",
                OrderKind::Weight => "weight",
            };
            validation::reject(&mut errors, field, "range", "must be greater than 0");
        }
        validation::finish(errors)?;

        let (quantity, weight) = request.as_wire();
        Ok(PlaceOrderRequest {
            batch_id: self.batch_id,
            batch_code: self.batch_code.clone(),
            breed: self.breed.clone(),
            quantity,
            weight,
            vendor_name: self.vendor_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            shop_name: self.shop_name.trim().to_string(),
            address: self.address.trim().to_string(),
            delivery_date: self.delivery_date.trim().to_string(),
        })
    }
}

/// Phone used to look up a vendor's history: the first usable token claim, else `fallback`.
pub fn resolve_history_phone(claims: Option<&Claims>, fallback: &str) -> String {
    claims
        .and_then(Claims::contact_phone)
        .unwrap_or_else(|| fallback.trim())
        .to_string()
}

/// Vendor side: browsing batches, ordering and order history.
#[derive(Debug, Clone)]
pub struct VendorService {
    client: ApiClient,
}

impl VendorService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn available_batches(&self) -> ClientResult<Vec<StockBatch>> {
        let url = self
            .client
            .url(Service::Api, &["api", "orders", "vendor", "available-batches"])?;
        self.client.get_list(url).await
    }

    #[instrument(skip(self, form), fields(batch_code = %form.batch_code))]
    pub async fn place_order(&self, form: &VendorOrderForm) -> ClientResult<PlaceOrderRequest> {
        let request = form.to_request()?;
        let url = self
            .client
            .url(Service::Api, &["api", "orders", "vendor", "place-order"])?;
        self.client.post_json(url, &request).await?;

        info!(request = %form.request(), "vendor order placed");
        Ok(request)
    }

    /// Order history for `phone`, newest first. Short phones fail before any request.
    #[instrument(skip(self))]
    pub async fn my_orders(&self, phone: &str) -> ClientResult<Vec<Order>> {
        let phone = phone.trim();
        if phone.chars().count() < MIN_PHONE_LEN {
            warn!("history lookup skipped: phone too short");
            return Err(ClientError::Validation("Enter a valid phone number.".into()));
        }

        let url = self
            .client
            .url(Service::Api, &["api", "orders", "vendor", "my-orders", phone])?;
        let mut orders: Vec<Order> = self.client.get_list(url).await?;
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn batch(id: i64, code: &str, breed: &str, total: i64, available: i64, created: &str) -> StockBatch {
        StockBatch {
            id,
            batch_code: code.into(),
            breed: Some(breed.into()),
            total_hens: total,
            available_hens: available,
            weight: 0.0,
            date_created: Some(created.into()),
        }
    }

    fn batches() -> Vec<StockBatch> {
        vec![
            batch(1, "JC001", "Broiler", 500, 20, "2025-08-01T08:00:00"),
            batch(2, "NK010", "Natu Kodi", 100, 90, "2025-08-03T08:00:00"),
            batch(3, "JC002", "Broiler", 300, 300, "2025-08-02T08:00:00"),
        ]
    }

    fn ids(list: &[&StockBatch]) -> Vec<i64> {
        list.iter().map(|b| b.id).collect()
    }

    #[test]
    fn search_matches_code_breed_or_id() {
        let all = batches();
        assert_eq!(ids(&filter_batches(&all, "  jc ", SortBy::Recent)), vec![3, 1]);
        assert_eq!(ids(&filter_batches(&all, "natu", SortBy::Recent)), vec![2]);
        assert_eq!(ids(&filter_batches(&all, "3", SortBy::Recent)), vec![3]);
        assert!(filter_batches(&all, "kadak", SortBy::Recent).is_empty());
    }

    #[test]
    fn sorts_cycle_and_order() {
        let all = batches();
        assert_eq!(ids(&filter_batches(&all, "", SortBy::Recent)), vec![2, 3, 1]);
        assert_eq!(ids(&filter_batches(&all, "", SortBy::SizeDesc)), vec![1, 3, 2]);
        assert_eq!(ids(&filter_batches(&all, "", SortBy::AvailableDesc)), vec![3, 2, 1]);

        assert_eq!(SortBy::Recent.next().next().next(), SortBy::Recent);
        assert_eq!("size-desc".parse::<SortBy>().unwrap(), SortBy::SizeDesc);
    }

    #[test]
    fn sold_out_batches_cannot_be_ordered() {
        let mut sold = batch(4, "X1", "Layer", 10, 0, "2025-08-01");
        assert_matches!(VendorOrderForm::for_batch(&sold), Err(ClientError::Validation(_)));

        sold.available_hens = 5;
        let form = VendorOrderForm::for_batch(&sold).unwrap();
        assert_eq!(form.order_by, OrderKind::Quantity);
        assert_eq!(form.quantity, "50");
    }

    #[test]
    fn form_sends_only_the_chosen_amount() {
        let mut form = VendorOrderForm::for_batch(&batches()[1]).unwrap();
        form.vendor_name = "Lakshmi".into();
        form.phone_number = "9848011111".into();
        form.shop_name = "LK Poultry".into();
        form.address = "Bus Stand Road".into();
        form.delivery_date = "2025-08-10".into();
        form.order_by = OrderKind::Weight;
        form.weight = "75.5".into();

        let request = form.to_request().unwrap();
        assert_eq!((request.quantity, request.weight), (0, 75.5));

        form.weight = "0".into();
        let errors = form.to_request().unwrap_err();
        assert_eq!(validation::describe(&errors), vec!["weight must be greater than 0"]);
    }

    #[test]
    fn history_phone_prefers_claims() {
        let claims = Claims {
            username: Some("ab".into()),
            sub: Some("9848012345".into()),
            ..Default::default()
        };
        assert_eq!(resolve_history_phone(Some(&claims), "111"), "9848012345");
        assert_eq!(resolve_history_phone(None, " 9000 "), "9000");
        assert_eq!(resolve_history_phone(Some(&Claims::default()), "77"), "77");
    }
}
