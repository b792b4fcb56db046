//! Integration tests for the admin dashboard and order board.

mod common;

use common::{batch_json, TestApp};
use poultry_ops::{
    models::{OrderKind, StockBatch},
    services::{AdminOrderForm, DeliveryForm, OrderTab, StockFilter, StockForm, StockSummary, StockWrite},
};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn form(code: &str) -> StockForm {
    StockForm {
        batch_code: code.into(),
        hens: "250".into(),
        weight: "480.5".into(),
        breed: "Broiler".into(),
    }
}

async fn existing(app: &TestApp) -> Vec<StockBatch> {
    Mock::given(method("GET"))
        .and(path("/api/hens/getStock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            batch_json(11, "JC001", "Broiler", 500, 320, 700.0),
            batch_json(12, "NK001", "country chicken mix", 200, 150, 210.0),
        ])))
        .mount(&app.server)
        .await;

    app.context.stock().fetch_stock().await.unwrap()
}

#[tokio::test]
async fn test_existing_batch_code_updates_with_put() {
    let app = TestApp::logged_in_as("ADMIN").await;
    let batches = existing(&app).await;

    Mock::given(method("PUT"))
        .and(path("/api/hens/updateStock"))
        .and(query_param("id", "11"))
        .and(query_param("batchCode", "jc001"))
        .and(query_param("hens", "250"))
        .and(query_param("weight", "480.5"))
        .and(query_param("breed", "Broiler"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/hens/addStock"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let write = app
        .context
        .stock()
        .upsert_stock(&form("jc001"), &batches)
        .await
        .unwrap();
    assert_eq!(write, StockWrite::Updated { id: 11 });
}

#[tokio::test]
async fn test_new_batch_code_posts_without_id() {
    let app = TestApp::logged_in_as("ADMIN").await;
    let batches = existing(&app).await;

    Mock::given(method("POST"))
        .and(path("/api/hens/addStock"))
        .and(body_json(json!({
            "hens": 250,
            "weight": 480.5,
            "breed": "Broiler",
            "batchCode": "JC009",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/hens/updateStock"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let write = app
        .context
        .stock()
        .upsert_stock(&form("JC009"), &batches)
        .await
        .unwrap();
    assert_eq!(write, StockWrite::Added);
}

#[tokio::test]
async fn test_dashboard_totals_from_fetched_stock() {
    let app = TestApp::logged_in_as("ADMIN").await;
    let batches = existing(&app).await;
    let summary = StockSummary::from_batches(&batches);

    assert_eq!(summary.display(&StockFilter::All).birds, 470);
    let natu = summary.display(&StockFilter::Breed("Natu Kodi (Country Chicken)".into()));
    assert_eq!(natu.birds, 150);
    assert_eq!(natu.weight, 210.0);
}

#[tokio::test]
async fn test_order_board_and_delivery_assignment() {
    let app = TestApp::logged_in_as("ADMIN").await;

    Mock::given(method("GET"))
        .and(path("/api/orders/admin/allOrders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "orderCode": "ORD-1", "vendorName": "Lakshmi", "phoneNumber": "9848011111",
              "quantity": 900, "weight": 0, "status": "PENDING", "orderDate": "2025-08-01T09:00:00" },
            { "id": 2, "orderCode": "ORD-2", "vendorName": "Ravi", "phoneNumber": "9848022222",
              "quantity": 0, "weight": 120.0, "status": "DELIVERED", "orderDate": "2025-08-02T09:00:00" },
        ])))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/admin/add-delivery/1"))
        .and(body_json(json!({
            "vehicleNumber": "TS32T8889",
            "driverName": "Ramesh",
            "driverPhone": "9000000001",
            "weight": 1996.3,
            "quantity": 900,
            "pricePerKg": 73.0,
            "totalAmount": 145730.0,
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    let service = app.context.orders();
    let board = service.list_orders().await.unwrap();
    assert_eq!(board.orders()[0].id, 2);
    assert_eq!(board.tab(OrderTab::Pending).len(), 1);
    assert_eq!(board.tab(OrderTab::Processed).len(), 1);

    let mut delivery = DeliveryForm::for_order(board.find(1).unwrap());
    delivery.vehicle_number = "TS32T8889".into();
    delivery.driver_name = "Ramesh".into();
    delivery.driver_phone = "9000000001".into();
    delivery.final_weight = "1996.3".into();
    delivery.price_per_kg = "73".into();

    let request = service.assign_delivery(1, &delivery).await.unwrap();
    assert_eq!(request.total_amount, 145_730.0);
}

#[tokio::test]
async fn test_admin_order_sends_only_chosen_amount() {
    let app = TestApp::logged_in_as("ADMIN").await;
    let batches = existing(&app).await;

    Mock::given(method("POST"))
        .and(path("/api/orders/vendor/place-order"))
        .and(body_partial_json(json!({
            "batchId": 12,
            "batchCode": "NK001",
            "breed": "country chicken mix",
            "quantity": 0,
            "weight": 75.5,
            "vendorName": "Srinivas",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut form = AdminOrderForm {
        vendor_name: "Srinivas".into(),
        phone: "9848012345".into(),
        shop_name: "SV Chicken Centre".into(),
        address: "Main Road".into(),
        order_by: OrderKind::Weight,
        order_value: "75.5".into(),
        batch: None,
    };
    form.select_batch(&batches[1]);

    let request = app.context.orders().place_order(&form).await.unwrap();
    assert_eq!(request.delivery_date.len(), "2025-08-06".len());
}
