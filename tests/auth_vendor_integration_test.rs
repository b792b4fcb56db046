//! Integration tests for login, role dispatch and the vendor flows.

mod common;

use assert_matches::assert_matches;
use common::{batch_json, sign, token_for, TestApp};
use poultry_ops::{
    models::{LoginCredentials, OrderKind, VendorSignup},
    services::{filter_batches, resolve_history_phone, SortBy, VendorOrderForm},
    ClientError, Screen, ViewSet,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn credentials(username: &str, password: &str) -> LoginCredentials {
    LoginCredentials {
        username: username.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn test_login_dispatches_by_role() {
    for (role, expected, landing) in [
        ("ADMIN", ViewSet::Admin, Screen::Dashboard),
        ("ROLE_VENDOR", ViewSet::Vendor, Screen::Orders),
    ] {
        let app = TestApp::new().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "username": "farmer", "password": "secret" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": token_for(role, "9848012345") })),
            )
            .expect(1)
            .mount(&app.server)
            .await;

        let outcome = app.context.auth().login(credentials("farmer", "secret")).await.unwrap();
        assert_eq!(outcome.view_set, expected);
        assert_eq!(outcome.view_set.landing(), landing);
        assert!(app.token().await.is_some());
        assert_eq!(app.context.auth().view_set().await, expected);
    }
}

#[tokio::test]
async fn test_unknown_role_is_unauthenticated() {
    let app = TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": sign(json!({ "sub": "x", "roles": ["SUPERVISOR"] })),
        })))
        .mount(&app.server)
        .await;

    let outcome = app.context.auth().login(credentials("x", "y")).await.unwrap();
    assert_eq!(outcome.view_set, ViewSet::Unauthenticated);
    assert!(outcome.view_set.views().contains(&Screen::Login));
}

#[tokio::test]
async fn test_rejected_login_is_invalid_credentials() {
    let app = TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.server)
        .await;

    let err = app.context.auth().login(credentials("farmer", "wrong")).await.unwrap_err();
    assert_matches!(err, ClientError::InvalidCredentials);
    assert!(app.token().await.is_none());
}

#[tokio::test]
async fn test_rejected_login_keeps_existing_session() {
    let app = TestApp::logged_in_as("ADMIN").await;
    let before = app.token().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&app.server)
        .await;

    let err = app.context.auth().login(credentials("farmer", "wrong")).await.unwrap_err();
    assert_matches!(err, ClientError::InvalidCredentials);

    let requests = app.server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(before.is_some());
    assert_eq!(app.token().await, before);
    assert_eq!(app.context.auth().view_set().await, ViewSet::Admin);
}

#[tokio::test]
async fn test_blank_login_makes_no_request() {
    let app = TestApp::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let err = app.context.auth().login(credentials("  ", "")).await.unwrap_err();
    assert_matches!(err, ClientError::InvalidForm(_));
}

#[tokio::test]
async fn test_vendor_signup_and_logout() {
    let app = TestApp::logged_in_as("VENDOR").await;
    Mock::given(method("POST"))
        .and(path("/api/auth/vendor/signup"))
        .and(body_partial_json(json!({ "username": "lakshmi", "phone": "9848011111" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("created"))
        .expect(1)
        .mount(&app.server)
        .await;

    let auth = app.context.auth();
    auth.signup(VendorSignup {
        username: "lakshmi".into(),
        email: "lakshmi@example.com".into(),
        password: "pass1234".into(),
        phone: "9848011111".into(),
    })
    .await
    .unwrap();

    auth.logout().await.unwrap();
    assert!(app.token().await.is_none());
    assert_eq!(auth.view_set().await, ViewSet::Unauthenticated);
}

#[tokio::test]
async fn test_short_phone_skips_history_request() {
    let app = TestApp::logged_in_as("VENDOR").await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&app.server)
        .await;

    let err = app.context.vendor().my_orders(" 12 ").await.unwrap_err();
    assert_matches!(err, ClientError::Validation(ref message) if message == "Enter a valid phone number.");
}

#[tokio::test]
async fn test_history_is_newest_first_and_encodes_phone() {
    let app = TestApp::logged_in_as("VENDOR").await;
    Mock::given(method("GET"))
        .and(path("/api/orders/vendor/my-orders/98480%2012345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "status": "DELIVERED", "quantity": 50, "orderDate": "2025-08-01T10:00:00" },
            { "id": 2, "status": "PENDING", "weight": 40.0, "orderDate": "2025-08-03T10:00:00" },
            { "id": 3, "status": "DISPATCHED", "quantity": 20, "orderDate": "2025-08-02T10:00:00" },
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    let orders = app.context.vendor().my_orders("98480 12345").await.unwrap();
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[tokio::test]
async fn test_history_phone_comes_from_token() {
    let app = TestApp::logged_in_as("VENDOR").await;
    let claims = app.context.auth().current_claims().await.unwrap();
    assert_eq!(resolve_history_phone(claims.as_ref(), ""), "9848012345");
}

#[tokio::test]
async fn test_vendor_browses_and_orders() {
    let app = TestApp::logged_in_as("VENDOR").await;
    Mock::given(method("GET"))
        .and(path("/api/orders/vendor/available-batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            batch_json(1, "JC001", "Broiler", 500, 0, 900.0),
            batch_json(2, "KD004", "Kadaknath", 80, 60, 90.0),
        ])))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/vendor/place-order"))
        .and(body_partial_json(json!({
            "batchId": 2,
            "batchCode": "KD004",
            "quantity": 50,
            "weight": 0.0,
            "deliveryDate": "2025-08-10",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    let service = app.context.vendor();
    let batches = service.available_batches().await.unwrap();
    let shown = filter_batches(&batches, "kadak", SortBy::AvailableDesc);
    assert_eq!(shown.len(), 1);

    assert_matches!(VendorOrderForm::for_batch(&batches[0]), Err(ClientError::Validation(_)));

    let mut form = VendorOrderForm::for_batch(shown[0]).unwrap();
    assert_eq!(form.order_by, OrderKind::Quantity);
    form.vendor_name = "Lakshmi".into();
    form.phone_number = "9848011111".into();
    form.shop_name = "LK Poultry".into();
    form.address = "Bus Stand Road".into();
    form.delivery_date = "2025-08-10".into();

    let request = service.place_order(&form).await.unwrap();
    assert_eq!(request.quantity, 50);
}
