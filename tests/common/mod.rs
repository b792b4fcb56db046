#![allow(dead_code)]

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use poultry_ops::{
    config::ClientConfig,
    session::{MemorySessionStore, Session, SessionStore},
    AppContext,
};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_SECRET: &str = "farm-test-secret";

/// A mock farm backend plus a client context pointed at it.
pub struct TestApp {
    pub server: MockServer,
    pub context: AppContext,
    pub store: Arc<MemorySessionStore>,
}

impl TestApp {
    /// Fresh backend with no stored session.
    pub async fn new() -> Self {
        Self::with_store(MemorySessionStore::new()).await
    }

    /// Backend plus a session already holding a token for `role`.
    pub async fn logged_in_as(role: &str) -> Self {
        let token = token_for(role, "9848012345");
        Self::with_store(MemorySessionStore::with_session(Session::new("tester", token))).await
    }

    async fn with_store(store: MemorySessionStore) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(store);

        let mut config = ClientConfig::for_base_url(server.uri());
        config.request_timeout_secs = 5;

        let context = AppContext::with_session_store(config, store.clone())
            .expect("client context for mock server");

        Self {
            server,
            context,
            store,
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.store.token().await.expect("memory store never fails")
    }
}

/// Token signed with [`TEST_SECRET`] carrying one role and a phone claim.
pub fn token_for(role: &str, phone: &str) -> String {
    sign(json!({
        "sub": "tester",
        "roles": [role],
        "phone": phone,
        "iat": chrono::Utc::now().timestamp(),
        "exp": chrono::Utc::now().timestamp() + 3600,
    }))
}

pub fn sign(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token encodes")
}

pub fn batch_json(id: i64, code: &str, breed: &str, total: i64, available: i64, weight: f64) -> Value {
    json!({
        "id": id,
        "batchCode": code,
        "breed": breed,
        "totalHens": total,
        "availableHens": available,
        "weight": weight,
        "dateCreated": "2025-08-01T08:00:00",
    })
}
