//! Poultry Ops client library
//!
//! Client for the farm stock and orders backend: session handling, role dispatch
//! between the admin and vendor views, and the presentation logic behind each screen.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod breeds;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod pricing;
pub mod services;
pub mod session;
pub mod validation;

use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::errors::ClientResult;
use crate::services::{AuthService, OrderService, ReportStore, StockService, VendorService};
use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};

/// Everything a front end needs, built once at start-up and passed by reference.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub config: ClientConfig,
    pub client: ApiClient,
}

impl AppContext {
    /// Uses a file-backed session when a session location can be resolved,
    /// an in-memory one otherwise.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let store: Arc<dyn SessionStore> = match config.session_file() {
            Some(path) => {
                debug!(path = %path.display(), "using file session store");
                Arc::new(FileSessionStore::new(path))
            }
            None => Arc::new(MemorySessionStore::new()),
        };
        Self::with_session_store(config, store)
    }

    pub fn with_session_store(config: ClientConfig, store: Arc<dyn SessionStore>) -> ClientResult<Self> {
        let client = ApiClient::new(&config, store)?;
        Ok(Self { config, client })
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        self.client.session()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.client.clone(), self.config.jwt_secret.clone())
    }

    pub fn stock(&self) -> StockService {
        StockService::new(self.client.clone())
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.client.clone())
    }

    pub fn vendor(&self) -> VendorService {
        VendorService::new(self.client.clone())
    }

    pub fn reports(&self) -> ReportStore {
        let path = self
            .config
            .reports_file()
            .unwrap_or_else(|| PathBuf::from("reports.json"));
        ReportStore::new(path)
    }
}

// Re-export commonly used items
pub use auth::{Claims, Role, Screen, ViewSet};
pub use errors::{ClientError, ErrorAction};
