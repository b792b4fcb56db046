// Session and identity
pub mod auth;

// Admin dashboard and order board
pub mod orders;
pub mod stock;

// Vendor flows
pub mod reports;
pub mod vendor;

// Client-local bookkeeping
pub mod ledger;

pub use auth::{AuthService, LoginOutcome};
pub use ledger::{Ledger, LedgerSummary, TransactionDraft};
pub use orders::{AdminOrderForm, DeliveryForm, OrderBoard, OrderService, OrderTab};
pub use reports::{ReportDraft, ReportStore};
pub use stock::{StockFilter, StockForm, StockService, StockSummary, StockWrite};
pub use vendor::{filter_batches, resolve_history_phone, SortBy, VendorOrderForm, VendorService};
