use serde::{Deserialize, Serialize};

use super::{non_blank, null_as_default};

/// A tracked group of birds of one breed sharing a batch code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockBatch {
    pub id: i64,
    /// Vendor-facing label, unique per batch.
    #[serde(default, deserialize_with = "null_as_default")]
    pub batch_code: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_hens: i64,
    /// Expected to be at most `total_hens`; not enforced.
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_hens: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
    #[serde(default)]
    pub date_created: Option<String>,
}

impl StockBatch {
    pub fn breed_label(&self) -> &str {
        non_blank(&self.breed).unwrap_or("Unknown")
    }

    pub fn is_sold_out(&self) -> bool {
        self.available_hens <= 0
    }

    /// Share of the batch still available, clamped to `[0, 1]`.
    pub fn remaining_ratio(&self) -> f64 {
        let total = if self.total_hens == 0 { 1 } else { self.total_hens };
        (self.available_hens as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.batch_code.trim().to_lowercase() == code.trim().to_lowercase()
    }
}

/// Body of `POST /api/hens/addStock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPayload {
    pub hens: i64,
    pub weight: f64,
    pub breed: String,
    pub batch_code: String,
}

/// Query of `PUT /api/hens/updateStock`: the payload plus the existing batch id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdateParams {
    pub id: i64,
    pub hens: i64,
    pub weight: f64,
    pub breed: String,
    pub batch_code: String,
}

impl StockUpdateParams {
    pub fn new(id: i64, payload: StockPayload) -> Self {
        Self {
            id,
            hens: payload.hens,
            weight: payload.weight,
            breed: payload.breed,
            batch_code: payload.batch_code,
        }
    }
}
