use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedCount {
    pub id: String,
    pub qty: i64,
}

/// A vendor's field report as saved on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// `RPT-<unix millis>`
    pub id: String,
    pub farm_name: String,
    pub reporter_name: String,
    pub reporter_phone: String,
    pub location: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub payment_collected: bool,
    pub breeds: Vec<BreedCount>,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn total_birds(&self) -> i64 {
        self.breeds.iter().map(|b| b.qty).sum()
    }
}
