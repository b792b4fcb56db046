use serde::Serialize;
use tracing::{info, instrument};
use validator::ValidationErrors;

use crate::{
    breeds::{self, CANONICAL_BREEDS},
    client::{ApiClient, Service},
    errors::ClientResult,
    models::{StockBatch, StockPayload, StockUpdateParams},
    pricing, validation,
};

/// Birds and weight counted under one breed bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BreedTotals {
    pub birds: i64,
    pub weight: f64,
}

impl BreedTotals {
    /// Average kg per bird; an empty bucket divides by one.
    pub fn average_weight(&self) -> f64 {
        let birds = if self.birds == 0 { 1 } else { self.birds };
        self.weight / birds as f64
    }
}

/// Which slice of the dashboard is on show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockFilter {
    All,
    Breed(String),
}

impl std::str::FromStr for StockFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() || s.trim().eq_ignore_ascii_case("all") {
            Ok(StockFilter::All)
        } else {
            let label = breeds::match_breed(s).unwrap_or(s.trim());
            Ok(StockFilter::Breed(label.to_string()))
        }
    }
}

impl std::fmt::Display for StockFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockFilter::All => write!(f, "Total Birds"),
            StockFilter::Breed(label) => write!(f, "{}", label),
        }
    }
}

/// Dashboard figures derived from the stock list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSummary {
    /// Sum of available hens; this is what the dashboard calls "Total Birds".
    pub total_birds: i64,
    pub total_weight: f64,
    pub total_hens: i64,
    /// Canonical breeds first (always present), then breeds no label matched.
    pub breeds: Vec<(String, BreedTotals)>,
}

impl StockSummary {
    pub fn from_batches(batches: &[StockBatch]) -> Self {
        let mut breeds: Vec<(String, BreedTotals)> = CANONICAL_BREEDS
            .iter()
            .map(|label| (label.to_string(), BreedTotals::default()))
            .collect();
        let mut total_birds = 0;
        let mut total_weight = 0.0;
        let mut total_hens = 0;

        for batch in batches {
            total_birds += batch.available_hens;
            total_weight += batch.weight;
            total_hens += batch.total_hens;

            let bucket = breeds::bucket_for(batch.breed.as_deref());
            let position = match breeds.iter().position(|(label, _)| *label == bucket) {
                Some(position) => position,
                None => {
                    breeds.push((bucket, BreedTotals::default()));
                    breeds.len() - 1
                }
            };

            let totals = &mut breeds[position].1;
            totals.birds += batch.available_hens;
            totals.weight += batch.weight;
        }

        Self {
            total_birds,
            total_weight,
            total_hens,
            breeds,
        }
    }

    pub fn breed(&self, label: &str) -> Option<&BreedTotals> {
        self.breeds
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, totals)| totals)
    }

    pub fn breed_labels(&self) -> impl Iterator<Item = &str> {
        self.breeds.iter().map(|(name, _)| name.as_str())
    }

    /// Figures for the selected filter; an unknown breed shows zeros.
    pub fn display(&self, filter: &StockFilter) -> BreedTotals {
        match filter {
            StockFilter::All => BreedTotals {
                birds: self.total_birds,
                weight: self.total_weight,
            },
            StockFilter::Breed(label) => self.breed(label).copied().unwrap_or_default(),
        }
    }
}

/// The add/update stock form as typed by the admin.
#[derive(Debug, Clone, Default)]
pub struct StockForm {
    pub batch_code: String,
    pub hens: String,
    pub weight: String,
    pub breed: String,
}

impl StockForm {
    pub fn validate(&self) -> Result<StockPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::require(&mut errors, "batch_code", &self.batch_code);
        validation::require(&mut errors, "hens", &self.hens);
        validation::require(&mut errors, "weight", &self.weight);
        validation::require(&mut errors, "breed", &self.breed);

        let hens = pricing::parse_i64(&self.hens);
        let weight = pricing::parse_f64(&self.weight);
        if !self.hens.trim().is_empty() && hens.is_none() {
            validation::reject(&mut errors, "hens", "number", "must be a whole number");
        }
        if !self.weight.trim().is_empty() && weight.is_none() {
            validation::reject(&mut errors, "weight", "number", "must be a number");
        }
        validation::finish(errors)?;

        Ok(StockPayload {
            hens: hens.unwrap_or_default(),
            weight: weight.unwrap_or_default(),
            breed: self.breed.trim().to_string(),
            batch_code: self.batch_code.trim().to_string(),
        })
    }
}

/// Which request the stock form ended up issuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum StockWrite {
    #[strum(serialize = "New Stock Added!")]
    Added,
    #[strum(serialize = "Stock Updated (Corrected)!")]
    Updated { id: i64 },
}

/// Admin dashboard: stock listing and the add-or-correct stock form.
#[derive(Debug, Clone)]
pub struct StockService {
    client: ApiClient,
}

impl StockService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn fetch_stock(&self) -> ClientResult<Vec<StockBatch>> {
        let url = self.client.url(Service::Api, &["api", "hens", "getStock"])?;
        self.client.get_list(url).await
    }

    /// Submits the stock form. A batch whose code matches (ignoring case) is corrected
    /// in place with a PUT carrying its id; otherwise a new batch is POSTed.
    #[instrument(skip(self, form, existing), fields(batch_code = %form.batch_code))]
    pub async fn upsert_stock(&self, form: &StockForm, existing: &[StockBatch]) -> ClientResult<StockWrite> {
        let payload = form.validate()?;

        match existing.iter().find(|b| b.has_code(&payload.batch_code)) {
            Some(batch) => {
                let url = self.client.url(Service::Api, &["api", "hens", "updateStock"])?;
                let params = StockUpdateParams::new(batch.id, payload);
                self.client.put_query(url, &params).await?;
                info!(id = batch.id, "stock batch updated");
                Ok(StockWrite::Updated { id: batch.id })
            }
            None => {
                let url = self.client.url(Service::Api, &["api", "hens", "addStock"])?;
                self.client.post_json(url, &payload).await?;
                info!("stock batch added");
                Ok(StockWrite::Added)
            }
        }
    }
}
