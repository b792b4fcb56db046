//! Vendor field reports, kept as a JSON array on local disk.

use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use validator::ValidationErrors;

use crate::{
    breeds::{ReportBreed, REPORT_BREEDS},
    errors::ClientResult,
    models::{BreedCount, Report},
    pricing, validation,
};

/// Photos a single report can carry.
pub const MAX_IMAGES: usize = 6;

/// One breed line of the report summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub id: &'static str,
    pub name: &'static str,
    pub qty: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub lines: Vec<ReportLine>,
    pub total: i64,
}

/// A report being filled in.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub farm_name: String,
    pub reporter_name: String,
    pub reporter_phone: String,
    pub location: String,
    pub notes: String,
    pub payment_collected: bool,
    quantities: Vec<(&'static ReportBreed, String)>,
    images: Vec<String>,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self {
            farm_name: String::new(),
            reporter_name: String::new(),
            reporter_phone: String::new(),
            location: String::new(),
            notes: String::new(),
            payment_collected: false,
            quantities: REPORT_BREEDS.iter().map(|b| (b, "0".to_string())).collect(),
            images: Vec::new(),
        }
    }
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quantity text for breed `id`. Returns false for an unknown breed.
    pub fn set_quantity(&mut self, id: &str, qty: impl Into<String>) -> bool {
        match self.quantities.iter_mut().find(|(breed, _)| breed.id == id) {
            Some((_, value)) => {
                *value = qty.into();
                true
            }
            None => false,
        }
    }

    pub fn quantity(&self, id: &str) -> i64 {
        self.quantities
            .iter()
            .find(|(breed, _)| breed.id == id)
            .map(|(_, qty)| pricing::parse_lenient_i64(qty))
            .unwrap_or(0)
    }

    pub fn select_all_breeds(&mut self) {
        for (_, qty) in &mut self.quantities {
            *qty = "10".to_string();
        }
    }

    pub fn clear_breeds(&mut self) {
        for (_, qty) in &mut self.quantities {
            *qty = "0".to_string();
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Puts `uri` first, dropping the oldest photos beyond the limit.
    pub fn add_image(&mut self, uri: impl Into<String>) {
        self.images.insert(0, uri.into());
        self.images.truncate(MAX_IMAGES);
    }

    pub fn remove_image(&mut self, uri: &str) {
        self.images.retain(|image| image != uri);
    }

    /// Breeds with a positive quantity and their total.
    pub fn summary(&self) -> ReportSummary {
        let lines: Vec<ReportLine> = self
            .quantities
            .iter()
            .map(|(breed, qty)| ReportLine {
                id: breed.id,
                name: breed.name,
                qty: pricing::parse_lenient_i64(qty),
            })
            .filter(|line| line.qty > 0)
            .collect();
        let total = lines.iter().map(|line| line.qty).sum();

        ReportSummary { lines, total }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::require(&mut errors, "farm_name", &self.farm_name);
        validation::require(&mut errors, "reporter_name", &self.reporter_name);
        validation::require(&mut errors, "reporter_phone", &self.reporter_phone);
        validation::require(&mut errors, "location", &self.location);
        if self.summary().total <= 0 {
            validation::reject(&mut errors, "breeds", "required", "need at least one bird");
        }
        validation::finish(errors)
    }

    fn into_report(self) -> Report {
        let now = Utc::now();
        // Every catalogue breed is kept, zero counts included.
        let breeds = self
            .quantities
            .iter()
            .map(|(breed, qty)| BreedCount {
                id: breed.id.to_string(),
                qty: pricing::parse_lenient_i64(qty),
            })
            .collect();

        Report {
            id: format!("RPT-{}", now.timestamp_millis()),
            farm_name: self.farm_name.trim().to_string(),
            reporter_name: self.reporter_name.trim().to_string(),
            reporter_phone: self.reporter_phone.trim().to_string(),
            location: self.location.trim().to_string(),
            notes: self.notes.trim().to_string(),
            payment_collected: self.payment_collected,
            breeds,
            images: self.images,
            created_at: now,
        }
    }
}

/// Saved reports, newest first.
#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved reports; none when the file does not exist yet.
    pub async fn list(&self) -> ClientResult<Vec<Report>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no reports saved yet");
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self, draft), fields(farm = %draft.farm_name))]
    pub async fn submit(&self, draft: ReportDraft) -> ClientResult<Report> {
        draft.validate()?;
        let report = draft.into_report();

        let mut reports = self.list().await?;
        reports.insert(0, report.clone());

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(&reports)?).await?;

        info!(id = %report.id, total = report.total_birds(), "report saved");
        Ok(report)
    }
}
