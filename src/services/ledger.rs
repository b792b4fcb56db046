//! Admin ledger. Entries live in memory only; there is no backend for them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::{
    errors::ClientResult,
    models::{SaleDetails, Transaction, TransactionType},
    pricing, validation,
};

/// Ledger entry as typed into the add-transaction form.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub date: String,
    pub particular: String,
    pub ref_no: String,
    pub kind: TransactionType,
    pub amount: String,
    pub vehicle_no: String,
    pub birds: String,
    pub weight: String,
    pub rate: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            date: String::new(),
            particular: String::new(),
            ref_no: String::new(),
            kind: TransactionType::Debit,
            amount: String::new(),
            vehicle_no: String::new(),
            birds: String::new(),
            weight: String::new(),
            rate: String::new(),
        }
    }
}

impl TransactionDraft {
    /// Fills `amount` from weight × rate when both are positive. Returns whether it did.
    pub fn autofill_amount(&mut self) -> bool {
        match pricing::sale_amount(&self.weight, &self.rate) {
            Some(amount) => {
                self.amount = format!("{:.2}", amount);
                true
            }
            None => false,
        }
    }

    fn sale_details(&self) -> Option<SaleDetails> {
        if self.kind != TransactionType::Debit {
            return None;
        }
        let fields = [&self.vehicle_no, &self.birds, &self.weight, &self.rate];
        if fields.iter().all(|f| f.trim().is_empty()) {
            return None;
        }
        Some(SaleDetails {
            vehicle_no: self.vehicle_no.trim().to_string(),
            birds: self.birds.trim().to_string(),
            weight: self.weight.trim().to_string(),
            rate: self.rate.trim().to_string(),
        })
    }

    fn into_transaction(self) -> Result<Transaction, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::require(&mut errors, "date", &self.date);
        validation::require(&mut errors, "particular", &self.particular);
        validation::require(&mut errors, "amount", &self.amount);

        let amount = Decimal::from_str(self.amount.trim()).ok();
        if !self.amount.trim().is_empty() && amount.is_none() {
            validation::reject(&mut errors, "amount", "number", "must be a number");
        }
        validation::finish(errors)?;

        let ref_no = Some(self.ref_no.trim().to_string()).filter(|r| !r.is_empty());
        Ok(Transaction {
            id: Uuid::new_v4().to_string(),
            date: self.date.trim().to_string(),
            particular: self.particular.trim().to_string(),
            ref_no,
            kind: self.kind,
            amount: amount.unwrap_or_default(),
            sale: self.sale_details(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub debit: Decimal,
    pub credit: Decimal,
    /// credit − debit
    pub net: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger pre-filled with the demo entries shown on first open.
    pub fn with_sample_entries() -> Self {
        let sale = |vehicle_no: &str, birds: &str, weight: &str, rate: &str| SaleDetails {
            vehicle_no: vehicle_no.into(),
            birds: birds.into(),
            weight: weight.into(),
            rate: rate.into(),
        };

        Self {
            entries: vec![
                Transaction {
                    id: "1".into(),
                    date: "01/08/2025".into(),
                    particular: "CG-C.Growing Sales GST-TS".into(),
                    ref_no: Some("25/WNPBS1625".into()),
                    kind: TransactionType::Debit,
                    amount: dec!(145730.00),
                    sale: Some(sale("TS32T8889", "900", "1996.3", "73.00")),
                },
                Transaction {
                    id: "2".into(),
                    date: "06/08/2025".into(),
                    particular: "Andhra Bank C/a (Shekarreddy)".into(),
                    ref_no: None,
                    kind: TransactionType::Credit,
                    amount: dec!(1998000.00),
                    sale: None,
                },
                Transaction {
                    id: "3".into(),
                    date: "02/08/2025".into(),
                    particular: "CG-C.Growing Sales GST-TS".into(),
                    ref_no: Some("25/GDLBS905".into()),
                    kind: TransactionType::Debit,
                    amount: dec!(182172.00),
                    sale: Some(sale("AP39WD2002", "1022", "2495.5", "73.00")),
                },
            ],
        }
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    /// Validates `draft` and puts the new entry at the top.
    pub fn add(&mut self, draft: TransactionDraft) -> ClientResult<&Transaction> {
        let transaction = draft.into_transaction()?;
        info!(kind = %transaction.kind, amount = %transaction.amount, "ledger entry added");
        self.entries.insert(0, transaction);
        Ok(&self.entries[0])
    }

    pub fn summary(&self) -> LedgerSummary {
        let (debit, credit) = self
            .entries
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(debit, credit), entry| match entry.kind {
                TransactionType::Debit => (debit + entry.amount, credit),
                TransactionType::Credit => (debit, credit + entry.amount),
            });

        LedgerSummary {
            debit,
            credit,
            net: credit - debit,
        }
    }
}
