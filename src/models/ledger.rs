use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum TransactionType {
    /// Money owed to the farm for a sale.
    Debit,
    /// Money received.
    Credit,
}

/// Sale particulars recorded against a debit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetails {
    pub vehicle_no: String,
    pub birds: String,
    pub weight: String,
    pub rate: String,
}

/// A ledger line. Kept on the client only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: String,
    pub particular: String,
    #[serde(default)]
    pub ref_no: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale: Option<SaleDetails>,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.kind == TransactionType::Debit
    }
}
