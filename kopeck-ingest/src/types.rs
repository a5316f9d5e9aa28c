use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A prior transaction exactly as the caller supplied it.
///
/// Every field is optional on the wire; validation happens in [`crate::record`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: Option<RawAmount>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Amounts arrive either as JSON numbers or as strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Income,
    Expense,
}

/// Normalized, validated prior transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub amount: f64,
    /// Free-form label as supplied; "Other" when absent
    pub category: String,
    pub title: String,
    pub kind: EntryKind,
}

impl LedgerEntry {
    /// Counts toward spending totals
    pub fn is_spend(&self) -> bool {
        self.kind == EntryKind::Expense && self.amount > 0.0
    }

    /// Counts toward income totals
    pub fn is_earning(&self) -> bool {
        self.kind == EntryKind::Income && self.amount > 0.0
    }
}
