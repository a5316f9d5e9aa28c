//! Transaction value types produced by extraction

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single extracted income or expense.
///
/// Created once per extraction call and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TxnType,
    /// Non-negative, base currency. `None` when no amount could be found.
    pub amount: Option<f64>,
    pub category: Category,
    /// Short human label
    pub title: String,
    /// Serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Heuristic certainty (0.0 - 1.0)
    pub confidence: f64,
}

/// Income or expense
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxnType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TxnType {
    /// Parse the lower-case wire label; anything else is not a transaction type.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "income" => Some(TxnType::Income),
            "expense" => Some(TxnType::Expense),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
        }
    }

    /// Title used when nothing better was found in the text
    pub fn default_title(&self) -> &'static str {
        match self {
            TxnType::Income => "Income",
            TxnType::Expense => "Expense",
        }
    }
}

/// Closed category vocabulary
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Health,
    Shopping,
    Housing,
    Education,
    Bills,
    Work,
    Freelance,
    Investment,
    Gift,
    #[default]
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Shopping => "Shopping",
            Category::Housing => "Housing",
            Category::Education => "Education",
            Category::Bills => "Bills",
            Category::Work => "Work",
            Category::Freelance => "Freelance",
            Category::Investment => "Investment",
            Category::Gift => "Gift",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TxnType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxnType::Income
    }

    /// Amount, treating a missing one as zero for totals
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_wire_shape() {
        let txn = Transaction {
            kind: TxnType::Expense,
            amount: Some(50.0),
            category: Category::Food,
            title: "Хлеб".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 18).unwrap(),
            confidence: 0.9,
        };
        let v = serde_json::to_value(&txn).unwrap();
        assert_eq!(v["type"], "expense");
        assert_eq!(v["category"], "Food");
        assert_eq!(v["date"], "2026-02-18");
        assert_eq!(v["amount"], 50.0);
    }

    #[test]
    fn test_missing_amount_serializes_null() {
        let txn = Transaction {
            kind: TxnType::Expense,
            amount: None,
            category: Category::Other,
            title: "Expense".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 18).unwrap(),
            confidence: 0.3,
        };
        let v = serde_json::to_value(&txn).unwrap();
        assert!(v["amount"].is_null());
        assert_eq!(txn.amount_or_zero(), 0.0);
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(TxnType::from_label("Income"), Some(TxnType::Income));
        assert_eq!(TxnType::from_label(" expense "), Some(TxnType::Expense));
        assert_eq!(TxnType::from_label("transfer"), None);
        assert_eq!(TxnType::Income.default_title(), "Income");
    }
}
