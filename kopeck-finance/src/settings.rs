//! Tunables for extraction and analytics

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Characters captured on each side of an amount for classification
    pub context_radius: usize,
    /// Amount occurrences kept per message; the rest are dropped
    pub max_candidates: usize,
    /// Analytics window when the message names none
    pub default_window_days: i64,
    pub top_categories: usize,
    pub top_expenses: usize,
    /// Top categories the savings cut is spread over
    pub plan_categories: usize,
    /// Label printed after money values
    pub currency: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            context_radius: 50,
            max_candidates: 5,
            default_window_days: 7,
            top_categories: 5,
            top_expenses: 5,
            plan_categories: 3,
            currency: "RUB".to_string(),
        }
    }
}
