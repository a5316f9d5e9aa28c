//! Savings plan: cut total spending by a target percentage, spread over the top categories.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::aggregator::CategoryTotal;

const PCT: &str = r"(?P<pct>\d+(?:[.,]\d+)?)\s*%";

/// Percentage phrasings, most specific first. Only the first match of each is tried.
static PERCENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let sources = [
        format!(r"сократ[итьи]*\s+[на]*\s*{PCT}"),
        format!(r"уменьш[итьи]*\s+[на]*\s*{PCT}"),
        format!(r"сниз[итьи]*\s+[на]*\s*{PCT}"),
        format!(r"эконом[итьи]*\s+[на]*\s*{PCT}"),
        format!(r"{PCT}\s*(?:сократ|уменьш|сниз|эконом)"),
        format!(r"на\s*{PCT}"),
        PCT.to_string(),
    ];
    sources
        .iter()
        .filter_map(|src| match Regex::new(src) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(pattern = %src, error = %e, "percent pattern failed to compile");
                None
            }
        })
        .collect()
});

fn valid_percent(p: f64) -> bool {
    p > 0.0 && p < 100.0
}

/// Target reduction percentage named in `message`, strictly between 0 and 100.
pub fn extract_percent(message: &str) -> Option<f64> {
    let message = message.to_lowercase();
    for re in PERCENT_PATTERNS.iter() {
        let Some(caps) = re.captures(&message) else { continue };
        let Some(raw) = caps.name("pct") else { continue };
        match raw.as_str().replace(',', ".").parse::<f64>() {
            Ok(v) if valid_percent(v) => return Some(v),
            _ => {
                tracing::debug!(raw = raw.as_str(), "percentage out of range, trying next pattern");
            }
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCut {
    pub category: String,
    pub amount: f64,
    pub cut: f64,
    pub new_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsPlan {
    pub percent: f64,
    pub total: f64,
    pub target: f64,
    pub savings: f64,
    pub cuts: Vec<CategoryCut>,
}

/// Plan a `percent` reduction of `total`.
///
/// The cut is applied uniformly to each of the first `categories` entries of
/// `top`. `None` unless `0 < percent < 100`.
pub fn plan_savings(
    total: f64,
    percent: f64,
    top: &[CategoryTotal],
    categories: usize,
) -> Option<SavingsPlan> {
    if !valid_percent(percent) {
        return None;
    }
    let rate = percent / 100.0;
    let target = total * (1.0 - rate);

    let cuts = top
        .iter()
        .take(categories)
        .map(|c| {
            let cut = c.amount * rate;
            CategoryCut {
                category: c.category.clone(),
                amount: c.amount,
                cut,
                new_amount: c.amount - cut,
            }
        })
        .collect();

    Some(SavingsPlan {
        percent,
        total,
        target,
        savings: total - target,
        cuts,
    })
}
