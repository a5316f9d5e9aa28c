//! JSON array of prior transactions, as posted by the mobile client:
//!
//!   [{"date": "2026-02-18", "amount": 50, "category": "Food", "type": "expense", "title": "Хлеб"}]

use anyhow::{Context, Result};
use std::path::Path;

use crate::types::RawRecord;

/// Decode a JSON array of records.
///
/// Elements that are not record-shaped (wrong field types, not objects) are
/// skipped individually; only a document that is not an array is an error.
pub fn parse_records_json(text: &str) -> Result<Vec<RawRecord>> {
    let items: Vec<serde_json::Value> =
        serde_json::from_str(text).context("expected a JSON array of transactions")?;

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<RawRecord>(item) {
            Ok(r) => out.push(r),
            Err(e) => tracing::debug!(index = i, error = %e, "skipping malformed JSON record"),
        }
    }
    Ok(out)
}

pub fn load_records_json(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_records_json(&text).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawAmount;

    #[test]
    fn test_parses_array() {
        let text = r#"[
            {"date": "2026-02-18", "amount": 50, "category": "Food", "type": "expense", "title": "Хлеб"},
            {"date": "2026-02-19T08:00:00", "amount": "85000", "type": "income"}
        ]"#;
        let recs = parse_records_json(text).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].amount, Some(RawAmount::Number(50.0)));
        assert_eq!(recs[1].kind.as_deref(), Some("income"));
        assert_eq!(recs[1].category, None);
    }

    #[test]
    fn test_skips_non_record_elements() {
        let text = r#"[42, {"date": 20260218, "type": "expense"}, {"date": "2026-02-18", "type": "expense"}]"#;
        let recs = parse_records_json(text).unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(parse_records_json(r#"{"date": "2026-02-18"}"#).is_err());
    }
}
