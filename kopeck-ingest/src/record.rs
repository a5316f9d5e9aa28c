//! Validation of caller-supplied records.
//!
//! A malformed record is dropped on its own; it never fails the batch.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::types::{EntryKind, LedgerEntry, RawAmount, RawRecord};

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("record has no date")]
    MissingDate,
    #[error("unparseable date '{0}'")]
    InvalidDate(String),
    #[error("unsupported transaction type '{0}'")]
    UnknownType(String),
    #[error("unparseable amount '{0}'")]
    InvalidAmount(String),
}

/// Accepts `YYYY-MM-DD` (anything after the first 10 characters is ignored) and
/// full timestamps containing `T`, with or without an offset.
pub fn parse_record_date(raw: &str) -> Result<NaiveDate, RecordError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RecordError::MissingDate);
    }

    let invalid = || RecordError::InvalidDate(raw.to_string());

    if raw.contains('T') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.date_naive());
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Ok(ndt.date());
            }
        }
        return Err(invalid());
    }

    let head = raw.get(..10).ok_or_else(invalid)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").map_err(|_| invalid())
}

fn parse_amount(raw: Option<&RawAmount>) -> Result<f64, RecordError> {
    match raw {
        None => Ok(0.0),
        Some(RawAmount::Number(n)) if n.is_finite() => Ok(*n),
        Some(RawAmount::Number(n)) => Err(RecordError::InvalidAmount(n.to_string())),
        Some(RawAmount::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(RawAmount::Text(s)) => s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect::<String>()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| RecordError::InvalidAmount(s.clone())),
    }
}

fn parse_kind(raw: Option<&str>) -> Result<EntryKind, RecordError> {
    let label = raw.unwrap_or("").trim().to_lowercase();
    match label.as_str() {
        "expense" => Ok(EntryKind::Expense),
        "income" => Ok(EntryKind::Income),
        _ => Err(RecordError::UnknownType(label)),
    }
}

/// Validate one record.
pub fn parse_record(raw: &RawRecord) -> Result<LedgerEntry, RecordError> {
    let date = parse_record_date(raw.date.as_deref().unwrap_or(""))?;
    let amount = parse_amount(raw.amount.as_ref())?;
    let kind = parse_kind(raw.kind.as_deref())?;

    let category = raw
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("Other")
        .to_string();

    Ok(LedgerEntry {
        date,
        amount,
        category,
        title: raw.title.clone().unwrap_or_default(),
        kind,
    })
}

/// Validate a batch, skipping (and logging) every record that fails.
pub fn parse_records(raw: &[RawRecord]) -> Vec<LedgerEntry> {
    raw.iter()
        .enumerate()
        .filter_map(|(i, r)| match parse_record(r) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(index = i, error = %e, "skipping record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn record(date: &str, amount: f64, kind: &str) -> RawRecord {
        RawRecord {
            date: Some(date.to_string()),
            amount: Some(RawAmount::Number(amount)),
            category: Some("Food".to_string()),
            kind: Some(kind.to_string()),
            title: Some("Хлеб".to_string()),
        }
    }

    #[test]
    fn test_date_shapes() {
        assert_eq!(parse_record_date("2026-02-18").unwrap(), d(2026, 2, 18));
        assert_eq!(parse_record_date("2026-02-18 09:15").unwrap(), d(2026, 2, 18));
        assert_eq!(parse_record_date("2026-02-18T09:15:00").unwrap(), d(2026, 2, 18));
        assert_eq!(parse_record_date("2026-02-18T09:15:00.123").unwrap(), d(2026, 2, 18));
        assert_eq!(parse_record_date("2026-02-18T23:15:00Z").unwrap(), d(2026, 2, 18));
        assert_eq!(parse_record_date("2026-02-18T09:15:00+03:00").unwrap(), d(2026, 2, 18));
    }

    #[test]
    fn test_bad_dates() {
        assert_eq!(parse_record_date(""), Err(RecordError::MissingDate));
        assert!(matches!(parse_record_date("18.02.2026"), Err(RecordError::InvalidDate(_))));
        assert!(matches!(parse_record_date("2026-02"), Err(RecordError::InvalidDate(_))));
        assert!(matches!(parse_record_date("yesterdayT"), Err(RecordError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_record_defaults() {
        let raw = RawRecord {
            date: Some("2026-02-18".to_string()),
            amount: Some(RawAmount::Text("1 500".to_string())),
            kind: Some("Expense".to_string()),
            ..Default::default()
        };
        assert_eq!(parse_record(&raw).unwrap().amount, 1500.0);

        let bad = RawRecord {
            amount: Some(RawAmount::Text("полторы".to_string())),
            ..raw.clone()
        };
        assert!(matches!(parse_record(&bad), Err(RecordError::InvalidAmount(_))));

        let raw = RawRecord {
            amount: Some(RawAmount::Text("1 500,5".to_string())),
            ..raw
        };
        let entry = parse_record(&raw).unwrap();
        assert_eq!(entry.amount, 1500.5);
        assert_eq!(entry.category, "Other");
        assert_eq!(entry.kind, EntryKind::Expense);
        assert_eq!(entry.title, "");
    }

    #[test]
    fn test_parse_records_skips_bad_ones() {
        let batch = vec![
            record("2026-02-18", 50.0, "expense"),
            record("not a date", 80.0, "expense"),
            record("2026-02-18", 80.0, "transfer"),
            record("2026-02-19T10:00:00", 85000.0, "income"),
        ];
        let entries = parse_records(&batch);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_spend());
        assert!(entries[1].is_earning());
    }

    #[test]
    fn test_json_wire_record() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"date": "2026-02-18", "amount": "250", "type": "expense", "category": "Transport"}"#,
        )
        .unwrap();
        let entry = parse_record(&raw).unwrap();
        assert_eq!(entry.amount, 250.0);
        assert_eq!(entry.category, "Transport");
    }
}
