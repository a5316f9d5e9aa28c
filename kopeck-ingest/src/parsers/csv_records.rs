//! CSV export of prior transactions.
//!
//! Header row names the columns (any order, extra columns ignored):
//!   date,amount,category,type,title

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::types::{RawAmount, RawRecord};

fn cell(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn parse_records_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let (date, amount, category, kind, title) =
        (col("date"), col("amount"), col("category"), col("type"), col("title"));

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(row = i + 1, error = %e, "skipping unreadable CSV row");
                continue;
            }
        };

        out.push(RawRecord {
            date: cell(&record, date),
            amount: cell(&record, amount).map(RawAmount::Text),
            category: cell(&record, category),
            kind: cell(&record, kind),
            title: cell(&record, title),
        });
    }

    Ok(out)
}

pub fn load_records_csv(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_records_csv(file).with_context(|| format!("parsing {}", path.display()))
}
