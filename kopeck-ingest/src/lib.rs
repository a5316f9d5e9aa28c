//! kopeck-ingest: decoding and validation of caller-supplied prior transactions.

pub mod parsers;
pub mod record;
pub mod types;

pub use parsers::{load_records_csv, load_records_json};
pub use record::{RecordError, parse_record, parse_record_date, parse_records};
pub use types::{EntryKind, LedgerEntry, RawAmount, RawRecord};

use anyhow::Result;
use std::path::Path;

/// Load records from a `.csv` file, or from JSON for any other extension.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_records_csv(path)
    } else {
        load_records_json(path)
    }
}
