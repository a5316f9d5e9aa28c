pub mod csv_records;
pub mod json_records;

pub use csv_records::{load_records_csv, parse_records_csv};
pub use json_records::{load_records_json, parse_records_json};
