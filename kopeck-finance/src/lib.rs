//! kopeck-finance: transaction extraction, spending analytics, savings plans, and chat fallback

pub mod aggregator;
pub mod chat;
pub mod extraction;
pub mod money;
pub mod report;
pub mod request;
pub mod savings;
pub mod settings;
pub mod text_extractor;
pub mod trend;

pub use aggregator::{CategoryTotal, PeriodSummary, aggregate};
pub use chat::fallback_reply;
pub use extraction::{ExtractedInfo, ExtractionResult, extract_transactions};
pub use money::fmt_money;
pub use report::{ReportTail, build_report, try_answer};
pub use request::{extract_days, is_analytics_request};
pub use savings::{SavingsPlan, extract_percent, plan_savings};
pub use settings::EngineSettings;
pub use text_extractor::{AmountMatch, scan_amounts};
pub use trend::{TrendComparison, compare_with_previous};
