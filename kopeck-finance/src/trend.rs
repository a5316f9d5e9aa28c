//! Compare spending against the immediately preceding window of equal length.

use kopeck_core::PeriodWindow;
use kopeck_ingest::LedgerEntry;
use serde::Serialize;

use crate::aggregator::expense_total;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendComparison {
    pub previous: PeriodWindow,
    pub previous_total: f64,
    pub current_total: f64,
    /// current - previous
    pub delta: f64,
    pub percent_change: f64,
}

impl TrendComparison {
    pub fn is_increase(&self) -> bool {
        self.delta > 0.0
    }
}

/// `None` when the previous window has no spending, so no percentage exists, or
/// when it would start before the earliest representable date.
pub fn compare_with_previous(
    entries: &[LedgerEntry],
    current: PeriodWindow,
    current_total: f64,
) -> Option<TrendComparison> {
    let previous = current.previous()?;
    let previous_total = expense_total(entries, previous);
    if previous_total <= 0.0 {
        tracing::debug!(start = %previous.start, "no spending in previous window, trend omitted");
        return None;
    }

    let delta = current_total - previous_total;
    Some(TrendComparison {
        previous,
        previous_total,
        current_total,
        delta,
        percent_change: delta / previous_total * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kopeck_ingest::EntryKind;

    fn spend(day: u32, amount: f64) -> LedgerEntry {
        LedgerEntry {
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            amount,
            category: "Food".to_string(),
            title: String::new(),
            kind: EntryKind::Expense,
        }
    }

    fn week() -> PeriodWindow {
        PeriodWindow::ending_at(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(), 7).unwrap()
    }

    #[test]
    fn test_growth() {
        let entries = vec![spend(10, 1000.0), spend(18, 1500.0)];
        let t = compare_with_previous(&entries, week(), 1500.0).unwrap();
        assert_eq!(t.previous_total, 1000.0);
        assert_eq!(t.delta, 500.0);
        assert_eq!(t.percent_change, 50.0);
        assert!(t.is_increase());
    }

    #[test]
    fn test_decline() {
        let entries = vec![spend(13, 2000.0), spend(18, 500.0)];
        let t = compare_with_previous(&entries, week(), 500.0).unwrap();
        assert_eq!(t.percent_change, -75.0);
        assert!(!t.is_increase());
    }

    #[test]
    fn test_omitted_at_calendar_floor() {
        let first = PeriodWindow {
            start: NaiveDate::MIN,
            end: NaiveDate::MIN,
        };
        assert!(compare_with_previous(&[spend(18, 500.0)], first, 0.0).is_none());
    }

    #[test]
    fn test_omitted_without_previous_spending() {
        let entries = vec![spend(18, 500.0)];
        assert!(compare_with_previous(&entries, week(), 500.0).is_none());
        assert!(compare_with_previous(&[], week(), 0.0).is_none());
    }
}
