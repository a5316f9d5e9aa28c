//! Closed date windows used to bound aggregation

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// Inclusive `[start, end]` date range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// The `days`-long window finishing on `end` (inclusive).
    ///
    /// Returns `None` for a non-positive length or one reaching past the calendar range.
    pub fn ending_at(end: NaiveDate, days: i64) -> Option<Self> {
        if days <= 0 {
            return None;
        }
        let start = end.checked_sub_signed(TimeDelta::try_days(days - 1)?)?;
        Some(Self { start, end })
    }

    /// Number of calendar days covered, bounds included
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Equal-length window immediately before this one: `[start - d, start - 1]`.
    /// `None` when it would start before the earliest representable date.
    pub fn previous(&self) -> Option<Self> {
        let d = TimeDelta::try_days(self.len_days())?;
        Some(Self {
            start: self.start.checked_sub_signed(d)?,
            end: self.start.pred_opt()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_week_window() {
        let w = PeriodWindow::ending_at(d(2026, 3, 10), 7).unwrap();
        assert_eq!(w.start, d(2026, 3, 4));
        assert_eq!(w.len_days(), 7);
        assert!(w.contains(d(2026, 3, 4)));
        assert!(w.contains(d(2026, 3, 10)));
        assert!(!w.contains(d(2026, 3, 3)));
    }

    #[test]
    fn test_previous_is_adjacent_and_equal_length() {
        let w = PeriodWindow::ending_at(d(2026, 3, 1), 7).unwrap();
        let prev = w.previous().unwrap();
        assert_eq!(prev.end, d(2026, 2, 22));
        assert_eq!(prev.start, d(2026, 2, 16));
        assert_eq!(prev.len_days(), 7);
        assert_eq!(prev.end.succ_opt(), Some(w.start));
    }

    #[test]
    fn test_non_positive_length_rejected() {
        assert!(PeriodWindow::ending_at(d(2026, 3, 1), 0).is_none());
        assert!(PeriodWindow::ending_at(d(2026, 3, 1), -3).is_none());
    }

    #[test]
    fn test_oversized_length_rejected() {
        assert!(PeriodWindow::ending_at(d(2026, 3, 1), i64::MAX).is_none());
        assert!(PeriodWindow::ending_at(d(2026, 3, 1), 400_000_000).is_none());
    }

    #[test]
    fn test_previous_at_calendar_floor() {
        let w = PeriodWindow {
            start: NaiveDate::MIN,
            end: NaiveDate::MIN,
        };
        assert!(w.previous().is_none());
    }
}
