//! Sum and group prior transactions inside a date window.

use kopeck_core::PeriodWindow;
use kopeck_ingest::LedgerEntry;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Aggregates for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub window: PeriodWindow,
    /// Entries of any kind dated inside the window
    pub entry_count: usize,
    pub total_expense: f64,
    pub total_income: f64,
    /// Expense sums per category, in first-encountered order
    pub by_category: Vec<CategoryTotal>,
    /// Largest categories, descending; ties keep first-encountered order
    pub top_categories: Vec<CategoryTotal>,
    /// Largest single expenses, descending; ties go to the earlier date
    pub biggest_expenses: Vec<LedgerEntry>,
}

impl PeriodSummary {
    pub fn daily_average(&self) -> f64 {
        self.total_expense / self.window.len_days().max(1) as f64
    }

    /// Category share of total spending, in percent
    pub fn share(&self, amount: f64) -> f64 {
        if self.total_expense > 0.0 {
            amount / self.total_expense * 100.0
        } else {
            0.0
        }
    }
}

/// Total spend inside `window`
pub fn expense_total(entries: &[LedgerEntry], window: PeriodWindow) -> f64 {
    entries
        .iter()
        .filter(|e| window.contains(e.date) && e.is_spend())
        .map(|e| e.amount)
        .sum()
}

fn sum_by_category<'a>(expenses: impl Iterator<Item = &'a LedgerEntry>) -> Vec<CategoryTotal> {
    let mut out: Vec<CategoryTotal> = Vec::new();
    for e in expenses {
        match out.iter_mut().find(|c| c.category == e.category) {
            Some(c) => c.amount += e.amount,
            None => out.push(CategoryTotal {
                category: e.category.clone(),
                amount: e.amount,
            }),
        }
    }
    out
}

/// Aggregate `entries` falling inside `window`.
pub fn aggregate(
    entries: &[LedgerEntry],
    window: PeriodWindow,
    top_categories: usize,
    top_expenses: usize,
) -> PeriodSummary {
    let current: Vec<&LedgerEntry> = entries.iter().filter(|e| window.contains(e.date)).collect();
    let expenses: Vec<&LedgerEntry> = current.iter().copied().filter(|e| e.is_spend()).collect();

    let total_expense = expenses.iter().map(|e| e.amount).sum();
    let total_income = current
        .iter()
        .filter(|e| e.is_earning())
        .map(|e| e.amount)
        .sum();

    let by_category = sum_by_category(expenses.iter().copied());

    // stable sorts keep the documented tie-breaks
    let mut top = by_category.clone();
    top.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    top.truncate(top_categories);

    let mut biggest: Vec<LedgerEntry> = expenses.iter().map(|e| (*e).clone()).collect();
    biggest.sort_by(|a, b| b.amount.total_cmp(&a.amount).then_with(|| a.date.cmp(&b.date)));
    biggest.truncate(top_expenses);

    tracing::debug!(
        start = %window.start,
        end = %window.end,
        entries = current.len(),
        total_expense,
        "aggregated window"
    );

    PeriodSummary {
        window,
        entry_count: current.len(),
        total_expense,
        total_income,
        by_category,
        top_categories: top,
        biggest_expenses: biggest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kopeck_ingest::EntryKind;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn entry(day: u32, amount: f64, category: &str, kind: EntryKind) -> LedgerEntry {
        LedgerEntry {
            date: d(day),
            amount,
            category: category.to_string(),
            title: format!("{category} {amount}"),
            kind,
        }
    }

    fn sample() -> Vec<LedgerEntry> {
        vec![
            entry(4, 800.0, "Transport", EntryKind::Expense),
            entry(5, 500.0, "Food", EntryKind::Expense),
            entry(6, 500.0, "Transport", EntryKind::Expense),
            entry(7, 800.0, "Food", EntryKind::Expense),
            entry(8, 85000.0, "Work", EntryKind::Income),
            entry(9, 0.0, "Food", EntryKind::Expense),
            entry(10, 200.0, "Health", EntryKind::Expense),
            // outside the window
            entry(1, 9999.0, "Food", EntryKind::Expense),
        ]
    }

    fn week() -> PeriodWindow {
        PeriodWindow::ending_at(d(10), 7).unwrap()
    }

    #[test]
    fn test_totals() {
        let s = aggregate(&sample(), week(), 5, 5);
        assert_eq!(s.total_expense, 2800.0);
        assert_eq!(s.total_income, 85000.0);
        assert_eq!(s.entry_count, 7);
        assert!((s.daily_average() - 2800.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_sums_match_total() {
        let s = aggregate(&sample(), week(), 5, 5);
        let sum: f64 = s.by_category.iter().map(|c| c.amount).sum();
        assert!((sum - s.total_expense).abs() < 1e-9);
    }

    #[test]
    fn test_top_categories_tie_keeps_first_seen() {
        let s = aggregate(&sample(), week(), 5, 5);
        // Transport (first seen) and Food both total 1300
        let names: Vec<_> = s.top_categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Transport", "Food", "Health"]);
        assert!((s.share(1300.0) - 1300.0 / 2800.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_biggest_expenses_tie_by_date() {
        let s = aggregate(&sample(), week(), 5, 3);
        let picked: Vec<_> = s.biggest_expenses.iter().map(|e| (e.amount, e.date)).collect();
        assert_eq!(picked, vec![(800.0, d(4)), (800.0, d(7)), (500.0, d(5))]);
    }

    #[test]
    fn test_expense_total_ignores_income_and_zero() {
        assert_eq!(expense_total(&sample(), week()), 2800.0);
        let prev = week().previous().unwrap();
        assert_eq!(expense_total(&sample(), prev), 9999.0);
    }

    #[test]
    fn test_empty_window() {
        let s = aggregate(&[], week(), 5, 5);
        assert_eq!(s.total_expense, 0.0);
        assert!(s.top_categories.is_empty());
        assert_eq!(s.share(10.0), 0.0);
    }
}
