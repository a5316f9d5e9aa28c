//! Deterministic spending report for analytics questions in chat.

use chrono::NaiveDate;
use kopeck_core::PeriodWindow;
use kopeck_ingest::{RawRecord, parse_records};

use crate::aggregator::{PeriodSummary, aggregate};
use crate::money::fmt_money;
use crate::request::{MAX_WINDOW_DAYS, asks_for_reduction, extract_days, is_analytics_request};
use crate::savings::{SavingsPlan, extract_percent, plan_savings};
use crate::settings::EngineSettings;
use crate::trend::{TrendComparison, compare_with_previous};

pub const NO_RECORDS: &str = "У вас пока нет транзакций для анализа.";

pub const PERCENT_HINT: &str = "Если хотите посчитать экономию, напишите целевой процент, например: 'сократить затраты на 10%' или 'уменьшить расходы на 20%'.";

/// What follows the report body
#[derive(Debug, Clone, PartialEq)]
pub enum ReportTail {
    Plan(SavingsPlan),
    PercentHint,
    Nothing,
}

/// Render the report text for one window.
pub fn build_report(
    summary: &PeriodSummary,
    trend: Option<&TrendComparison>,
    tail: &ReportTail,
    currency: &str,
) -> String {
    let days = summary.window.len_days();
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "Аналитика затрат за {days} дней ({}–{}):",
        summary.window.start.format("%d.%m.%Y"),
        summary.window.end.format("%d.%m.%Y"),
    ));
    lines.push(format!("- Расходы: {} {currency}", fmt_money(summary.total_expense)));
    if summary.total_income > 0.0 {
        lines.push(format!("- Доходы: {} {currency}", fmt_money(summary.total_income)));
    }
    lines.push(format!(
        "- Среднее в день: {} {currency}",
        fmt_money(summary.daily_average())
    ));

    if let Some(t) = trend {
        let direction = if t.is_increase() { "выросли" } else { "снизились" };
        lines.push(format!(
            "- По сравнению с предыдущими {days} днями расходы {direction} на {} {currency} ({:.1}%)",
            fmt_money(t.delta.abs()),
            t.percent_change.abs(),
        ));
    }

    if !summary.top_categories.is_empty() {
        lines.push(String::new());
        lines.push("Топ категорий по расходам:".to_string());
        for c in &summary.top_categories {
            lines.push(format!(
                "- {}: {} {currency} ({:.1}%)",
                c.category,
                fmt_money(c.amount),
                summary.share(c.amount),
            ));
        }
    }

    if !summary.biggest_expenses.is_empty() {
        lines.push(String::new());
        lines.push("Крупнейшие расходы:".to_string());
        for e in &summary.biggest_expenses {
            lines.push(format!(
                "- {}: {} — {} — {} {currency}",
                e.date.format("%d.%m"),
                e.category,
                e.title,
                fmt_money(e.amount),
            ));
        }
    }

    match tail {
        ReportTail::Plan(plan) => {
            lines.push(String::new());
            lines.push(format!("План экономии (сократить расходы на {:.1}%):", plan.percent));
            lines.push(format!("- Цель по расходам: {} {currency}", fmt_money(plan.target)));
            lines.push(format!("- Экономия: {} {currency}", fmt_money(plan.savings)));
            if !plan.cuts.is_empty() {
                lines.push(
                    "Как можно распределить сокращение по топ-категориям (пропорционально доле):"
                        .to_string(),
                );
                for c in &plan.cuts {
                    lines.push(format!(
                        "- {}: было {} → станет {} (экономия {})",
                        c.category,
                        fmt_money(c.amount),
                        fmt_money(c.new_amount),
                        fmt_money(c.cut),
                    ));
                }
            }
        }
        ReportTail::PercentHint => {
            lines.push(String::new());
            lines.push(PERCENT_HINT.to_string());
        }
        ReportTail::Nothing => {}
    }

    lines.join("\n").trim().to_string()
}

/// Answer an analytics question from prior records.
///
/// `None` means the message is not ours to answer: no records were given, or it
/// is not an analytics request.
pub fn try_answer(
    message: &str,
    records: &[RawRecord],
    today: NaiveDate,
    settings: &EngineSettings,
) -> Option<String> {
    if records.is_empty() || !is_analytics_request(message) {
        return None;
    }

    let entries = parse_records(records);
    if entries.is_empty() {
        return Some(NO_RECORDS.to_string());
    }

    // configured windows outside 1..=366 days fall back to the default week
    let configured = Some(settings.default_window_days)
        .filter(|d| (1..=MAX_WINDOW_DAYS).contains(d))
        .unwrap_or(EngineSettings::default().default_window_days);
    let days = extract_days(message).unwrap_or(configured);
    let window = PeriodWindow::ending_at(today, days)?;
    let days = window.len_days();

    let summary = aggregate(&entries, window, settings.top_categories, settings.top_expenses);
    if summary.entry_count == 0 {
        return Some(format!("За последние {days} дней нет расходов для анализа."));
    }

    let trend = compare_with_previous(&entries, window, summary.total_expense);

    let plan = extract_percent(message)
        .filter(|_| summary.total_expense > 0.0)
        .and_then(|p| {
            plan_savings(
                summary.total_expense,
                p,
                &summary.top_categories,
                settings.plan_categories,
            )
        });
    let tail = match plan {
        Some(plan) => ReportTail::Plan(plan),
        None if asks_for_reduction(message) => ReportTail::PercentHint,
        None => ReportTail::Nothing,
    };

    tracing::info!(
        days,
        entries = summary.entry_count,
        total_expense = summary.total_expense,
        "analytics report built"
    );
    Some(build_report(&summary, trend.as_ref(), &tail, &settings.currency))
}
