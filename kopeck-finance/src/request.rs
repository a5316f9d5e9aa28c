//! Recognize analytics questions and the window length they ask about.

use regex::Regex;
use std::sync::LazyLock;

const ANALYTICS_STEMS: &[&str] = &[
    "аналитик",
    "статистик",
    "сколько я потрат",
    "сколько потрат",
    "траты",
    "затрат",
    "расход",
    "где сэконом",
    "эконом",
    "сократ",
    "уменьш",
    "сниз",
];

/// Stems that ask for a spending cut
pub const REDUCTION_STEMS: &[&str] = &["сократ", "эконом", "уменьш", "сниз"];

pub const MAX_WINDOW_DAYS: i64 = 366;

static DAYS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?P<n>\d{1,3})\s*(?:дн|дня|дней)\b")
        .map_err(|e| tracing::error!(error = %e, "days pattern failed to compile"))
        .ok()
});

pub fn is_analytics_request(message: &str) -> bool {
    let message = message.to_lowercase();
    ANALYTICS_STEMS.iter().any(|s| message.contains(s))
}

pub fn asks_for_reduction(message: &str) -> bool {
    let message = message.to_lowercase();
    REDUCTION_STEMS.iter().any(|s| message.contains(s))
}

/// Window length named in `message`.
///
/// An explicit "N дней" outside `1..=366` counts as no request at all, so the
/// caller's default applies.
pub fn extract_days(message: &str) -> Option<i64> {
    let message = message.to_lowercase();
    if let Some(caps) = DAYS.as_ref().and_then(|re| re.captures(&message)) {
        return caps
            .name("n")
            .and_then(|n| n.as_str().parse::<i64>().ok())
            .filter(|n| (1..=MAX_WINDOW_DAYS).contains(n));
    }
    if message.contains("за неделю") || message.contains("за 7 дней") {
        return Some(7);
    }
    if message.contains("за месяц") || message.contains("за 30 дней") {
        return Some(30);
    }
    None
}
