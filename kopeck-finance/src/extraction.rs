//! Turn a free-text message into typed transactions.
//!
//! Pipeline per message: scan amounts -> cap candidates -> classify each context
//! window -> resolve title and date -> score confidence -> summarize.

use chrono::{Datelike, Duration, NaiveDate};
use kopeck_core::classifier::{self, EXPENSE_KEYWORDS, INCOME_KEYWORDS};
use kopeck_core::{Category, Transaction, TxnType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::money::fmt_money;
use crate::settings::EngineSettings;
use crate::text_extractor::{AmountMatch, context_bounds, scan_amounts};

pub const BASE_CONFIDENCE: f64 = 0.9;
/// Confidence of the amount-less placeholder
pub const PLACEHOLDER_CONFIDENCE: f64 = 0.3;
/// Below this a transaction gets a warning
pub const LOW_CONFIDENCE: f64 = 0.6;

const PENALTY_TYPE_DEFAULTED: f64 = 0.15;
const PENALTY_TYPE_FROM_CONTEXT: f64 = 0.1;
const PENALTY_CATEGORY_DEFAULTED: f64 = 0.1;
const PENALTY_CATEGORY_FROM_CONTEXT: f64 = 0.05;
const PENALTY_TITLE_DEFAULTED: f64 = 0.05;
const PENALTY_DATE_DEFAULTED: f64 = 0.05;
const PENALTY_AMBIGUOUS: f64 = 0.05;

/// Verbs whose following word names what was bought
const EXPENSE_VERBS: &[&str] = &["купил", "потратил", "заплатил", "оплатил", "заказал", "взял", "отдал"];

/// Income nouns and the title each one yields
const INCOME_TITLES: &[(&str, &str)] = &[
    ("зарплат", "Зарплата"),
    ("преми", "Премия"),
    ("аванс", "Аванс"),
    ("дивиденд", "Дивиденды"),
    ("фриланс", "Фриланс"),
    ("подработк", "Подработка"),
    ("кэшбэк", "Кэшбэк"),
    ("подар", "Подарок"),
    ("стипенди", "Стипендия"),
    ("пенси", "Пенсия"),
    ("гонорар", "Гонорар"),
    ("бонус", "Бонус"),
    ("возврат", "Возврат"),
];

const STOPWORDS: &[&str] = &[
    "за", "на", "в", "во", "для", "около", "примерно", "почти", "где-то", "себе", "сегодня",
    "вчера", "позавчера", "ещё", "еще", "по", "с", "и", "а", "у", "к", "от", "до", "из", "мне",
    "я", "это", "всего", "целых", "аж", "потом", "тоже", "также", "новый", "новую", "новые",
];

static EXPLICIT_DATE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b(?P<d>\d{1,2})\.(?P<m>\d{2})(?:\.(?P<y>\d{4}))?\b")
        .map_err(|e| tracing::error!(error = %e, "date pattern failed to compile"))
        .ok()
});

/// Extraction output, serialized field-for-field to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub transactions: Vec<Transaction>,
    pub extracted_info: ExtractedInfo,
    pub analysis: String,
    pub questions: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    pub total_income: f64,
    pub total_expense: f64,
    pub transactions_count: usize,
    pub date_range: DateRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

/// Where a classified field came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Window,
    Context,
    Default,
}

fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| !c.is_alphanumeric() && c != '-')
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_money_word(token: &str) -> bool {
    matches!(token, "р" | "руб")
        || ["рубл", "тыс", "млн", "миллион"]
            .iter()
            .any(|p| token.starts_with(p))
}

fn is_keyword(token: &str) -> bool {
    EXPENSE_KEYWORDS
        .iter()
        .chain(INCOME_KEYWORDS.iter())
        .any(|k| token.contains(k))
}

/// A token that can stand alone as an item label
fn is_label_word(token: &str) -> bool {
    token.chars().count() >= 3
        && token.chars().all(|c| c.is_alphabetic() || c == '-')
        && !STOPWORDS.contains(&token)
        && !is_money_word(token)
        && !is_keyword(token)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Expense title from the words around one amount.
///
/// "<item> за|на <amount>" names the item directly; otherwise the first label word
/// after the nearest expense verb is used.
fn expense_title(left: &[String], right: &[String]) -> Option<String> {
    if let [.., item, prep] = left {
        if (prep == "за" || prep == "на") && is_label_word(item) {
            return Some(capitalize(item));
        }
    }

    let is_verb = |t: &String| EXPENSE_VERBS.iter().any(|v| t.starts_with(v));
    let sequence: Vec<&String> = left.iter().chain(right.iter()).collect();
    let verb_at = left
        .iter()
        .rposition(is_verb)
        .or_else(|| right.iter().position(is_verb).map(|i| left.len() + i))?;

    sequence[verb_at + 1..]
        .iter()
        .find(|t| is_label_word(t))
        .map(|t| capitalize(t))
}

fn income_title(words: &[String]) -> Option<String> {
    words.iter().find_map(|t| {
        INCOME_TITLES
            .iter()
            .find(|(stem, _)| t.starts_with(stem))
            .map(|(_, title)| title.to_string())
    })
}

fn resolve_title(kind: TxnType, left: &str, right: &str, clipped_left: bool) -> Option<String> {
    let mut left = tokens(left);
    if clipped_left && !left.is_empty() {
        // partial word cut by the window edge
        left.remove(0);
    }
    let right = tokens(right);
    match kind {
        TxnType::Expense => expense_title(&left, &right),
        TxnType::Income => {
            let all: Vec<String> = left.into_iter().chain(right).collect();
            income_title(&all)
        }
    }
}

/// Date named in the message, if any. Spans in `skip` (amounts) are ignored.
pub fn resolve_date(message: &str, today: NaiveDate, skip: &[AmountMatch]) -> Option<NaiveDate> {
    if let Some(re) = EXPLICIT_DATE.as_ref() {
        for caps in re.captures_iter(message) {
            let Some(whole) = caps.get(0) else { continue };
            if skip.iter().any(|m| whole.start() < m.end && m.start < whole.end()) {
                continue;
            }
            let day = caps["d"].parse::<u32>().ok();
            let month = caps["m"].parse::<u32>().ok();
            let year = caps.name("y").and_then(|y| y.as_str().parse::<i32>().ok());
            let (Some(day), Some(month)) = (day, month) else { continue };

            let date = match year {
                Some(y) => NaiveDate::from_ymd_opt(y, month, day),
                None => NaiveDate::from_ymd_opt(today.year(), month, day).map(|d| {
                    if d > today {
                        NaiveDate::from_ymd_opt(today.year() - 1, month, day).unwrap_or(d)
                    } else {
                        d
                    }
                }),
            };
            if date.is_some() {
                return date;
            }
        }
    }

    let lower = message.to_lowercase();
    if lower.contains("позавчера") {
        Some(today - Duration::days(2))
    } else if lower.contains("вчера") {
        Some(today - Duration::days(1))
    } else if lower.contains("сегодня") {
        Some(today)
    } else {
        None
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

struct Candidate {
    txn: Transaction,
    type_source: Source,
}

fn build_candidate(
    message: &str,
    context: Option<&str>,
    m: &AmountMatch,
    date: Option<NaiveDate>,
    today: NaiveDate,
    settings: &EngineSettings,
) -> Candidate {
    let (lo, hi) = context_bounds(message, m.start, m.end, settings.context_radius);
    let window = &message[lo..hi];
    let found = classifier::classify(window);

    let (kind, type_source) = if found.type_found {
        (found.kind, Source::Window)
    } else if let Some(kind) = context.and_then(classifier::resolve_type) {
        (kind, Source::Context)
    } else {
        (found.kind, Source::Default)
    };

    let (category, category_source) = if found.category_found {
        (found.category, Source::Window)
    } else if let Some(category) = context.and_then(classifier::resolve_category) {
        (category, Source::Context)
    } else {
        (Category::Other, Source::Default)
    };

    let clipped_left = message[..lo]
        .chars()
        .next_back()
        .is_some_and(|c| !c.is_whitespace());
    let title = resolve_title(kind, &message[lo..m.start], &message[m.end..hi], clipped_left);

    let mut confidence = BASE_CONFIDENCE;
    confidence -= match type_source {
        Source::Window => 0.0,
        Source::Context => PENALTY_TYPE_FROM_CONTEXT,
        Source::Default => PENALTY_TYPE_DEFAULTED,
    };
    confidence -= match category_source {
        Source::Window => 0.0,
        Source::Context => PENALTY_CATEGORY_FROM_CONTEXT,
        Source::Default => PENALTY_CATEGORY_DEFAULTED,
    };
    if title.is_none() {
        confidence -= PENALTY_TITLE_DEFAULTED;
    }
    if date.is_none() {
        confidence -= PENALTY_DATE_DEFAULTED;
    }
    if m.ambiguous {
        confidence -= PENALTY_AMBIGUOUS;
    }

    Candidate {
        txn: Transaction {
            kind,
            amount: Some(m.value),
            category,
            title: title.unwrap_or_else(|| kind.default_title().to_string()),
            date: date.unwrap_or(today),
            confidence: round2(confidence.max(PLACEHOLDER_CONFIDENCE)),
        },
        type_source,
    }
}

/// The single amount-less transaction emitted when no amount was found.
fn placeholder(message: &str, context: Option<&str>, date: Option<NaiveDate>, today: NaiveDate) -> Transaction {
    let kind = classifier::resolve_type(message)
        .or_else(|| context.and_then(classifier::resolve_type))
        .unwrap_or(TxnType::Expense);
    let category = classifier::resolve_category(message)
        .or_else(|| context.and_then(classifier::resolve_category))
        .unwrap_or_default();
    let title = resolve_title(kind, message, "", false)
        .unwrap_or_else(|| kind.default_title().to_string());

    Transaction {
        kind,
        amount: None,
        category,
        title,
        date: date.unwrap_or(today),
        confidence: PLACEHOLDER_CONFIDENCE,
    }
}

fn summarize(transactions: &[Transaction]) -> ExtractedInfo {
    let total = |kind: TxnType| -> f64 {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(Transaction::amount_or_zero)
            .sum()
    };
    ExtractedInfo {
        total_income: total(TxnType::Income),
        total_expense: total(TxnType::Expense),
        transactions_count: transactions.len(),
        date_range: DateRange {
            earliest: transactions.iter().map(|t| t.date).min(),
            latest: transactions.iter().map(|t| t.date).max(),
        },
    }
}

/// Extract transactions from a message.
///
/// `today` stands in for any date the message does not state. Never fails: with no
/// amount in the text a single low-confidence placeholder is returned.
pub fn extract_transactions(
    message: &str,
    context: Option<&str>,
    today: NaiveDate,
    settings: &EngineSettings,
) -> ExtractionResult {
    let mut amounts = scan_amounts(message);
    let date = resolve_date(message, today, &amounts);

    let mut questions = Vec::new();
    let mut warnings = Vec::new();
    let cur = settings.currency.as_str();

    if amounts.is_empty() {
        let txn = placeholder(message, context, date, today);
        warnings.push("Не удалось найти сумму в сообщении.".to_string());
        questions.push(format!("Какая сумма у операции «{}»?", txn.title));
        let transactions = vec![txn];
        return ExtractionResult {
            extracted_info: summarize(&transactions),
            transactions,
            analysis: "Сумма не найдена: операция сохранена как черновик без суммы.".to_string(),
            questions,
            warnings,
        };
    }

    // a zero cap would leave nothing; use the default instead
    let cap = match settings.max_candidates {
        0 => EngineSettings::default().max_candidates,
        n => n,
    };
    if amounts.len() > cap {
        tracing::debug!(found = amounts.len(), kept = cap, "dropping excess amount occurrences");
        warnings.push(format!(
            "Найдено сумм: {}; учтены только первые {cap}.",
            amounts.len()
        ));
        amounts.truncate(cap);
    }

    let mut transactions = Vec::with_capacity(amounts.len());
    for m in &amounts {
        let candidate = build_candidate(message, context, m, date, today, settings);
        let txn = candidate.txn;

        if candidate.type_source == Source::Default {
            questions.push(format!(
                "Это доход или расход: «{}», {} {}?",
                txn.title,
                fmt_money(txn.amount_or_zero()),
                cur
            ));
        }
        if txn.confidence < LOW_CONFIDENCE {
            warnings.push(format!(
                "Низкая уверенность распознавания: «{}», {} {}.",
                txn.title,
                fmt_money(txn.amount_or_zero()),
                cur
            ));
        }
        transactions.push(txn);
    }

    let info = summarize(&transactions);
    let analysis = format!(
        "Распознано операций: {}. Расходы: {} {cur}, доходы: {} {cur}.",
        info.transactions_count,
        fmt_money(info.total_expense),
        fmt_money(info.total_income),
    );

    ExtractionResult {
        transactions,
        extracted_info: info,
        analysis,
        questions,
        warnings,
    }
}
