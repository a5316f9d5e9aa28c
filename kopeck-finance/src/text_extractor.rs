//! Scan free text for money amounts.
//!
//! Patterns are tried in priority order over the whole message. An occurrence
//! belongs to the first pattern that matched it; later patterns overlapping an
//! accepted span are not counted again.

use regex::Regex;
use std::sync::LazyLock;

/// Number with optional space-grouped thousands and decimal part: "85000", "10 000", "1,5"
const NUM: &str = r"(?P<num>\d{1,3}(?:[ \x{A0}]\d{3})+(?:[.,]\d+)?|\d+(?:[.,]\d+)?)";

/// What may precede a number: start of text, or a non-word char that is not the
/// separator of a preceding number ("12.03 500" must not read "03 500").
const LEAD: &str = r"(?:^|[^\w.,]|\D[.,])";

/// Ruble forms: "руб", "руб.", "рубль", "рублей"; not "рубашка"
const RUB: &str = r"руб(?:л[а-яё]*|\b)\.?";

/// Optional trailing currency word after a multiplier
fn currency_tail() -> String {
    format!(r"(?:\s*(?:{RUB}|р\.|₽))?")
}

fn million_source() -> String {
    format!(r"(?i){LEAD}(?P<amt>{NUM}\s*(?:млн|миллион(?:ов|а)?)\.?{})", currency_tail())
}

fn thousand_source() -> String {
    format!(r"(?i){LEAD}(?P<amt>{NUM}\s*(?:тысяч[аи]?|тыс\.?){})", currency_tail())
}

fn currency_word_source() -> String {
    format!(r"(?i){LEAD}(?P<amt>{NUM}\s*(?:{RUB}|р\b\.?|₽|rub\b))")
}

fn currency_symbol_source() -> String {
    format!(r"(?i)(?P<amt>(?:₽|\$|€)\s*{NUM})")
}

/// One entry of the prioritized amount-pattern table
#[derive(Debug, Clone, Copy)]
pub struct AmountPattern {
    pub name: &'static str,
    pub multiplier: f64,
    /// Regex source; the `amt` group is the accepted span, `num` the number
    pub source: fn() -> String,
}

/// Pattern table in priority order. Behavior depends on this order.
pub const AMOUNT_PATTERNS: &[AmountPattern] = &[
    AmountPattern { name: "million", multiplier: 1_000_000.0, source: million_source },
    AmountPattern { name: "thousand", multiplier: 1_000.0, source: thousand_source },
    AmountPattern { name: "currency_word", multiplier: 1.0, source: currency_word_source },
    AmountPattern { name: "currency_symbol", multiplier: 1.0, source: currency_symbol_source },
];

struct CompiledPattern {
    pattern: AmountPattern,
    regex: Regex,
}

static COMPILED: LazyLock<Vec<CompiledPattern>> = LazyLock::new(|| {
    AMOUNT_PATTERNS
        .iter()
        .filter_map(|p| match Regex::new(&(p.source)()) {
            Ok(regex) => Some(CompiledPattern { pattern: *p, regex }),
            Err(e) => {
                tracing::error!(pattern = p.name, error = %e, "amount pattern failed to compile");
                None
            }
        })
        .collect()
});

/// One accepted amount occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct AmountMatch {
    /// Byte span of the whole match in the message
    pub start: usize,
    pub end: usize,
    /// Value after the unit multiplier
    pub value: f64,
    pub pattern: &'static str,
    /// Another pattern also matched an overlapping span
    pub ambiguous: bool,
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// All amount occurrences in `text`, ordered by position.
pub fn scan_amounts(text: &str) -> Vec<AmountMatch> {
    let mut accepted: Vec<AmountMatch> = Vec::new();

    for compiled in COMPILED.iter() {
        for caps in compiled.regex.captures_iter(text) {
            let Some(span) = caps.name("amt") else { continue };
            let (start, end) = (span.start(), span.end());

            if let Some(prior) = accepted
                .iter_mut()
                .find(|m| start < m.end && m.start < end)
            {
                prior.ambiguous = true;
                continue;
            }

            let raw = caps.name("num").map(|m| m.as_str()).unwrap_or("");
            let Some(number) = parse_number(raw) else {
                tracing::debug!(raw, pattern = compiled.pattern.name, "skipping unparseable amount");
                continue;
            };

            accepted.push(AmountMatch {
                start,
                end,
                value: number * compiled.pattern.multiplier,
                pattern: compiled.pattern.name,
                ambiguous: false,
            });
        }
    }

    accepted.sort_by_key(|m| m.start);
    accepted
}

/// Byte range of the text within `radius` characters of `[start, end)`.
pub fn context_bounds(text: &str, start: usize, end: usize, radius: usize) -> (usize, usize) {
    let lo = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(i, _)| i);
    let hi = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| end + i);
    (lo, hi)
}

/// The substring within `radius` characters on both sides of `[start, end)`.
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let (lo, hi) = context_bounds(text, start, end, radius);
    &text[lo..hi]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(text: &str) -> Vec<f64> {
        scan_amounts(text).iter().map(|m| m.value).collect()
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(COMPILED.len(), AMOUNT_PATTERNS.len());
    }

    #[test]
    fn test_currency_words() {
        assert_eq!(values("Купил хлеб за 50 рублей и молоко за 80 рублей"), vec![50.0, 80.0]);
        assert_eq!(values("такси 350 руб."), vec![350.0]);
        assert_eq!(values("кофе 200р"), vec![200.0]);
        assert_eq!(values("обед 450 ₽"), vec![450.0]);
    }

    #[test]
    fn test_multipliers_applied() {
        assert_eq!(values("Потратил 5 тысяч рублей"), vec![5000.0]);
        assert_eq!(values("аренда 1,5 тыс. руб"), vec![1500.0]);
        assert_eq!(values("Получил 2 млн рублей"), vec![2_000_000.0]);
        assert_eq!(values("квартира за 3 миллиона"), vec![3_000_000.0]);
    }

    #[test]
    fn test_grouped_thousands() {
        assert_eq!(values("Получил зарплату 85 000 рублей"), vec![85000.0]);
        assert_eq!(values("Получил зарплату 85000 рублей"), vec![85000.0]);
    }

    #[test]
    fn test_symbol_prefix() {
        assert_eq!(values("подписка $10 в месяц"), vec![10.0]);
    }

    #[test]
    fn test_no_double_counting() {
        let found = scan_amounts("перевод ₽500 рублей");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, 500.0);
        assert!(found[0].ambiguous);
        assert_eq!(found[0].pattern, "currency_word");
    }

    #[test]
    fn test_only_ruble_forms_count() {
        assert!(scan_amounts("купил 2 рубашки").is_empty());
        assert_eq!(values("2 рубашки за 3000 рублей"), vec![3000.0]);
        assert_eq!(values("сдача 1 рубль"), vec![1.0]);
    }

    #[test]
    fn test_number_after_date_not_grouped() {
        let found = scan_amounts("12.03 500 рублей на такси");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, 500.0);
        assert_eq!(&"12.03 500 рублей на такси"[found[0].start..found[0].end], "500 рублей");
    }

    #[test]
    fn test_plain_numbers_ignored() {
        assert!(scan_amounts("встретимся в 5 часов, 3 раза").is_empty());
    }

    #[test]
    fn test_ordered_by_position() {
        let found = scan_amounts("100 рублей, потом 2 тысячи");
        assert_eq!(found.iter().map(|m| m.value).collect::<Vec<_>>(), vec![100.0, 2000.0]);
        assert_eq!(found[1].pattern, "thousand");
    }

    #[test]
    fn test_context_window_counts_characters() {
        let text = "абвгд 50 рублей еёжзи";
        let m = &scan_amounts(text)[0];
        assert_eq!(context_window(text, m.start, m.end, 3), "гд 50 рублей её");
        assert_eq!(context_window(text, m.start, m.end, 100), text);
        assert_eq!(context_window(text, m.start, m.end, 0), "50 рублей");
    }
}
