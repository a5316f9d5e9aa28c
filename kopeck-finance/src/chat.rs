//! Canned chat replies used when no language model is wired in.

use chrono::NaiveDate;
use kopeck_ingest::RawRecord;

use crate::report::try_answer;
use crate::settings::EngineSettings;

const GREETING_WORDS: &[&str] = &["привет", "здравствуй", "добрый день"];
const HELP_WORDS: &[&str] = &["что умеешь", "помощь", "help"];

pub const GREETING: &str = "Привет! Я твой финансовый помощник. Могу помочь с учётом расходов, анализом трат или ответить на вопросы о финансах. Чем могу помочь?";

pub const CAPABILITIES: &str = "Я могу помочь тебе с:
- Учётом доходов и расходов
- Анализом трат по категориям
- Прогнозом расходов
- Советами по экономии
- Ответами на финансовые вопросы
Просто напиши, что тебя интересует!";

pub const NO_MODEL: &str = "Для полноценной работы чата необходимо настроить AI интеграцию. Сейчас доступны только базовые функции.";

/// Reply to `message`: an analytics report when it asks for one and records
/// exist, otherwise a canned answer.
pub fn fallback_reply(
    message: &str,
    records: &[RawRecord],
    today: NaiveDate,
    settings: &EngineSettings,
) -> String {
    if let Some(report) = try_answer(message, records, today, settings) {
        return report;
    }

    let lower = message.to_lowercase();
    if GREETING_WORDS.iter().any(|w| lower.contains(w)) {
        GREETING.to_string()
    } else if HELP_WORDS.iter().any(|w| lower.contains(w)) {
        CAPABILITIES.to_string()
    } else {
        NO_MODEL.to_string()
    }
}
