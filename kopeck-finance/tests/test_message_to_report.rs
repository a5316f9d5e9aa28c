use chrono::NaiveDate;
use kopeck_core::TxnType;
use kopeck_finance::{EngineSettings, extract_transactions, fallback_reply, try_answer};
use kopeck_ingest::{RawAmount, RawRecord, load_records, parse_records};
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("history.csv")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 13).unwrap()
}

#[test]
fn test_fixture_loads_and_filters() {
    let raw = load_records(fixture()).unwrap();
    assert_eq!(raw.len(), 10);

    // bad date and unknown type are dropped; the empty amount parses as 0
    let entries = parse_records(&raw);
    assert_eq!(entries.len(), 8);
    assert!(entries.iter().any(|e| e.amount == 1800.4));
}

#[test]
fn test_weekly_report_from_fixture() {
    let raw = load_records(fixture()).unwrap();
    let text = try_answer("Сколько я потратил за неделю?", &raw, today(), &EngineSettings::default())
        .unwrap();

    // 07.03..13.03: 2500 + 1800.4 + 900 + 450
    assert!(text.starts_with("Аналитика затрат за 7 дней (07.03.2026–13.03.2026):"));
    assert!(text.contains("- Расходы: 5 650 RUB"));
    assert!(text.contains("- Доходы: 85 000 RUB"));
    // 28.02..06.03: 1200 + 700
    assert!(text.contains("расходы выросли на 3 750 RUB"));
    assert!(text.contains("- Food: 2 950 RUB"));
    assert!(text.contains("- 09.03: Food — Ресторан — 2 500 RUB"));
}

/// Messages extracted today feed tomorrow's analytics.
#[test]
fn test_extracted_transactions_feed_analytics() {
    let settings = EngineSettings::default();
    let messages = [
        "Купил хлеб за 50 рублей и молоко за 80 рублей",
        "Заплатил за бензин 2500 рублей",
        "Получил зарплату 85000 рублей",
    ];

    let mut records: Vec<RawRecord> = Vec::new();
    for m in messages {
        let result = extract_transactions(m, None, today(), &settings);
        for t in result.transactions {
            records.push(RawRecord {
                date: Some(t.date.to_string()),
                amount: t.amount.map(RawAmount::Number),
                category: Some(t.category.label().to_string()),
                kind: Some(t.kind.label().to_string()),
                title: Some(t.title.clone()),
            });
        }
    }
    assert_eq!(records.len(), 4);
    assert_eq!(
        records.iter().filter(|r| r.kind.as_deref() == Some(TxnType::Income.label())).count(),
        1
    );

    let reply = fallback_reply("Покажи статистику и где сэкономить на 20%", &records, today(), &settings);
    assert!(reply.contains("- Расходы: 2 630 RUB"));
    assert!(reply.contains("- Transport: 2 500 RUB"));
    assert!(reply.contains("План экономии (сократить расходы на 20.0%):"));
    assert!(reply.contains("- Экономия: 526 RUB"));
}
