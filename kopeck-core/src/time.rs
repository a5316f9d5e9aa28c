//! Time utilities: resolving "today" for a user's timezone.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Calendar date at instant `now` in the IANA timezone `tz` (e.g. "Europe/Moscow").
pub fn local_date(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Current calendar date in `tz`.
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    local_date(Utc::now(), tz)
}

/// Parse a user-supplied YYYY-MM-DD date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid date '{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_moscow_rolls_over_before_utc() {
        // 22:30 UTC is already 01:30 next day in Moscow (UTC+3)
        let now = Utc.with_ymd_and_hms(2026, 2, 20, 22, 30, 0).unwrap();
        let date = local_date(now, "Europe/Moscow").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 2, 21).unwrap());
    }

    #[test]
    fn test_invalid_timezone() {
        assert!(local_date(Utc::now(), "Mars/Olympus").is_err());
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2026-02-18").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 18).unwrap()
        );
        assert!(parse_iso_date("18.02.2026").is_err());
    }
}
