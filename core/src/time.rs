use chrono::{Datelike, Duration, Local, NaiveDate};
use anyhow::{anyhow, Result};

/// Parses a due date relative to the local calendar day.
pub fn parse_due_date(input: &str) -> Result<NaiveDate> {
    parse_due_date_from(input, Local::now().date_naive())
}

/// Accepts `today`/`tod`, `tomorrow`/`tom`, `eow` (coming Sunday), `eom`,
/// `+Nd`, `+Nw` and `YYYY-MM-DD`.
pub fn parse_due_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        "eow" => {
            let days_to_sunday = (7 - today.weekday().num_days_from_sunday() as i64) % 7;
            return Ok(today + Duration::days(days_to_sunday));
        }
        "eom" => return end_of_month(today),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('+') {
        return parse_relative(rest, today);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}

fn parse_relative(rest: &str, today: NaiveDate) -> Result<NaiveDate> {
    let unit = rest
        .chars()
        .last()
        .ok_or_else(|| anyhow!("Invalid relative format"))?;
    let num_str = &rest[..rest.len() - unit.len_utf8()];
    let count: i64 = num_str.parse().map_err(|_| anyhow!("Invalid relative format"))?;

    let offset = match unit.to_ascii_lowercase() {
        'd' => Duration::try_days(count),
        'w' => Duration::try_weeks(count),
        _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
    };
    offset
        .and_then(|d| today.checked_add_signed(d))
        .ok_or_else(|| anyhow!("Relative date out of range: +{}", rest))
}

fn end_of_month(today: NaiveDate) -> Result<NaiveDate> {
    let first_of_next = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    first_of_next
        .map(|d| d - Duration::days(1))
        .ok_or_else(|| anyhow!("Date out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_keywords() {
        // 2026-10-21 is a Wednesday
        let today = day(2026, 10, 21);
        assert_eq!(parse_due_date_from("today", today).unwrap(), today);
        assert_eq!(parse_due_date_from("TOM", today).unwrap(), day(2026, 10, 22));
        assert_eq!(parse_due_date_from("eow", today).unwrap(), day(2026, 10, 25));
        assert_eq!(parse_due_date_from("eom", today).unwrap(), day(2026, 10, 31));
        assert_eq!(parse_due_date_from("eom", day(2026, 12, 5)).unwrap(), day(2026, 12, 31));
    }

    #[test]
    fn test_eow_on_sunday_is_same_day() {
        let sunday = day(2026, 10, 25);
        assert_eq!(parse_due_date_from("eow", sunday).unwrap(), sunday);
    }

    #[test]
    fn test_relative() {
        let today = day(2026, 2, 26);
        assert_eq!(parse_due_date_from("+3d", today).unwrap(), day(2026, 3, 1));
        assert_eq!(parse_due_date_from("+2w", today).unwrap(), day(2026, 3, 12));
        assert!(parse_due_date_from("+xd", today).is_err());
        assert!(parse_due_date_from("+3y", today).is_err());
        assert!(parse_due_date_from("+", today).is_err());
    }

    #[test]
    fn test_relative_overflow_is_an_error() {
        let today = day(2026, 1, 1);
        assert!(parse_due_date_from("+99999999999d", today).is_err());
        assert!(parse_due_date_from("+9223372036854775807w", today).is_err());
        assert!(parse_due_date_from("+-99999999999d", today).is_err());
    }

    #[test]
    fn test_iso_and_garbage() {
        let today = day(2026, 1, 1);
        assert_eq!(parse_due_date_from("2026-05-17", today).unwrap(), day(2026, 5, 17));
        assert!(parse_due_date_from("someday", today).is_err());
        assert!(parse_due_date_from("  ", today).is_err());
    }
}
