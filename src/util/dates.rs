//! Russian date labels for competition cards and registration records.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::macros::format_description;
use time::{Date, Month};

pub const INVALID_DATE: &str = "Неверная дата";

/// Parse the date part of `YYYY-MM-DD` or an RFC 3339 timestamp, as written
/// (no time-zone shift).
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    let head = raw.get(..10)?;
    if raw.len() > 10 && !raw[10..].starts_with(['T', 't', ' ']) {
        return None;
    }
    Date::parse(head, format_description!("[year]-[month]-[day]")).ok()
}

/// Genitive month name ("1 января").
#[must_use]
pub fn month_genitive(month: Month) -> &'static str {
    match month {
        Month::January => "января",
        Month::February => "февраля",
        Month::March => "марта",
        Month::April => "апреля",
        Month::May => "мая",
        Month::June => "июня",
        Month::July => "июля",
        Month::August => "августа",
        Month::September => "сентября",
        Month::October => "октября",
        Month::November => "ноября",
        Month::December => "декабря",
    }
}

/// `"1 мая - 3 июня"`. `None` if either date does not parse.
#[must_use]
pub fn format_date_range(start: &str, end: &str) -> Option<String> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    Some(format!(
        "{} {} - {} {}",
        start.day(),
        month_genitive(start.month()),
        end.day(),
        month_genitive(end.month())
    ))
}

/// `"1 мая 2024 года"`, or `INVALID_DATE`.
#[must_use]
pub fn format_reg_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => format!("{} {} {} года", date.day(), month_genitive(date.month()), date.year()),
        None => INVALID_DATE.to_owned(),
    }
}
