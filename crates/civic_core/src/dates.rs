use std::cmp::Ordering;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Parses an ISO-8601 date or date-time into an instant.
///
/// Accepts RFC 3339 (`2021-08-03T09:00:00Z`, `2021-08-03T09:00:00-03:00`),
/// a date-time without offset (read as UTC) and a plain date (UTC midnight).
pub fn parse_iso_instant(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    if let Ok(instant) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(instant);
    }
    if let Ok(local) = PrimitiveDateTime::parse(
        value,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(local.assume_utc());
    }
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Chronological order when both sides parse, string order otherwise.
///
/// Parseable values always sort after unparseable ones.
pub fn compare_iso_dates(a: &str, b: &str) -> Ordering {
    match (parse_iso_instant(a), parse_iso_instant(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}
