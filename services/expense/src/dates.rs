//! Parsing for client-supplied dates
//!
//! Clients send either a full RFC 3339 timestamp or a bare calendar date
//! (`YYYY-MM-DD`). A bare date means midnight UTC, except when it closes a
//! range, where it covers the whole day.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, de};

const CALENDAR_DATE: &str = "%Y-%m-%d";

/// Parse a timestamp, treating a bare date as the start of that day
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    parse_with(input, NaiveTime::MIN)
}

/// Parse the closing bound of a range, treating a bare date as the end of that day
pub fn parse_range_end(input: &str) -> Option<DateTime<Utc>> {
    let end_of_day = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)?;
    parse_with(input, end_of_day)
}

fn parse_with(input: &str, time_of_day: NaiveTime) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, CALENDAR_DATE)
        .ok()
        .map(|date| date.and_time(time_of_day).and_utc())
}

/// Serde helper for optional request dates
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    raw.map(|value| {
        parse_timestamp(&value).ok_or_else(|| de::Error::custom(format!("invalid date `{value}`")))
    })
    .transpose()
}
