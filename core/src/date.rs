use crate::error::{Result, SearchError};
use crate::Timestamp;
use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime, UtcOffset};

/// Milliseconds since the Unix epoch, floored.
pub fn to_timestamp(dt: OffsetDateTime) -> Timestamp {
    dt.unix_timestamp_nanos().div_euclid(1_000_000) as Timestamp
}

/// Local midnight at the start of `date`.
///
/// Falls back to UTC when the local offset cannot be determined (for example in
/// a multi-threaded process on platforms where `time` refuses to query it).
pub fn local_midnight(date: Date) -> OffsetDateTime {
    midnight_with(date, |at| UtcOffset::local_offset_at(at).ok()).unwrap_or_else(|| {
        tracing::debug!(%date, "local offset unavailable, using UTC");
        date.midnight().assume_utc()
    })
}

/// Midnight of `date` under the zone described by `offset_at`.
///
/// The offset is looked up twice: first at UTC midnight, then at the instant
/// that guess lands on, so a DST change between the two is resolved on the
/// local side.
pub(crate) fn midnight_with(
    date: Date,
    offset_at: impl Fn(OffsetDateTime) -> Option<UtcOffset>,
) -> Option<OffsetDateTime> {
    let midnight = date.midnight();
    let guess = offset_at(midnight.assume_utc())?;
    let offset = offset_at(midnight.assume_offset(guess))?;
    Some(midnight.assume_offset(offset))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(text: &str) -> Result<Date> {
    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() != 3 {
        return Err(SearchError::date(text, format!("expected 3 segments, found {}", parts.len())));
    }
    if let Some(bad) = parts.iter().find(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return Err(SearchError::date(text, format!("segment {bad:?} is not numeric")));
    }
    let year: i32 = parts[0].parse().map_err(|_| SearchError::date(text, "year out of range"))?;
    let month: u8 = parts[1].parse().map_err(|_| SearchError::date(text, "month out of range"))?;
    let day: u8 = parts[2].parse().map_err(|_| SearchError::date(text, "day out of range"))?;
    let month = Month::try_from(month).map_err(|_| SearchError::date(text, "month out of range"))?;
    Date::from_calendar_date(year, month, day).map_err(|e| SearchError::date(text, e.to_string()))
}

/// Timestamp of local midnight on the given `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Result<Timestamp> {
    Ok(to_timestamp(local_midnight(parse_calendar_date(text)?)))
}

/// Inclusive upper bound covering the whole of the given day: one millisecond
/// before the following local midnight. `None` when the day is the last
/// representable one, which leaves the range open above.
pub fn parse_end_date(text: &str) -> Result<Option<Timestamp>> {
    let date = parse_calendar_date(text)?;
    Ok(date.next_day().map(|next| to_timestamp(local_midnight(next)) - 1))
}

/// Inclusive `[start, end]` bounds on publication time; `None` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl DateRange {
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        Self { start, end }
    }

    /// Build from `YYYY-MM-DD` strings, widening the end bound to the end of its day.
    pub fn from_dates(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = start.map(parse_date).transpose()?;
        let end = end.map(parse_end_date).transpose()?.flatten();
        Ok(Self { start, end })
    }

    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start.map_or(true, |s| ts >= s) && self.end.map_or(true, |e| ts <= e)
    }
}
