use chrono::{DateTime, NaiveDate, TimeZone};

/// This is the standard way of printing a moment in acwatch.
pub fn format_moment<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    moment.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Calendar date of a unix timestamp (seconds) as seen in the time zone `tz`.
/// Returns [None] when the timestamp is out of chrono's range.
pub fn date_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(tz).date_naive())
}

/// True when `timestamp` falls on the same calendar day as `now`, in `now`'s time zone.
/// Only the date matters: 23:59 yesterday and 00:01 today are different days.
pub fn is_same_day<Tz: TimeZone>(timestamp: i64, now: &DateTime<Tz>) -> bool {
    date_in(timestamp, &now.timezone()) == Some(now.date_naive())
}
