//! Source-neutral raw event types.
//!
//! Sources (the Google Calendar fetch, the ICS importer) convert whatever
//! they read into [`RawEvent`]s. The normalizer works exclusively with these
//! types, so it never needs to know where an entry came from.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::season::EventKind;

/// A start or end marker of a calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    /// Calendar date without a time of day (all-day semantics).
    Date(NaiveDate),
    /// Date-time carrying a UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// Date-time without any zone information (ICS "floating" time).
    Floating(NaiveDateTime),
}

impl EventTime {
    /// The calendar day this marker falls on.
    ///
    /// Date-only values are returned as-is and never pass through a
    /// timezone conversion. Offset date-times are converted into
    /// `display_tz` when given, otherwise into the machine's local zone
    /// (a `...Z` stamp at 00:30 UTC is still the previous evening in Brazil).
    pub fn calendar_date(&self, display_tz: Option<Tz>) -> NaiveDate {
        match self {
            EventTime::Date(date) => *date,
            EventTime::DateTime(dt) => match display_tz {
                Some(tz) => dt.with_timezone(&tz).date_naive(),
                None => dt.with_timezone(&Local).date_naive(),
            },
            EventTime::Floating(dt) => dt.date(),
        }
    }

    /// The last calendar day covered when this marker ends an event.
    ///
    /// All-day ends are exclusive (an event on the 14th through the 17th
    /// ends on the 18th), so one day is taken off. Timed ends are inclusive.
    pub fn inclusive_end_date(&self, display_tz: Option<Tz>) -> Option<NaiveDate> {
        match self {
            EventTime::Date(date) => date.pred_opt(),
            _ => Some(self.calendar_date(display_tz)),
        }
    }
}

/// A calendar entry as delivered by a source, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub summary: Option<String>,
    /// `None` when the source had no start or it could not be parsed.
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    /// Kind stated by the source itself. When absent the title decides.
    #[serde(default)]
    pub kind: Option<EventKind>,
}

impl RawEvent {
    pub fn new(summary: impl Into<String>, start: EventTime) -> Self {
        RawEvent {
            summary: Some(summary.into()),
            start: Some(start),
            end: None,
            kind: None,
        }
    }

    pub fn ending(mut self, end: EventTime) -> Self {
        self.end = Some(end);
        self
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date_only(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse an ISO-8601 date-time. Values with an offset keep it; values
/// without one come back as floating times.
pub fn parse_date_time(s: &str) -> Option<EventTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(EventTime::DateTime(dt));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(EventTime::Floating)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_only_ignores_display_timezone() {
        let start = EventTime::Date(parse_date_only("2026-02-01").unwrap());
        let los_angeles: Tz = "America/Los_Angeles".parse().unwrap();

        assert_eq!(start.calendar_date(Some(los_angeles)), date(2026, 2, 1));
        assert_eq!(start.calendar_date(None), date(2026, 2, 1));
    }

    #[test]
    fn test_offset_date_time_defaults_to_local_zone() {
        let start = parse_date_time("2026-03-20T23:30:00-03:00").unwrap();
        let EventTime::DateTime(dt) = start else {
            panic!("Expected an offset date-time");
        };
        assert_eq!(
            EventTime::DateTime(dt).calendar_date(None),
            dt.with_timezone(&Local).date_naive()
        );
    }

    #[test]
    fn test_utc_stamp_near_midnight_is_previous_local_day() {
        let start = parse_date_time("2026-05-01T00:30:00Z").unwrap();
        let araguaina: Tz = "America/Araguaina".parse().unwrap();
        assert_eq!(start.calendar_date(Some(araguaina)), date(2026, 4, 30));
    }

    #[test]
    fn test_offset_date_time_converted_into_display_timezone() {
        let start = parse_date_time("2026-03-20T23:30:00-03:00").unwrap();
        let utc: Tz = "UTC".parse().unwrap();
        assert_eq!(start.calendar_date(Some(utc)), date(2026, 3, 21));
    }

    #[test]
    fn test_date_time_without_offset_is_floating() {
        let parsed = parse_date_time("2026-03-20T09:00:00").unwrap();
        assert!(matches!(parsed, EventTime::Floating(_)));
    }

    #[test]
    fn test_all_day_end_is_exclusive_across_year_boundary() {
        let end = EventTime::Date(date(2027, 1, 1));
        assert_eq!(end.inclusive_end_date(None), Some(date(2026, 12, 31)));
    }

    #[test]
    fn test_timed_end_is_inclusive() {
        let end = parse_date_time("2026-03-22T18:00:00-03:00").unwrap();
        assert_eq!(end.inclusive_end_date(None), Some(date(2026, 3, 22)));
    }

    #[test]
    fn test_malformed_dates_rejected() {
        assert!(parse_date_only("2026-13-01").is_none());
        assert!(parse_date_only("amanhã").is_none());
        assert!(parse_date_time("").is_none());
    }
}
