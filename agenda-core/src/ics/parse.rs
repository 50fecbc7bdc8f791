//! Line-oriented VEVENT scanner.

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use icalendar::parser::unfold;

use crate::event::{EventTime, RawEvent};
use crate::season::EventKind;

/// A VEVENT being read.
#[derive(Default)]
struct PendingEvent {
    summary: Option<String>,
    start: Option<EventTime>,
    end: Option<EventTime>,
    kind: Option<EventKind>,
    /// Depth of nested components (e.g. VALARM) whose properties we skip.
    nested: usize,
}

impl PendingEvent {
    /// Blocks without both a title and a parseable start are dropped.
    fn finish(self) -> Option<RawEvent> {
        let summary = self.summary.filter(|s| !s.trim().is_empty())?;
        let start = self.start?;
        Some(RawEvent {
            summary: Some(summary),
            start: Some(start),
            end: self.end,
            kind: self.kind,
        })
    }
}

/// One `NAME;PARAM=VALUE:value` content line.
struct ContentLine<'a> {
    name: &'a str,
    params: Vec<(&'a str, &'a str)>,
    value: &'a str,
}

impl<'a> ContentLine<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let colon = value_separator(line)?;
        let (head, value) = (&line[..colon], &line[colon + 1..]);

        let mut parts = head.split(';');
        let name = parts.next()?.trim();
        let params = parts
            .filter_map(|p| p.split_once('='))
            .map(|(k, v)| (k.trim(), v.trim().trim_matches('"')))
            .collect();

        Some(ContentLine { name, params, value })
    }

    fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    fn param(&self, key: &str) -> Option<&'a str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| *v)
    }
}

/// Position of the colon separating name/params from the value, skipping
/// colons inside quoted parameter values.
fn value_separator(line: &str) -> Option<usize> {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ':' if !quoted => return Some(i),
            _ => {}
        }
    }
    None
}

/// Parse every VEVENT in `content`. Lines outside a VEVENT are ignored.
pub fn parse_events(content: &str) -> Vec<RawEvent> {
    let unfolded = unfold(content);
    let mut events = Vec::new();
    let mut current: Option<PendingEvent> = None;

    for line in unfolded.split(['\r', '\n']) {
        let Some(line) = ContentLine::parse(line) else {
            continue;
        };

        if line.is("BEGIN") {
            if line.value.trim().eq_ignore_ascii_case("VEVENT") {
                current = Some(PendingEvent::default());
            } else if let Some(pending) = current.as_mut() {
                pending.nested += 1;
            }
            continue;
        }

        if line.is("END") {
            if line.value.trim().eq_ignore_ascii_case("VEVENT") {
                if let Some(event) = current.take().and_then(PendingEvent::finish) {
                    events.push(event);
                }
            } else if let Some(pending) = current.as_mut() {
                pending.nested = pending.nested.saturating_sub(1);
            }
            continue;
        }

        let Some(pending) = current.as_mut() else {
            continue;
        };
        if pending.nested > 0 {
            continue;
        }

        if line.is("SUMMARY") {
            pending.summary = Some(unescape_text(line.value));
        } else if line.is("DTSTART") {
            pending.start = parse_time(&line);
        } else if line.is("DTEND") {
            pending.end = parse_time(&line);
        } else if line.is("CATEGORIES") {
            pending.kind = pending.kind.or_else(|| category_kind(line.value));
        }
    }

    events
}

/// DTSTART/DTEND value → EventTime.
///
/// `YYYYMMDD` (or `VALUE=DATE`) is a calendar date and stays one.
/// `YYYYMMDDTHHMMSSZ` is UTC, a `TZID` parameter names the zone, and
/// anything else is floating.
fn parse_time(line: &ContentLine) -> Option<EventTime> {
    let value = line.value.trim();

    let is_date = line
        .param("VALUE")
        .is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
        || (value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()));

    if is_date {
        return NaiveDate::parse_from_str(value.get(..8)?, "%Y%m%d")
            .ok()
            .map(EventTime::Date);
    }

    if let Some(utc) = value.strip_suffix('Z') {
        return NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S")
            .ok()
            .map(|dt| EventTime::DateTime(dt.and_utc().fixed_offset()));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()?;

    let zoned = line
        .param("TZID")
        .and_then(|tzid| tzid.parse::<Tz>().ok())
        .and_then(|tz| tz.from_local_datetime(&naive).earliest())
        .map(|dt| EventTime::DateTime(dt.fixed_offset()));

    Some(zoned.unwrap_or(EventTime::Floating(naive)))
}

/// First category naming an agenda kind (`HOLIDAY`, `CHURCH`, `SPECIAL`).
/// Other categories are ignored.
fn category_kind(value: &str) -> Option<EventKind> {
    value
        .split(',')
        .find_map(|category| match category.trim().to_ascii_lowercase().as_str() {
            "holiday" => Some(EventKind::Holiday),
            "church" => Some(EventKind::Church),
            "special" => Some(EventKind::Special),
            _ => None,
        })
}

/// Undo RFC 5545 TEXT escaping.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out.trim().to_string()
}
