//! Import of calendar-export (.ics) files.
//!
//! Only the properties the agenda needs are read: `SUMMARY`, `DTSTART`
//! and `DTEND` of each `VEVENT` block.

mod parse;

use std::path::Path;

use tracing::info;

use crate::error::AgendaResult;
use crate::event::RawEvent;

pub use parse::parse_events;

/// Read and parse an .ics file.
pub fn read_events(path: &Path) -> AgendaResult<Vec<RawEvent>> {
    let content = std::fs::read_to_string(path)?;
    let events = parse_events(&content);

    info!(path = %path.display(), count = events.len(), "Imported calendar file");

    Ok(events)
}
