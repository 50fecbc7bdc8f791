//! The church's published 2026 agenda, bundled with the binary.

use crate::event::RawEvent;
use crate::ics::parse_events;

/// Base year the bundled agenda was published for.
pub const BUILTIN_BASE_YEAR: i32 = 2026;

const AGENDA_2026_ICS: &str = include_str!("../data/agenda-2026.ics");

/// Events of the bundled agenda. Kinds come from each entry's
/// `CATEGORIES`, not from title keywords.
pub fn builtin_events() -> Vec<RawEvent> {
    parse_events(AGENDA_2026_ICS)
}
