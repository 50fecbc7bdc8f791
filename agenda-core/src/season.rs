//! The four-season agenda model and its static skeleton.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Month labels, indexed by `month0` (January is 0).
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Number of seasons in every agenda.
pub const SEASON_COUNT: usize = 4;

struct SeasonTemplate {
    name: &'static str,
    description: &'static str,
    color: &'static str,
    /// Calendar months (1-12) in display order.
    months: [u32; 3],
}

const SEASON_TEMPLATES: [SeasonTemplate; SEASON_COUNT] = [
    SeasonTemplate {
        name: "CULTIVO",
        description: "Tempo de semear e preparar o terreno.",
        color: "green",
        months: [2, 3, 4],
    },
    SeasonTemplate {
        name: "CUIDADO",
        description: "Tempo de zelar e fortalecer as raízes.",
        color: "blue",
        months: [5, 6, 7],
    },
    SeasonTemplate {
        name: "CRESCIMENTO",
        description: "Tempo de expansão e colheita.",
        color: "yellow",
        months: [8, 9, 10],
    },
    SeasonTemplate {
        name: "CELEBRAÇÃO",
        description: "Tempo de gratidão e festa.",
        color: "red",
        months: [11, 12, 1],
    },
];

/// What kind of occasion an event is. Derived from the title, never supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Holiday,
    Church,
    Special,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EventKind::Holiday => "holiday",
            EventKind::Church => "church",
            EventKind::Special => "special",
        };
        f.write_str(label)
    }
}

/// A normalized agenda entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// `"DD"` or `"DD-DD"` for multi-day events.
    pub day: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

impl Event {
    /// Numeric value of the day before any `-`. Used for ordering.
    pub fn leading_day(&self) -> u32 {
        self.day
            .split('-')
            .next()
            .and_then(|d| d.trim().parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthData {
    /// Display label, e.g. "Março" or "Janeiro 2027".
    pub name: String,
    /// Calendar month, 1-12.
    pub month: u32,
    pub year: i32,
    pub events: Vec<Event>,
}

impl MonthData {
    /// Whether this slot is labelled with `month_name`, ignoring any
    /// trailing year annotation ("Janeiro 2027" matches "Janeiro").
    pub fn matches_month_name(&self, month_name: &str) -> bool {
        self.name.split_whitespace().next() == Some(month_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub name: String,
    pub description: String,
    /// Presentation hint (a terminal color name).
    pub color: String,
    pub months: [MonthData; 3],
}

/// Four seasons covering February of `base_year` through January of the
/// following year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    pub base_year: i32,
    pub seasons: [Season; SEASON_COUNT],
}

impl Agenda {
    /// A fresh, empty agenda built from the static template.
    ///
    /// Every call returns an independent value, so event lists never carry
    /// over from one load to the next.
    pub fn skeleton(base_year: i32) -> Self {
        let seasons = SEASON_TEMPLATES.each_ref().map(|template| Season {
            name: template.name.to_string(),
            description: template.description.to_string(),
            color: template.color.to_string(),
            months: template.months.map(|month| month_slot(base_year, month)),
        });

        Agenda { base_year, seasons }
    }

    /// Which season a calendar date belongs to, if it is inside the window.
    ///
    /// January only belongs to the agenda in the year after `base_year`;
    /// January of `base_year` itself precedes the first season.
    pub fn season_index(&self, date: NaiveDate) -> Option<usize> {
        season_index(self.base_year, date)
    }

    /// The month slot a date falls into.
    pub fn month_for_mut(&mut self, date: NaiveDate) -> Option<&mut MonthData> {
        let season = self.season_index(date)?;
        let month_name = MONTH_NAMES[date.month0() as usize];
        self.seasons[season]
            .months
            .iter_mut()
            .find(|m| m.matches_month_name(month_name) && m.year == date.year())
    }

    pub fn months(&self) -> impl Iterator<Item = &MonthData> {
        self.seasons.iter().flat_map(|s| s.months.iter())
    }

    pub fn event_count(&self) -> usize {
        self.months().map(|m| m.events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.event_count() == 0
    }
}

/// Season bucketing by month of year, with the January wrap-around.
pub fn season_index(base_year: i32, date: NaiveDate) -> Option<usize> {
    let month = date.month();

    if date.year() == base_year {
        match month {
            2..=4 => Some(0),
            5..=7 => Some(1),
            8..=10 => Some(2),
            11 | 12 => Some(3),
            _ => None,
        }
    } else if Some(date.year()) == base_year.checked_add(1) && month == 1 {
        Some(3)
    } else {
        None
    }
}

fn month_slot(base_year: i32, month: u32) -> MonthData {
    let label = MONTH_NAMES[(month - 1) as usize];

    // January closes the agenda, so it belongs to the next calendar year.
    let (name, year) = if month == 1 {
        let wrap_year = base_year.saturating_add(1);
        (format!("{} {}", label, wrap_year), wrap_year)
    } else {
        (label.to_string(), base_year)
    };

    MonthData {
        name,
        month,
        year,
        events: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_skeleton_layout() {
        let agenda = Agenda::skeleton(2026);

        let names: Vec<&str> = agenda.seasons.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["CULTIVO", "CUIDADO", "CRESCIMENTO", "CELEBRAÇÃO"]);

        let months: Vec<&str> = agenda.months().map(|m| m.name.as_str()).collect();
        assert_eq!(
            months,
            [
                "Fevereiro",
                "Março",
                "Abril",
                "Maio",
                "Junho",
                "Julho",
                "Agosto",
                "Setembro",
                "Outubro",
                "Novembro",
                "Dezembro",
                "Janeiro 2027",
            ]
        );
        assert!(agenda.is_empty());
    }

    #[test]
    fn test_skeletons_do_not_share_event_lists() {
        let mut first = Agenda::skeleton(2026);
        first.seasons[0].months[0].events.push(Event {
            day: "01".into(),
            title: "Retorno Trilhar".into(),
            kind: EventKind::Church,
        });

        let second = Agenda::skeleton(2026);
        assert!(second.is_empty());
        assert_eq!(first.event_count(), 1);
    }

    #[test]
    fn test_season_index_boundaries() {
        assert_eq!(season_index(2026, date(2026, 1, 31)), None);
        assert_eq!(season_index(2026, date(2026, 2, 1)), Some(0));
        assert_eq!(season_index(2026, date(2026, 4, 30)), Some(0));
        assert_eq!(season_index(2026, date(2026, 5, 1)), Some(1));
        assert_eq!(season_index(2026, date(2026, 10, 31)), Some(2));
        assert_eq!(season_index(2026, date(2026, 12, 31)), Some(3));
        assert_eq!(season_index(2026, date(2027, 1, 1)), Some(3));
        assert_eq!(season_index(2026, date(2027, 2, 1)), None);
        assert_eq!(season_index(2026, date(2025, 11, 1)), None);
    }

    #[test]
    fn test_month_lookup_tolerates_year_suffix() {
        let mut agenda = Agenda::skeleton(2026);
        let january = agenda.month_for_mut(date(2027, 1, 1)).unwrap();
        assert_eq!(january.name, "Janeiro 2027");
        assert!(january.matches_month_name("Janeiro"));
    }

    #[test]
    fn test_leading_day() {
        let range = Event {
            day: "31-02".into(),
            title: "Face a Face".into(),
            kind: EventKind::Special,
        };
        assert_eq!(range.leading_day(), 31);
    }

    #[test]
    fn test_extreme_base_year_does_not_overflow() {
        let agenda = Agenda::skeleton(i32::MAX);
        assert_eq!(agenda.seasons[3].months[2].year, i32::MAX);
        assert_eq!(season_index(i32::MAX, date(2026, 3, 1)), None);
    }

    #[test]
    fn test_event_kind_serializes_lowercase() {
        let json = serde_json::to_string(&EventKind::Holiday).unwrap();
        assert_eq!(json, "\"holiday\"");
    }
}
