//! Raw calendar entries → four-season agenda.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::debug;

use crate::classify::Classifier;
use crate::config::AgendaConfig;
use crate::error::AgendaResult;
use crate::event::{EventTime, RawEvent};
use crate::season::{Agenda, Event};

pub const DEFAULT_BASE_YEAR: i32 = 2026;
pub const DEFAULT_TITLE: &str = "Evento";

/// Why a raw event did not make it into the agenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    MissingStart,
    OutsideWindow(NaiveDate),
    NoMonthSlot(NaiveDate),
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    base_year: i32,
    classifier: Classifier,
    display_tz: Option<Tz>,
    default_title: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new(DEFAULT_BASE_YEAR)
    }
}

impl Normalizer {
    pub fn new(base_year: i32) -> Self {
        Normalizer {
            base_year,
            classifier: Classifier::default(),
            display_tz: None,
            default_title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn from_config(config: &AgendaConfig) -> AgendaResult<Self> {
        Ok(Normalizer {
            base_year: config.base_year,
            classifier: Classifier::from_keywords(&config.keywords),
            display_tz: config.display_timezone()?,
            default_title: config.default_title.clone(),
        })
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_display_timezone(mut self, tz: Tz) -> Self {
        self.display_tz = Some(tz);
        self
    }

    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    pub fn base_year(&self) -> i32 {
        self.base_year
    }

    /// Build a fresh agenda from `raw`.
    ///
    /// Never fails: entries without a usable start, or outside the
    /// February–January window, are left out.
    pub fn normalize(&self, raw: &[RawEvent]) -> Agenda {
        let mut agenda = Agenda::skeleton(self.base_year);

        for item in raw {
            if let Err(skip) = self.place(&mut agenda, item) {
                debug!(summary = ?item.summary, reason = ?skip, "Skipping calendar entry");
            }
        }

        for month in agenda.seasons.iter_mut().flat_map(|s| s.months.iter_mut()) {
            month.events.sort_by_key(Event::leading_day);
        }

        agenda
    }

    fn place(&self, agenda: &mut Agenda, item: &RawEvent) -> Result<(), Skip> {
        let start = item.start.as_ref().ok_or(Skip::MissingStart)?;
        let start_date = start.calendar_date(self.display_tz);

        if agenda.season_index(start_date).is_none() {
            return Err(Skip::OutsideWindow(start_date));
        }

        let title = item
            .summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.default_title.as_str())
            .to_string();

        let event = Event {
            day: self.format_day(start_date, item.end.as_ref()),
            kind: item
                .kind
                .unwrap_or_else(|| self.classifier.classify(&title)),
            title,
        };

        let month = agenda
            .month_for_mut(start_date)
            .ok_or(Skip::NoMonthSlot(start_date))?;
        month.events.push(event);

        Ok(())
    }

    /// `"DD"`, or `"DD-DD"` when the inclusive end lands on a later day.
    fn format_day(&self, start: NaiveDate, end: Option<&EventTime>) -> String {
        let start_day = start.format("%d").to_string();

        match end.and_then(|e| e.inclusive_end_date(self.display_tz)) {
            Some(end) if end > start => format!("{}-{}", start_day, end.format("%d")),
            _ => start_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::KeywordRule;
    use crate::event::{parse_date_only, parse_date_time};
    use crate::season::EventKind;

    fn all_day(title: &str, start: &str) -> RawEvent {
        RawEvent::new(title, EventTime::Date(parse_date_only(start).unwrap()))
    }

    fn all_day_range(title: &str, start: &str, exclusive_end: &str) -> RawEvent {
        all_day(title, start).ending(EventTime::Date(parse_date_only(exclusive_end).unwrap()))
    }

    fn brazil() -> Normalizer {
        Normalizer::default().with_display_timezone("America/Sao_Paulo".parse().unwrap())
    }

    fn timed(title: &str, start: &str, end: &str) -> RawEvent {
        RawEvent {
            summary: Some(title.to_string()),
            start: parse_date_time(start),
            end: parse_date_time(end),
            kind: None,
        }
    }

    #[test]
    fn test_single_day_event_lands_in_one_slot() {
        let agenda = Normalizer::default().normalize(&[all_day("Vigília - Rede Atos", "2026-03-06")]);

        assert_eq!(agenda.event_count(), 1);
        let march = &agenda.seasons[0].months[1];
        assert_eq!(march.name, "Março");
        assert_eq!(
            march.events,
            vec![Event {
                day: "06".into(),
                title: "Vigília - Rede Atos".into(),
                kind: EventKind::Church,
            }]
        );
    }

    #[test]
    fn test_date_only_start_has_no_timezone_drift() {
        let normalizer = Normalizer::default()
            .with_display_timezone("America/Los_Angeles".parse().unwrap());
        let agenda = normalizer.normalize(&[all_day("Retorno Trilhar", "2026-02-01")]);

        let february = &agenda.seasons[0].months[0];
        assert_eq!(february.name, "Fevereiro");
        assert_eq!(february.events.len(), 1);
        assert_eq!(february.events[0].day, "01");
    }

    #[test]
    fn test_multi_day_all_day_event_end_is_exclusive() {
        let agenda = Normalizer::default().normalize(&[all_day_range(
            "Acamp Connect",
            "2026-02-14",
            "2026-02-18",
        )]);

        let event = &agenda.seasons[0].months[0].events[0];
        assert_eq!(event.day, "14-17");
        assert_eq!(event.kind, EventKind::Special);
    }

    #[test]
    fn test_one_day_all_day_event_with_exclusive_end_is_single() {
        let agenda =
            Normalizer::default().normalize(&[all_day_range("Tiradentes", "2026-04-21", "2026-04-22")]);
        assert_eq!(agenda.seasons[0].months[2].events[0].day, "21");
    }

    #[test]
    fn test_multi_day_timed_event_has_no_adjustment() {
        let agenda = brazil().normalize(&[timed(
            "Face a Face",
            "2026-03-20T09:00:00-03:00",
            "2026-03-22T18:00:00-03:00",
        )]);
        assert_eq!(agenda.seasons[0].months[1].events[0].day, "20-22");
    }

    #[test]
    fn test_same_day_timed_event_is_single() {
        let agenda = brazil().normalize(&[timed(
            "Culto Natalino",
            "2026-12-20T19:00:00-03:00",
            "2026-12-20T21:00:00-03:00",
        )]);
        assert_eq!(agenda.seasons[3].months[1].events[0].day, "20");
    }

    #[test]
    fn test_range_crossing_month_keeps_start_month() {
        let agenda =
            Normalizer::default().normalize(&[all_day_range("Face a Face", "2026-07-31", "2026-08-03")]);
        let july = &agenda.seasons[1].months[2];
        assert_eq!(july.events[0].day, "31-02");
        assert!(agenda.seasons[2].months[0].events.is_empty());
    }

    #[test]
    fn test_base_year_january_dropped_wrap_year_january_kept() {
        let agenda = Normalizer::default().normalize(&[
            all_day("Ano Novo", "2026-01-01"),
            all_day("Ano Novo", "2027-01-01"),
        ]);

        assert_eq!(agenda.event_count(), 1);
        let january = &agenda.seasons[3].months[2];
        assert_eq!(january.name, "Janeiro 2027");
        assert_eq!(january.events[0].kind, EventKind::Holiday);
    }

    #[test]
    fn test_out_of_window_event_dropped() {
        let agenda = Normalizer::default().normalize(&[all_day("Face a Face", "2028-06-19")]);
        assert!(agenda.is_empty());
    }

    #[test]
    fn test_missing_start_skipped_and_missing_title_defaulted() {
        let agenda = Normalizer::default().normalize(&[
            RawEvent {
                summary: Some("Sem data".into()),
                ..RawEvent::default()
            },
            RawEvent {
                start: parse_date_only("2026-05-08").map(EventTime::Date),
                ..RawEvent::default()
            },
        ]);

        assert_eq!(agenda.event_count(), 1);
        let event = &agenda.seasons[1].months[0].events[0];
        assert_eq!(event.title, "Evento");
        assert_eq!(event.kind, EventKind::Church);
    }

    #[test]
    fn test_events_sorted_by_leading_day() {
        let agenda = Normalizer::default().normalize(&[
            all_day("Festa da Passagem", "2026-02-28"),
            all_day_range("Seminário de Liberdade Espiritual", "2026-02-19", "2026-02-22"),
            all_day("Retorno Trilhar", "2026-02-01"),
            all_day("Vigília - Rede Viva", "2026-02-06"),
        ]);

        for month in agenda.months() {
            for pair in month.events.windows(2) {
                assert!(pair[0].leading_day() <= pair[1].leading_day());
            }
        }
        let days: Vec<&str> = agenda.seasons[0].months[0]
            .events
            .iter()
            .map(|e| e.day.as_str())
            .collect();
        assert_eq!(days, ["01", "06", "19-21", "28"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = vec![
            all_day("Natal", "2026-12-25"),
            all_day("Culto da Virada", "2026-12-31"),
            timed("Face a Face", "2026-10-23T19:00:00-03:00", "2026-10-25T12:00:00-03:00"),
        ];
        let normalizer = brazil();

        let first = normalizer.normalize(&raw);
        let second = normalizer.normalize(&raw);
        assert_eq!(first, second);
        assert_eq!(second.event_count(), 3);
    }

    #[test]
    fn test_utc_stamped_evening_event_stays_in_local_month() {
        let raw = crate::ics::parse_events(
            "BEGIN:VEVENT\r\n\
SUMMARY:Vigília - Rede Moving\r\n\
DTSTART:20260501T003000Z\r\n\
DTEND:20260501T023000Z\r\n\
END:VEVENT\r\n",
        );
        let agenda = Normalizer::default()
            .with_display_timezone("America/Araguaina".parse().unwrap())
            .normalize(&raw);

        let april = &agenda.seasons[0].months[2];
        assert_eq!(april.name, "Abril");
        assert_eq!(april.events.len(), 1);
        assert_eq!(april.events[0].day, "30");
        assert!(agenda.seasons[1].months[0].events.is_empty());
    }

    #[test]
    fn test_custom_default_title() {
        let agenda = Normalizer::default()
            .with_default_title("Sem título")
            .normalize(&[RawEvent {
                summary: Some("   ".into()),
                start: parse_date_only("2026-06-12").map(EventTime::Date),
                ..RawEvent::default()
            }]);
        assert_eq!(agenda.seasons[1].months[1].events[0].title, "Sem título");
    }

    #[test]
    fn test_custom_classifier() {
        let classifier = Classifier::new(
            vec![KeywordRule::new(EventKind::Special, &["batismo"])],
            EventKind::Church,
        );
        let agenda = Normalizer::default()
            .with_classifier(classifier)
            .normalize(&[all_day("Batismo nas águas", "2026-08-16"), all_day("Natal", "2026-12-25")]);

        assert_eq!(agenda.seasons[2].months[0].events[0].kind, EventKind::Special);
        assert_eq!(agenda.seasons[3].months[1].events[0].kind, EventKind::Church);
    }

    #[test]
    fn test_source_kind_overrides_title_keywords() {
        let mut culto = all_day("Culto Natalino", "2026-12-20");
        culto.kind = Some(EventKind::Church);

        let agenda = Normalizer::default().normalize(&[culto, all_day("Natal", "2026-12-25")]);
        let december = &agenda.seasons[3].months[1];
        assert_eq!(december.events[0].kind, EventKind::Church);
        assert_eq!(december.events[1].kind, EventKind::Holiday);
    }

    #[test]
    fn test_custom_base_year_moves_window() {
        let agenda = Normalizer::new(2027).normalize(&[
            all_day("Retorno Trilhar", "2027-02-07"),
            all_day("Retorno Trilhar", "2026-02-01"),
        ]);
        assert_eq!(agenda.event_count(), 1);
        assert_eq!(agenda.seasons[3].months[2].name, "Janeiro 2028");
    }
}
