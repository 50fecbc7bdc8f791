//! Google Calendar events fetch (public calendars, API key access).

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::config::AgendaConfig;
use crate::error::{AgendaError, AgendaResult};
use crate::event::{EventTime, RawEvent, parse_date_only, parse_date_time};

pub const GOOGLE_CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";

/// Marker left in the config template until a real key is pasted in.
const API_KEY_PLACEHOLDER: &str = "COLE_SUA";

/// One page of `events.list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleEvent {
    pub summary: Option<String>,
    pub start: Option<GoogleEventTime>,
    pub end: Option<GoogleEventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventTime {
    pub date: Option<String>,
    pub date_time: Option<String>,
}

impl GoogleEventTime {
    /// `date` wins over `dateTime`; the two never share a parser.
    pub fn to_event_time(&self) -> Option<EventTime> {
        if let Some(ref date) = self.date {
            return parse_date_only(date).map(EventTime::Date);
        }
        self.date_time.as_deref().and_then(parse_date_time)
    }
}

impl From<GoogleEvent> for RawEvent {
    fn from(event: GoogleEvent) -> Self {
        RawEvent {
            summary: event.summary,
            start: event.start.as_ref().and_then(GoogleEventTime::to_event_time),
            end: event.end.as_ref().and_then(GoogleEventTime::to_event_time),
            kind: None,
        }
    }
}

/// Reads one calendar's events within the agenda window.
#[derive(Debug, Clone)]
pub struct GoogleCalendarClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    calendar_id: Option<String>,
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
}

impl GoogleCalendarClient {
    pub fn from_config(config: &AgendaConfig) -> AgendaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let (time_min, time_max) = fetch_window(config.base_year);

        Ok(GoogleCalendarClient {
            http,
            base_url: config.google_base_url.clone(),
            api_key: config.google_api_key.clone(),
            calendar_id: config.google_calendar_id.clone(),
            time_min,
            time_max,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch every event in the window, following `nextPageToken`.
    pub async fn fetch_events(&self) -> AgendaResult<Vec<RawEvent>> {
        let (api_key, calendar_id) = self.credentials()?;
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let url = self.events_url(api_key, calendar_id, page_token.as_deref())?;
            debug!(calendar_id, page = ?page_token, "Requesting Google Calendar events");

            let response = self.http.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AgendaError::GoogleStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            let page: EventsPage = response.json().await?;
            events.extend(page.items.into_iter().map(RawEvent::from));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        info!(calendar_id, count = events.len(), "Fetched Google Calendar events");
        Ok(events)
    }

    /// Whether a usable API key and calendar id are set.
    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    fn credentials(&self) -> AgendaResult<(&str, &str)> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && !k.contains(API_KEY_PLACEHOLDER))
            .ok_or_else(|| AgendaError::MissingCredentials("google_api_key is not set".into()))?;

        let calendar_id = self
            .calendar_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                AgendaError::MissingCredentials("google_calendar_id is not set".into())
            })?;

        Ok((api_key, calendar_id))
    }

    fn events_url(
        &self,
        api_key: &str,
        calendar_id: &str,
        page_token: Option<&str>,
    ) -> AgendaResult<Url> {
        let mut url = Url::parse(&self.base_url)?;

        url.path_segments_mut()
            .map_err(|_| AgendaError::Url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(["calendars", calendar_id, "events"]);

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("key", api_key)
                .append_pair("singleEvents", "true")
                .append_pair("orderBy", "startTime")
                .append_pair("timeMin", &self.time_min.to_rfc3339())
                .append_pair("timeMax", &self.time_max.to_rfc3339());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }

        Ok(url)
    }
}

/// January 1st of `base_year` through the end of February of the next
/// year, a margin around the February–January agenda.
fn fetch_window(base_year: i32) -> (DateTime<Utc>, DateTime<Utc>) {
    let day = |y, m, d| {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or_default()
    };
    (day(base_year, 1, 1), day(base_year.saturating_add(1), 2, 28))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>, calendar_id: Option<&str>) -> GoogleCalendarClient {
        let config = AgendaConfig {
            google_api_key: api_key.map(String::from),
            google_calendar_id: calendar_id.map(String::from),
            ..AgendaConfig::default()
        };
        GoogleCalendarClient::from_config(&config).unwrap()
    }

    #[test]
    fn test_items_convert_to_raw_events() {
        let json = r#"{
            "items": [
                {"summary": "Retorno Trilhar", "start": {"date": "2026-02-01"}, "end": {"date": "2026-02-02"}},
                {"summary": "Face a Face", "start": {"dateTime": "2026-03-20T09:00:00-03:00"}, "end": {"dateTime": "2026-03-22T18:00:00-03:00"}},
                {"start": {"date": "não é data"}}
            ]
        }"#;

        let page: EventsPage = serde_json::from_str(json).unwrap();
        assert!(page.next_page_token.is_none());

        let events: Vec<RawEvent> = page.items.into_iter().map(RawEvent::from).collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0].start, Some(EventTime::Date(_))));
        assert!(matches!(events[1].end, Some(EventTime::DateTime(_))));
        assert_eq!(events[2].summary, None);
        assert_eq!(events[2].start, None);
    }

    #[test]
    fn test_missing_items_is_empty_page() {
        let page: EventsPage = serde_json::from_str("{}").unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_credentials_required() {
        assert!(matches!(
            client(None, Some("cal")).credentials(),
            Err(AgendaError::MissingCredentials(_))
        ));
        assert!(matches!(
            client(Some("COLE_SUA_CHAVE_AQUI"), Some("cal")).credentials(),
            Err(AgendaError::MissingCredentials(_))
        ));
        assert!(matches!(
            client(Some("key"), Some("  ")).credentials(),
            Err(AgendaError::MissingCredentials(_))
        ));
        assert!(client(Some(" key "), Some("cal")).credentials().is_ok());
    }

    #[test]
    fn test_fetch_window_saturates_at_extreme_year() {
        let (time_min, time_max) = fetch_window(i32::MAX);
        assert!(time_min <= time_max);
    }

    #[test]
    fn test_events_url_encodes_calendar_id() {
        let client = client(Some("abc"), Some("igreja#agenda@group.calendar.google.com"));
        let url = client
            .events_url("abc", "igreja#agenda@group.calendar.google.com", Some("next"))
            .unwrap();

        assert!(url.path().starts_with("/calendar/v3/calendars/igreja%23agenda"));
        assert!(url.path().ends_with("/events"));

        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("key".into(), "abc".into())));
        assert!(query.contains(&("singleEvents".into(), "true".into())));
        assert!(query.contains(&("timeMin".into(), "2026-01-01T00:00:00+00:00".into())));
        assert!(query.contains(&("timeMax".into(), "2027-02-28T00:00:00+00:00".into())));
        assert!(query.contains(&("pageToken".into(), "next".into())));
    }
}
