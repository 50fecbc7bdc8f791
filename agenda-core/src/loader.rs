//! Source selection and the fail-open load boundary.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::builtin::{BUILTIN_BASE_YEAR, builtin_events};
use crate::config::AgendaConfig;
use crate::error::AgendaResult;
use crate::event::RawEvent;
use crate::google::GoogleCalendarClient;
use crate::ics;
use crate::normalize::Normalizer;
use crate::season::Agenda;

/// Where raw events come from.
#[derive(Debug, Clone)]
pub enum AgendaSource {
    Google(GoogleCalendarClient),
    IcsFile(PathBuf),
    /// The agenda bundled with the binary.
    Builtin,
}

impl AgendaSource {
    /// An explicit ICS file wins, then an explicit request for the bundled
    /// agenda, then Google Calendar. Without Google credentials the bundled
    /// agenda is used.
    pub fn from_config(
        config: &AgendaConfig,
        ics_file: Option<PathBuf>,
        builtin: bool,
    ) -> AgendaResult<Self> {
        if let Some(path) = ics_file {
            return Ok(AgendaSource::IcsFile(path));
        }
        if builtin {
            return Ok(AgendaSource::Builtin);
        }

        let client = GoogleCalendarClient::from_config(config)?;
        if client.is_configured() {
            Ok(AgendaSource::Google(client))
        } else {
            info!("Google Calendar not configured, using the bundled agenda");
            Ok(AgendaSource::Builtin)
        }
    }

    pub fn describe(&self) -> String {
        match self {
            AgendaSource::Google(_) => "Google Calendar".to_string(),
            AgendaSource::IcsFile(path) => path.display().to_string(),
            AgendaSource::Builtin => format!("bundled {} agenda", BUILTIN_BASE_YEAR),
        }
    }

    pub async fn fetch(&self) -> AgendaResult<Vec<RawEvent>> {
        match self {
            AgendaSource::Google(client) => client.fetch_events().await,
            AgendaSource::IcsFile(path) => ics::read_events(path),
            AgendaSource::Builtin => Ok(builtin_events()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The source answered; `raw` entries were read, `placed` made it in.
    Loaded { raw: usize, placed: usize },
    /// The source failed; the agenda is the empty skeleton.
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct LoadedAgenda {
    pub agenda: Agenda,
    pub status: LoadStatus,
}

/// Fetch and normalize. A failing source never fails the load: the empty
/// skeleton comes back with [`LoadStatus::Unavailable`].
pub async fn load_agenda(source: &AgendaSource, normalizer: &Normalizer) -> LoadedAgenda {
    match source.fetch().await {
        Ok(raw) => {
            let agenda = normalizer.normalize(&raw);
            let placed = agenda.event_count();
            info!(source = %source.describe(), raw = raw.len(), placed, "Agenda loaded");
            LoadedAgenda {
                agenda,
                status: LoadStatus::Loaded {
                    raw: raw.len(),
                    placed,
                },
            }
        }
        Err(e) => {
            warn!(source = %source.describe(), error = %e, "Agenda source unavailable, showing empty agenda");
            LoadedAgenda {
                agenda: Agenda::skeleton(normalizer.base_year()),
                status: LoadStatus::Unavailable(e.to_string()),
            }
        }
    }
}
