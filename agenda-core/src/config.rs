//! Agenda configuration at ~/.config/agenda/config.toml.
//!
//! Values are layered: built-in defaults, then the config file, then
//! `AGENDA_*` environment variables (e.g. `AGENDA_GOOGLE_API_KEY`).

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::classify::KeywordConfig;
use crate::error::{AgendaError, AgendaResult};
use crate::gemini::{DEFAULT_GEMINI_MODEL, GEMINI_API_BASE};
use crate::google::GOOGLE_CALENDAR_API;
use crate::normalize::{DEFAULT_BASE_YEAR, DEFAULT_TITLE};

static DEFAULT_CONFIG_DIR: &str = "agenda";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    /// First year of the agenda window (February of this year through
    /// January of the next).
    pub base_year: i32,

    /// IANA zone timed events are displayed in. Unset keeps each event's
    /// own offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Title used for entries without a summary.
    pub default_title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_calendar_id: Option<String>,
    pub google_base_url: String,

    pub http_timeout_secs: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,

    pub keywords: KeywordConfig,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            base_year: DEFAULT_BASE_YEAR,
            timezone: None,
            default_title: DEFAULT_TITLE.to_string(),
            google_api_key: None,
            google_calendar_id: None,
            google_base_url: GOOGLE_CALENDAR_API.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: GEMINI_API_BASE.to_string(),
            keywords: KeywordConfig::default(),
        }
    }
}

impl AgendaConfig {
    pub fn config_path() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join(DEFAULT_CONFIG_DIR);

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out config
    /// file there on first run.
    pub fn load() -> AgendaResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit path. `~` is expanded; a missing file is fine.
    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();

        let config: AgendaConfig = Config::builder()
            .add_source(File::from(PathBuf::from(expanded)).required(false))
            .add_source(
                Environment::with_prefix("AGENDA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// The agenda window (February of `base_year` through January of the
    /// next year) must be representable as calendar dates.
    pub fn validate(&self) -> AgendaResult<()> {
        let window_ends = self
            .base_year
            .checked_add(1)
            .and_then(|next| NaiveDate::from_ymd_opt(next, 2, 28));

        if NaiveDate::from_ymd_opt(self.base_year, 1, 1).is_none() || window_ends.is_none() {
            return Err(AgendaError::Config(format!(
                "base_year {} is out of range",
                self.base_year
            )));
        }
        Ok(())
    }

    /// The configured display timezone, if any.
    pub fn display_timezone(&self) -> AgendaResult<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| AgendaError::Config(format!("Unknown timezone '{}': {}", name, e)))
            })
            .transpose()
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> AgendaResult<String> {
        toml::to_string_pretty(self).map_err(|e| AgendaError::Serialization(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# First year shown (February of this year through January of the next):
# base_year = {base_year}

# Show timed events in this timezone:
# timezone = \"America/Araguaina\"

# Google Calendar (read-only API key access):
# google_api_key = \"...\"
# google_calendar_id = \"...@group.calendar.google.com\"

# Gemini, for `agenda insight` and `agenda chat`:
# gemini_api_key = \"...\"
# gemini_model = \"{model}\"

# Title keywords, first match wins (holiday, then special, else church):
# [keywords]
# holiday = [\"feriado\", \"natal\"]
# special = [\"festa\", \"face a face\"]
",
            base_year = DEFAULT_BASE_YEAR,
            model = DEFAULT_GEMINI_MODEL,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
