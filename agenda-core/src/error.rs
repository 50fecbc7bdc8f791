//! Error types for the agenda ecosystem.

use thiserror::Error;

/// Errors that can occur while loading or querying the agenda.
///
/// Per-event problems (an unparseable date, a missing title) are never
/// errors: the normalizer skips those entries. These variants only cover
/// failures of a whole source or collaborator.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google Calendar API returned status {status}: {body}")]
    GoogleStatus { status: u16, body: String },

    #[error("Gemini API returned status {status}: {body}")]
    GeminiStatus { status: u16, body: String },

    #[error("AI response was empty")]
    EmptyResponse,

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<url::ParseError> for AgendaError {
    fn from(err: url::ParseError) -> Self {
        AgendaError::Url(err.to_string())
    }
}

impl From<config::ConfigError> for AgendaError {
    fn from(err: config::ConfigError) -> Self {
        AgendaError::Config(err.to_string())
    }
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
