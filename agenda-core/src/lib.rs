//! Core library for the seasonal agenda.
//!
//! - `season`: the four-season / twelve-month model and its skeleton
//! - `normalize`: raw calendar entries → agenda
//! - `google`, `ics`, `builtin`: event sources
//! - `gemini`, `chat`, `insight`, `access`: the AI collaborator and its fallbacks

pub mod access;
pub mod builtin;
pub mod chat;
pub mod classify;
pub mod config;
pub mod error;
pub mod event;
pub mod gemini;
pub mod google;
pub mod ics;
pub mod insight;
pub mod loader;
pub mod normalize;
pub mod season;

pub use error::{AgendaError, AgendaResult};
pub use event::{EventTime, RawEvent};
pub use normalize::Normalizer;
pub use season::{Agenda, Event, EventKind, MonthData, Season};
