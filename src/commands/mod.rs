pub mod chat;
pub mod config;
pub mod insight;
pub mod show;

use agenda_core::Normalizer;
use agenda_core::config::AgendaConfig;
use agenda_core::loader::{AgendaSource, LoadedAgenda, load_agenda};
use anyhow::{Context, Result};

use crate::SourceArgs;
use crate::utils::tui;

/// Load config, pick the source and normalize. A failing source is not an
/// error here: the result carries the empty agenda and the reason.
pub async fn load(source: SourceArgs, quiet: bool) -> Result<(AgendaConfig, LoadedAgenda)> {
    let config = AgendaConfig::load().context("Failed to load config")?;
    let normalizer = Normalizer::from_config(&config)?;
    let source = AgendaSource::from_config(&config, source.ics, source.builtin)?;

    let spinner = (!quiet).then(|| tui::create_spinner(format!("Loading {}", source.describe())));
    let loaded = load_agenda(&source, &normalizer).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    Ok((config, loaded))
}
