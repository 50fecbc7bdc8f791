use agenda_core::access::AccessGate;
use agenda_core::insight::{fallback_insight, quick_insight};
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::SourceArgs;
use crate::utils::tui;

pub async fn run(source: SourceArgs, api_key: Option<String>) -> Result<()> {
    let (config, loaded) = super::load(source, false).await?;

    let mut gate = AccessGate::from_config(&config);
    if let Some(key) = api_key {
        gate.select_credential(key);
    }

    let Some(client) = gate.client(&config)? else {
        println!("{}", fallback_insight(loaded.agenda.base_year).bold());
        println!(
            "{}",
            "Set gemini_api_key in the config (or pass --api-key) for AI insights.".dimmed()
        );
        return Ok(());
    };

    let spinner = tui::create_spinner("Asking the assistant".to_string());
    let line = quick_insight(Some(&client), &loaded.agenda).await;
    spinner.finish_and_clear();

    println!("✨ {}", line.bold());

    Ok(())
}
