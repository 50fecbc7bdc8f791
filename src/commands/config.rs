use agenda_core::config::AgendaConfig;
use anyhow::Result;
use owo_colors::OwoColorize;

pub fn run(effective: bool) -> Result<()> {
    let config_path = AgendaConfig::config_path()?;
    let config = AgendaConfig::load()?;

    if effective {
        print!("{}", masked(config).to_toml()?);
        return Ok(());
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());

    println!();
    println!("{}", "Settings".bold());
    println!("  Base year:  {}", config.base_year);
    println!(
        "  Timezone:   {}",
        config.timezone.as_deref().unwrap_or("system local time")
    );
    println!(
        "  Google:     {}",
        configured(config.google_api_key.is_some() && config.google_calendar_id.is_some())
    );
    println!(
        "  Gemini:     {} ({})",
        configured(config.gemini_api_key.is_some()),
        config.gemini_model
    );

    Ok(())
}

fn masked(mut config: AgendaConfig) -> AgendaConfig {
    let mask = |key: &mut Option<String>| {
        if key.is_some() {
            *key = Some("********".to_string());
        }
    };
    mask(&mut config.google_api_key);
    mask(&mut config.gemini_api_key);
    config
}

fn configured(yes: bool) -> String {
    if yes {
        "configured".green().to_string()
    } else {
        "not configured".dimmed().to_string()
    }
}
