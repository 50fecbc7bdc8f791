use anyhow::Result;

use crate::SourceArgs;
use crate::render::{Render, StatusRender};

pub async fn run(source: SourceArgs, season: Option<u8>, json: bool) -> Result<()> {
    let (_, loaded) = super::load(source, json).await?;

    if json {
        match season {
            Some(n) => println!(
                "{}",
                serde_json::to_string_pretty(&loaded.agenda.seasons[usize::from(n) - 1])?
            ),
            None => println!("{}", serde_json::to_string_pretty(&loaded.agenda)?),
        }
        return Ok(());
    }

    if let Some(notice) = loaded.status.render_notice() {
        println!("{}\n", notice);
    }

    let seasons: Vec<_> = match season {
        Some(n) => vec![&loaded.agenda.seasons[usize::from(n) - 1]],
        None => loaded.agenda.seasons.iter().collect(),
    };

    for (i, season) in seasons.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", season.render());
    }

    Ok(())
}
