use agenda_core::access::AccessGate;
use agenda_core::chat::{CHAT_FALLBACK, ChatReply, ChatSession};
use agenda_core::insight::agenda_context;
use anyhow::Result;
use dialoguer::Input;
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
        println!("{}", CHAT_FALLBACK.yellow());
        println!(
            "{}",
            "Set gemini_api_key in the config (or pass --api-key) to chat.".dimmed()
        );
        return Ok(());
    };

    let mut session = ChatSession::new().with_context(&agenda_context(&loaded.agenda));

    if let Some(greeting) = session.messages().first() {
        println!("{} {}", "Crescer:".cyan().bold(), greeting.text);
    }
    println!("{}", "(empty line to quit)".dimmed());

    loop {
        let input: String = Input::new()
            .with_prompt("Você")
            .allow_empty(true)
            .interact_text()?;

        if input.trim().is_empty() {
            break;
        }

        let spinner = tui::create_spinner("...".to_string());
        let reply = session.send(&client, &input).await;
        spinner.finish_and_clear();

        match reply {
            ChatReply::Answer(text) => println!("{} {}", "Crescer:".cyan().bold(), text),
            ChatReply::Fallback(notice) => println!("{}", notice.yellow()),
            ChatReply::Ignored => {}
        }
    }

    Ok(())
}
