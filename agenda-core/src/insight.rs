//! One-line "what's next" insight shown above the agenda.

use tracing::warn;

use crate::gemini::GeminiClient;
use crate::season::Agenda;

const INSIGHT_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant for Igreja Batista Crescer. Provide extremely concise, one-sentence summaries or answers.";

/// Shown when no insight could be produced.
pub fn fallback_insight(base_year: i32) -> String {
    format!("Bem-vindo à Agenda {}!", base_year)
}

/// Plain-text listing of the agenda, one event per line, for use as
/// model context.
pub fn agenda_context(agenda: &Agenda) -> String {
    let mut lines = vec![format!("Agenda {}:", agenda.base_year)];

    for season in &agenda.seasons {
        for month in &season.months {
            for event in &month.events {
                lines.push(format!(
                    "- {} ({}) {} {}: {}",
                    season.name, event.kind, month.name, event.day, event.title
                ));
            }
        }
    }

    lines.join("\n")
}

/// Ask for the next big event. Never fails: any problem yields the
/// fallback line.
pub async fn quick_insight(client: Option<&GeminiClient>, agenda: &Agenda) -> String {
    let Some(client) = client else {
        return fallback_insight(agenda.base_year);
    };

    let prompt = format!(
        "Qual é o próximo grande evento da igreja Crescer baseado na agenda de {}? Responda em uma frase curta.\n\n{}",
        agenda.base_year,
        agenda_context(agenda)
    );

    match client.generate(&prompt, Some(INSIGHT_SYSTEM_INSTRUCTION)).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Insight request failed");
            fallback_insight(agenda.base_year)
        }
    }
}
