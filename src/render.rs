//! TUI rendering traits for agenda types.
//!
//! Extension traits that add colored terminal rendering to agenda-core
//! types using owo_colors.

use agenda_core::loader::LoadStatus;
use agenda_core::{Event, EventKind, MonthData, Season};
use owo_colors::{AnsiColors, OwoColorize};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventKind {
    fn render(&self) -> String {
        match self {
            EventKind::Holiday => "●".red().to_string(),
            EventKind::Church => "●".blue().to_string(),
            EventKind::Special => "★".yellow().to_string(),
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let title = match self.kind {
            EventKind::Special => self.title.bold().to_string(),
            _ => self.title.clone(),
        };
        format!("{} {:>5}  {}", self.kind.render(), self.day, title)
    }
}

impl Render for MonthData {
    fn render(&self) -> String {
        let mut lines = vec![format!("  {}", self.name.bold())];

        if self.events.is_empty() {
            lines.push(format!("    {}", "Nenhum evento".dimmed()));
        } else {
            lines.extend(self.events.iter().map(|e| format!("    {}", e.render())));
        }

        lines.join("\n")
    }
}

impl Render for Season {
    fn render(&self) -> String {
        let color = season_color(&self.color);
        let mut lines = vec![
            format!("{}", self.name.color(color).bold()),
            format!("{}", self.description.dimmed()),
        ];

        for month in &self.months {
            lines.push(month.render());
        }

        lines.join("\n")
    }
}

/// Map the season's color hint to a terminal color.
fn season_color(name: &str) -> AnsiColors {
    match name {
        "green" => AnsiColors::Green,
        "blue" => AnsiColors::Blue,
        "yellow" => AnsiColors::Yellow,
        "red" => AnsiColors::Red,
        _ => AnsiColors::Default,
    }
}

pub trait StatusRender {
    /// One-line notice for the user, if the load needs explaining.
    fn render_notice(&self) -> Option<String>;
}

impl StatusRender for LoadStatus {
    fn render_notice(&self) -> Option<String> {
        match self {
            LoadStatus::Loaded { placed: 0, .. } => {
                Some("No events found in this agenda year".dimmed().to_string())
            }
            LoadStatus::Loaded { .. } => None,
            LoadStatus::Unavailable(reason) => Some(format!(
                "{} {}",
                "Calendar unavailable, showing an empty agenda:".yellow(),
                reason.dimmed()
            )),
        }
    }
}
