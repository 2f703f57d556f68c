// Output formatting.
// Renders an event list as text, a markdown-style table, JSON, or YAML.

use chrono::NaiveDateTime;
use clap::ValueEnum;

use crate::error::{ActivityError, Result};
use crate::github::Event;

const INPUT_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%SZ";
const TABLE_TIMESTAMP: &str = "%Y-%m-%d %H:%M";

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Table,
}

/// ANSI color assigned to an event type, if any.
pub fn event_color(event_type: &str) -> Option<&'static str> {
    match event_type {
        "PushEvent" => Some("\x1b[92m"),
        "PullRequestEvent" => Some("\x1b[94m"),
        "IssuesEvent" => Some("\x1b[93m"),
        _ => None,
    }
}

/// Render `events` in `format`. Color only affects text output.
pub fn render(events: &[Event], format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(events)
            .map_err(|e| ActivityError::Serialize(e.to_string())),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(events)?.trim_end().to_string()),
        OutputFormat::Table => render_table(events),
        OutputFormat::Text => Ok(render_text(events, color)),
    }
}

fn render_text(events: &[Event], color: bool) -> String {
    events
        .iter()
        .map(|event| {
            let line = format!("- {}: {}", event.event_type, event.message_text());
            match event_color(&event.event_type) {
                Some(code) if color => format!("{}{}{}", code, line, RESET),
                _ => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(events: &[Event]) -> Result<String> {
    let mut rows = vec![
        "| Date | Type | Repository | Details |".to_string(),
        "|------|------|------------|---------|".to_string(),
    ];
    for event in events {
        rows.push(format!(
            "| {} | {} | {} | {} |",
            table_date(event.created_at.as_deref())?,
            event.event_type,
            event.repo.name,
            event.message_text()
        ));
    }
    Ok(rows.join("\n"))
}

/// Reformat an API timestamp as `YYYY-MM-DD HH:MM`.
fn table_date(created_at: Option<&str>) -> Result<String> {
    let value = created_at.unwrap_or_default();
    NaiveDateTime::parse_from_str(value, INPUT_TIMESTAMP)
        .map(|dt| dt.format(TABLE_TIMESTAMP).to_string())
        .map_err(|_| ActivityError::InvalidTimestamp {
            value: value.to_string(),
        })
}
