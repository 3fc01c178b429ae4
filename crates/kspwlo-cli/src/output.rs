//! Output formatting for result sets.

use clap::ValueEnum;
use serde::Serialize;

use kspwlo_lib::{RenderMode, RouteSetSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing with overlap annotations.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// `Length: <length> | <nodes>` lines.
    Legacy,
}

impl OutputFormat {
    /// Library render mode for the textual formats; `None` for JSON.
    pub fn render_mode(self) -> Option<RenderMode> {
        match self {
            OutputFormat::Text => Some(RenderMode::PlainText),
            OutputFormat::Legacy => Some(RenderMode::Legacy),
            OutputFormat::Json => None,
        }
    }
}

/// Render a result set in the requested format, newline terminated.
pub fn render_summary(summary: &RouteSetSummary, format: OutputFormat) -> serde_json::Result<String> {
    match format.render_mode() {
        Some(mode) => Ok(summary.render(mode)),
        None => to_json_line(summary),
    }
}

/// Pretty JSON followed by a newline.
pub fn to_json_line<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
