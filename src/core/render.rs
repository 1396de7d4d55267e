//! Renderer module
//!
//! Renders per-file outcomes as colored status lines or JSON Lines

use colored::Colorize;

use crate::core::model::{FileOutcome, Record, Summary};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Renderer for port outcomes
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render the line printed after a file has been processed
    pub fn render_file(&self, outcome: &FileOutcome) -> String {
        match self.format {
            OutputFormat::Text => {
                let line = format!("{} : {}", outcome.path, outcome.count);
                if outcome.changed() {
                    line.green().to_string()
                } else {
                    line.bright_black().to_string()
                }
            }
            OutputFormat::Jsonl => to_json(&Record::File(outcome)),
        }
    }

    /// Render the closing summary; text output has none
    pub fn render_summary(&self, summary: Summary) -> Option<String> {
        match self.format {
            OutputFormat::Text => None,
            OutputFormat::Jsonl => Some(to_json(&Record::Summary(summary))),
        }
    }
}

fn to_json(record: &Record<'_>) -> String {
    serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
}
