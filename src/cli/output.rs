//! CLI Output Formatting.
//!
//! Handles output formatting for text and JSON.

use console::style;
use serde::{Deserialize, Serialize};

use super::CommandOutput;
use crate::core::tags::SeverityClass;

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT FORMAT
// ═══════════════════════════════════════════════════════════════════════════════

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
    /// Pretty JSON format
    JsonPretty,
}

impl OutputFormat {
    /// Format name
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::JsonPretty => "json-pretty",
        }
    }

    /// True for either JSON variant
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::JsonPretty)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "jsonpretty" | "pretty" => Ok(OutputFormat::JsonPretty),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DETAIL LINES
// ═══════════════════════════════════════════════════════════════════════════════

/// One line of a command's text view
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    /// `label: value`, optionally colored by severity
    Field {
        /// Field label
        label: String,
        /// Rendered value
        value: String,
        /// Styling bucket
        severity: Option<SeverityClass>,
    },
    /// Section heading
    Section(String),
    /// Bulleted list entry
    Item(String),
}

impl Detail {
    /// Plain field
    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Detail::Field {
            label: label.into(),
            value: value.into(),
            severity: None,
        }
    }

    /// Field colored by severity
    pub fn graded(label: impl Into<String>, value: impl Into<String>, severity: SeverityClass) -> Self {
        Detail::Field {
            label: label.into(),
            value: value.into(),
            severity: Some(severity),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT FORMATTER
// ═══════════════════════════════════════════════════════════════════════════════

/// Output formatter for CLI
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Output format
    format: OutputFormat,
    /// Color enabled
    color: bool,
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

impl OutputFormatter {
    /// Create new formatter
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: true,
        }
    }

    /// Disable color
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    /// Get format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Print info message
    pub fn info(&self, message: &str) {
        if self.format.is_json() {
            self.print_json(&serde_json::json!({ "status": "info", "message": message }));
        } else if self.color {
            println!("{} {}", style("ℹ").blue(), message);
        } else {
            println!("INFO: {}", message);
        }
    }

    /// Render a command result in the active format
    pub fn render(&self, output: &CommandOutput) -> String {
        if self.format.is_json() {
            let status = if output.success { "success" } else { "error" };
            let json = serde_json::json!({
                "status": status,
                "message": output.message,
                "data": output.data,
                "warnings": output.warnings,
            });
            let text = if self.format == OutputFormat::JsonPretty {
                serde_json::to_string_pretty(&json)
            } else {
                serde_json::to_string(&json)
            };
            return text.unwrap_or_default();
        }

        let mut lines = Vec::new();

        let headline = if output.success {
            self.paint_prefix("✓", "OK:", SeverityClass::Good)
        } else {
            self.paint_prefix("✗", "ERROR:", SeverityClass::Bad)
        };
        lines.push(format!("{} {}", headline, output.message));

        for detail in &output.details {
            lines.push(self.render_detail(detail));
        }

        for warning in &output.warnings {
            let prefix = self.paint_prefix("⚠", "WARNING:", SeverityClass::Warn);
            lines.push(format!("{} {}", prefix, warning));
        }

        lines.join("\n")
    }

    /// Print a command result
    pub fn print(&self, output: &CommandOutput) {
        let text = self.render(output);
        if output.success || self.format.is_json() {
            println!("{}", text);
        } else {
            eprintln!("{}", text);
        }
    }

    fn render_detail(&self, detail: &Detail) -> String {
        match detail {
            Detail::Field {
                label,
                value,
                severity,
            } => {
                if !self.color {
                    return format!("  {}: {}", label, value);
                }
                let value = match severity {
                    Some(class) => self.paint(value, *class),
                    None => value.clone(),
                };
                format!("  {}: {}", style(label).bold(), value)
            }
            Detail::Section(title) => {
                if self.color {
                    format!("\n{}", style(format!("=== {} ===", title)).cyan().bold())
                } else {
                    format!("\n=== {} ===", title)
                }
            }
            Detail::Item(text) => format!("  - {}", text),
        }
    }

    fn paint(&self, text: &str, class: SeverityClass) -> String {
        match class {
            SeverityClass::Good => style(text).green().to_string(),
            SeverityClass::Warn => style(text).yellow().to_string(),
            SeverityClass::Bad => style(text).red().to_string(),
            SeverityClass::Neutral => style(text).cyan().to_string(),
        }
    }

    fn paint_prefix(&self, symbol: &str, plain: &str, class: SeverityClass) -> String {
        if self.color {
            self.paint(symbol, class)
        } else {
            plain.to_string()
        }
    }

    /// Print JSON data
    fn print_json<T: Serialize>(&self, data: &T) {
        let output = if matches!(self.format, OutputFormat::JsonPretty) {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        };

        if let Ok(json) = output {
            println!("{}", json);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Json-Pretty".parse::<OutputFormat>().unwrap(), OutputFormat::JsonPretty);
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_serde() {
        let json = serde_json::to_string(&OutputFormat::JsonPretty).unwrap();
        assert_eq!(json, "\"json-pretty\"");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_render_text_without_color() {
        let output = CommandOutput::success("Dashboard for u-1")
            .with_detail(Detail::graded("Health Score", "85 (Excellent)", SeverityClass::Good))
            .with_detail(Detail::Section("Symptoms".into()))
            .with_detail(Detail::Item("Headache".into()))
            .with_warning("height is out of range");

        let text = OutputFormatter::new(OutputFormat::Text).without_color().render(&output);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "OK: Dashboard for u-1");
        assert_eq!(lines[1], "  Health Score: 85 (Excellent)");
        assert!(text.contains("=== Symptoms ==="));
        assert!(text.contains("  - Headache"));
        assert!(text.ends_with("WARNING: height is out of range"));
    }

    #[test]
    fn test_render_json() {
        let output = CommandOutput::success_with_data("ok", serde_json::json!({ "bmi": 25.0 }))
            .with_detail(Detail::field("ignored", "in json"));

        let text = OutputFormatter::new(OutputFormat::Json).render(&output);
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed["status"], "success");
        assert_eq!(parsed["data"]["bmi"], 25.0);
        assert!(!text.contains("ignored"));
    }

    #[test]
    fn test_render_failed_output() {
        let output = CommandOutput::error("2 validation issues");
        let text = OutputFormatter::new(OutputFormat::Text).without_color().render(&output);
        assert_eq!(text, "ERROR: 2 validation issues");
    }
}
