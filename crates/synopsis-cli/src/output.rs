//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::json;
use synopsis_domain::{Ledger, Row};
use synopsis_pipeline::{InitOutcome, PassOutcome};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest summary shown in the status table, in characters.
const SUMMARY_PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

/// State name for a ledger row.
pub fn row_state(row: &Row) -> &'static str {
    if row.is_pending() {
        "pending"
    } else if row.is_placeholder() {
        "placeholder"
    } else {
        "summarized"
    }
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format ledger rows for the status command.
    pub fn format_ledger(&self, ledger: &Ledger) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_ledger_json(ledger),
            OutputFormat::Table => Ok(self.format_ledger_table(ledger)),
            OutputFormat::Quiet => Ok(self.format_ledger_quiet(ledger)),
        }
    }

    fn format_ledger_json(&self, ledger: &Ledger) -> Result<String> {
        let stats = ledger.stats();
        let rows: Vec<serde_json::Value> = ledger
            .iter()
            .map(|row| {
                json!({
                    "file": row.file,
                    "state": row_state(row),
                    "summary": row.summary,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json!({
            "rows": rows,
            "total": stats.total,
            "summarized": stats.summarized,
            "placeholders": stats.placeholders,
            "pending": stats.pending,
        }))?)
    }

    fn format_ledger_table(&self, ledger: &Ledger) -> String {
        if ledger.is_empty() {
            return self.colorize("Ledger is empty.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["File", "State", "Summary"]);
        for row in ledger {
            let summary = row.summary.as_deref().map(preview).unwrap_or_default();
            builder.push_record([row.file.clone(), self.state_cell(row), summary]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let stats = ledger.stats();
        format!(
            "{}\n{} row(s): {} summarized, {} placeholder(s), {} pending",
            table, stats.total, stats.summarized, stats.placeholders, stats.pending
        )
    }

    // Pending files only, one per line
    fn format_ledger_quiet(&self, ledger: &Ledger) -> String {
        ledger
            .iter()
            .filter(|row| row.is_pending())
            .map(|row| row.file.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state_cell(&self, row: &Row) -> String {
        let state = row_state(row);
        match state {
            "pending" => self.colorize(state, "yellow"),
            "placeholder" => self.colorize(state, "magenta"),
            _ => self.colorize(state, "green"),
        }
    }

    /// Format the file list of a dry run.
    pub fn format_preview(&self, files: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({ "pending": files }))?),
            OutputFormat::Quiet => Ok(files.join("\n")),
            OutputFormat::Table => {
                if files.is_empty() {
                    return Ok(self.info("Nothing to summarize."));
                }
                let mut lines = vec![self.info(&format!("Would summarize {} file(s):", files.len()))];
                lines.extend(files.iter().map(|file| format!("  {}", file)));
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a completed pass as JSON.
    pub fn format_pass_json(&self, outcome: &PassOutcome) -> Result<String> {
        let report = &outcome.report;
        let created = match outcome.init {
            InitOutcome::Created { rows } => Some(rows),
            InitOutcome::Existing => None,
        };
        let failures: Vec<serde_json::Value> = report
            .failures
            .iter()
            .map(|failure| {
                json!({
                    "file": failure.file,
                    "stage": failure.stage.as_str(),
                    "reason": failure.reason,
                })
            })
            .collect();
        let missing: Vec<String> = report
            .missing
            .iter()
            .map(|path| path.display().to_string())
            .collect();

        Ok(serde_json::to_string_pretty(&json!({
            "created_rows": created,
            "added": outcome.added,
            "pending": report.pending,
            "summarized": report.summarized,
            "placeholders": report.placeholders,
            "missing": missing,
            "failures": failures,
            "saves": report.saves,
            "attempted": report.attempted(),
            "elapsed_ms": report.elapsed_ms,
        }))?)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

// First line of a summary, cut to the preview width
fn preview(summary: &str) -> String {
    let line = summary.lines().next().unwrap_or_default();
    match line.char_indices().nth(SUMMARY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}…", &line[..cut]),
        None if line.len() < summary.trim_end().len() => format!("{}…", line),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synopsis_domain::PLACEHOLDER_SUMMARY;
    use synopsis_pipeline::{FailureStage, RowFailure, RunReport};

    fn sample_ledger() -> Ledger {
        Ledger::from_rows(vec![
            Row::new("a.pdf"),
            Row::with_summary("b.docx", "A memo about budgets."),
            Row::with_summary("c.pdf", PLACEHOLDER_SUMMARY),
        ])
        .unwrap()
    }

    #[test]
    fn test_row_state() {
        let ledger = sample_ledger();
        let states: Vec<&str> = ledger.iter().map(row_state).collect();
        assert_eq!(states, vec!["pending", "summarized", "placeholder"]);
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_ledger(&sample_ledger()).unwrap();
        assert!(output.contains("File"));
        assert!(output.contains("A memo about budgets."));
        assert!(output.contains("3 row(s): 1 summarized, 1 placeholder(s), 1 pending"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_ledger(&sample_ledger()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["rows"][0]["state"], "pending");
        assert!(value["rows"][0]["summary"].is_null());
        assert_eq!(value["rows"][2]["state"], "placeholder");
        assert_eq!(value["pending"], 1);
    }

    #[test]
    fn test_quiet_format_lists_pending() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_ledger(&sample_ledger()).unwrap();
        assert_eq!(output, "a.pdf");
    }

    #[test]
    fn test_empty_ledger() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_ledger(&Ledger::new()).unwrap();
        assert!(output.contains("Ledger is empty"));
    }

    #[test]
    fn test_preview_formats() {
        let files = vec!["a.pdf".to_string(), "b.docx".to_string()];

        let table = Formatter::new(OutputFormat::Table, false)
            .format_preview(&files)
            .unwrap();
        assert!(table.contains("Would summarize 2 file(s):"));
        assert!(table.contains("  b.docx"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_preview(&files)
            .unwrap();
        assert_eq!(quiet, "a.pdf\nb.docx");
    }

    #[test]
    fn test_pass_json() {
        let mut report = RunReport::new();
        report.summarized = 1;
        report.record_failure(RowFailure {
            file: "bad.pdf".to_string(),
            stage: FailureStage::Extraction,
            reason: "corrupt".to_string(),
        });
        let outcome = PassOutcome {
            init: InitOutcome::Created { rows: 2 },
            added: Vec::new(),
            report,
        };

        let output = Formatter::new(OutputFormat::Json, false)
            .format_pass_json(&outcome)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["created_rows"], 2);
        assert_eq!(value["failures"][0]["stage"], "extraction");
        assert_eq!(value["attempted"], 1);
    }

    #[test]
    fn test_preview_truncates_long_summaries() {
        let long = "x".repeat(80);
        assert_eq!(preview(&long), format!("{}…", "x".repeat(60)));
        assert_eq!(preview("first\nsecond"), "first…");
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
