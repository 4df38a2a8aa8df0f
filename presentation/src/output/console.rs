//! Console output formatter for submissions and history

use colored::Colorize;
use godel_application::HistoryEntry;
use godel_domain::{
    ConfigIssue, ModelRegistry, OutputFormat, ProgressSnapshot, Severity, SubmissionResult,
    WorkerOutcome, WorkerResult, first_line,
};

/// Characters of a prompt shown in history listings
const PROMPT_PREVIEW_CHARS: usize = 100;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a submission in the requested output format
    pub fn format(result: &SubmissionResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Report => result.report.clone(),
            OutputFormat::Judge => result.judge_report.clone(),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format as JSON
    pub fn format_json(result: &SubmissionResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Diagnostics for a submission that did not reach the judge
    pub fn format_insufficient(
        required: usize,
        received: usize,
        snapshot: &ProgressSnapshot,
        failures: &[WorkerResult],
    ) -> String {
        let mut output = format!(
            "{} only {} of {} required workers completed; the judge was not run.\n\n",
            "Error:".red().bold(),
            received,
            required
        );
        output.push_str(&snapshot.render());
        output.push('\n');

        if !failures.is_empty() {
            output.push_str(&format!("\n{}\n", "Unsucceeded workers:".yellow().bold()));
            for failure in failures {
                let reason = match &failure.outcome {
                    WorkerOutcome::TimedOut => {
                        format!("timed out after {}ms", failure.elapsed_ms)
                    }
                    WorkerOutcome::Failed(e) => e.clone(),
                    WorkerOutcome::Completed(_) => continue,
                };
                output.push_str(&format!(
                    "  - {}: {}\n",
                    failure.model.labelled(),
                    reason
                ));
            }
        }
        output
    }

    /// History listing, newest first
    pub fn format_history(entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return "No history yet.\n".to_string();
        }

        let mut output = format!(
            "{} ({} entries)\n",
            "Submission history".cyan().bold(),
            entries.len()
        );
        for (idx, entry) in entries.iter().rev().enumerate() {
            output.push_str(&format!(
                "\n{} {}  {} {}\n    {}\n",
                format!("[{}]", idx + 1).bold(),
                entry
                    .timestamp
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S"),
                "Judge:".dimmed(),
                entry.judge,
                Self::prompt_preview(&entry.prompt)
            ));
        }
        output
    }

    /// The `n`th newest entry (1-based)
    pub fn history_entry(entries: &[HistoryEntry], n: usize) -> Option<&HistoryEntry> {
        n.checked_sub(1).and_then(|idx| entries.iter().rev().nth(idx))
    }

    /// First 100 characters of the prompt on one line, `...` when cut
    pub fn prompt_preview(prompt: &str) -> String {
        let flat = prompt.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut preview: String = flat.chars().take(PROMPT_PREVIEW_CHARS).collect();
        if flat.chars().count() > PROMPT_PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    }

    /// Registry listing with the judge and default workers marked
    pub fn format_models(registry: &ModelRegistry, judge: &str, workers: &[String]) -> String {
        let mut output = format!("{}\n", "Available models:".cyan().bold());
        for model in registry.iter() {
            let role = if model.key == judge {
                "judge".green().to_string()
            } else if workers.contains(&model.key) {
                "worker".yellow().to_string()
            } else {
                String::new()
            };
            output.push_str(&format!(
                "  {:<8} {:<30} {:<36} {}\n",
                model.key, model.display_name, model.backend_id, role
            ));
        }
        output
    }

    /// One line per configuration issue
    pub fn format_config_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| {
                let label = match issue.severity {
                    Severity::Error => "config error:".red().bold(),
                    Severity::Warning => "config warning:".yellow().bold(),
                };
                format!("{} {}\n", label, first_line(&issue.message, 200))
            })
            .collect()
    }
}
