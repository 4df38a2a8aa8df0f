//! Final report assembly
//!
//! ```text
//! === GÖDEL JUDGE ANALYSIS ===
//! Judge: ChatGPT 5.1 (gpt)
//! Workers: Claude 4.5 Sonnet (claude), Grok 4 (grok)
//!
//! ## PRELUDE            <- only for extended reports
//! ...
//! <judge text>
//! ```

use crate::core::model::ModelDescriptor;
use crate::orchestration::value_objects::WorkerReport;

pub const REPORT_TITLE: &str = "=== GÖDEL JUDGE ANALYSIS ===";

/// Builds the markdown report returned for a submission
pub struct ReportBuilder<'a> {
    judge: &'a ModelDescriptor,
    workers_used: &'a [WorkerReport],
    prelude: Option<(&'a str, &'a str)>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(judge: &'a ModelDescriptor, workers_used: &'a [WorkerReport]) -> Self {
        Self {
            judge,
            workers_used,
            prelude: None,
        }
    }

    /// Include the verbatim prelude: the original prompt, the prompt each
    /// worker received, and every worker's raw answer.
    pub fn with_prelude(mut self, original_prompt: &'a str, worker_prompt: &'a str) -> Self {
        self.prelude = Some((original_prompt, worker_prompt));
        self
    }

    pub fn header(&self) -> String {
        let workers = self
            .workers_used
            .iter()
            .map(|w| format!("{} ({})", w.display_name, w.key))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}\nJudge: {}\nWorkers: {}\n\n",
            REPORT_TITLE,
            self.judge.labelled(),
            workers
        )
    }

    fn prelude_block(&self, original_prompt: &str, worker_prompt: &str) -> String {
        let reports = self
            .workers_used
            .iter()
            .enumerate()
            .map(|(idx, r)| {
                let response = if r.response.is_empty() {
                    "[No response received]"
                } else {
                    r.response.as_str()
                };
                format!(
                    "\n#### Worker {}: [{}] {}\n\n{}\n",
                    idx + 1,
                    r.key,
                    r.display_name,
                    response
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");

        format!(
            "## PRELUDE\n\n\
             ### Original Prompt\n{original_prompt}\n\n\
             ### Worker Prompt (sent to each worker)\n{worker_prompt}\n\n\
             ### Individual Worker Reports\n{reports}\n\n---\n\n"
        )
    }

    /// Header, optional prelude, then the judge's text unchanged
    pub fn build(&self, judge_text: &str) -> String {
        let mut report = self.header();
        if let Some((original, worker)) = self.prelude {
            report.push_str(&self.prelude_block(original, worker));
        }
        report.push_str(judge_text);
        report
    }
}
