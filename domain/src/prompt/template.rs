//! Prompt templates for workers and the judge

use crate::orchestration::value_objects::WorkerReport;
use crate::quorum::QuorumGate;

/// Instruction placed in front of the prompt sent to every worker
const WORKER_INSTRUCTION: &str = "Use your deep thinking-based response to this prompt and avoid submitting an analysis from elsewhere. In legal language, you are not to use hearsay.";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt sent to each worker: the instruction, a blank line, the prompt
    pub fn worker_prompt(prompt: &str) -> String {
        format!("{}\n\n{}", WORKER_INSTRUCTION, prompt)
    }

    /// Worker answers, each introduced by `[key] name:` and separated by `---`
    pub fn worker_responses_block(reports: &[WorkerReport]) -> String {
        reports
            .iter()
            .map(|r| format!("\n[{}] {}:\n{}\n", r.key, r.display_name, r.response))
            .collect::<Vec<_>>()
            .join("\n---\n")
    }

    /// Synthesis prompt sent to the judge
    pub fn judge_prompt(prompt: &str, gate: &QuorumGate, reports: &[WorkerReport]) -> String {
        let worker_count = gate.worker_count();
        let majority = gate.majority_description();

        format!(
            r#"You are a judge evaluating responses from {worker_count} AI models based on two criteria inspired by Gödel's work in mathematical logic:

1. SOUNDNESS (Correctness): Analyze where models agree. When {majority} or more models make similar points, assume soundness and mark as majority agreement. When all models agree, that is especially sound.
2. COMPLETENESS: Identify where responses complement each other with valid but different perspectives.

Original Prompt: "{prompt}"

Worker Responses:
{responses}

Please provide a synthesized report with the following sections:

## I. Areas of Agreement – SOUNDNESS
Label each point with [X] where X is the model acronym(s) that made this point (e.g., [gpt], [gemini,claude], [gpt,gemini,claude,grok,kimi,qwen])
- Majority agreements ({majority}+ models)
- Unanimous agreements (all {worker_count} models)

## II. Complementary Insights – COMPLETENESS
Valid but different perspectives from different models

## III. Minority Report / Divergent Views
Points made by fewer than {majority} models but still potentially valuable

## IV. Final Synthesis
Integrated conclusion drawing from soundness and completeness

Format your response clearly with these section headers."#,
            responses = Self::worker_responses_block(reports),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(key: &str, name: &str, response: &str) -> WorkerReport {
        WorkerReport {
            key: key.to_string(),
            display_name: name.to_string(),
            response: response.to_string(),
        }
    }

    #[test]
    fn test_worker_prompt_prefixes_instruction() {
        let prompt = PromptTemplate::worker_prompt("Is the halting problem decidable?");
        assert!(prompt.starts_with("Use your deep thinking-based response"));
        assert!(prompt.ends_with("\n\nIs the halting problem decidable?"));
    }

    #[test]
    fn test_responses_block_dividers() {
        let block = PromptTemplate::worker_responses_block(&[
            report("grok", "Grok 4", "No."),
            report("kimi", "Kimi K2 Thinking", "Undecidable."),
        ]);
        assert_eq!(
            block,
            "\n[grok] Grok 4:\nNo.\n\n---\n\n[kimi] Kimi K2 Thinking:\nUndecidable.\n"
        );
    }

    #[test]
    fn test_judge_prompt_majority_three() {
        let prompt = PromptTemplate::judge_prompt(
            "Q",
            &QuorumGate::new(3),
            &[report("grok", "Grok 4", "A")],
        );
        assert!(prompt.contains("responses from 3 AI models"));
        assert!(prompt.contains("When 2 or more models make similar points"));
        assert!(prompt.contains("- Majority agreements (2+ models)"));
        assert!(prompt.contains("Points made by fewer than 2 models"));
        assert!(prompt.contains("Original Prompt: \"Q\""));
        assert!(prompt.contains("[grok] Grok 4:\nA"));
    }

    #[test]
    fn test_judge_prompt_majority_five() {
        let prompt = PromptTemplate::judge_prompt("Q", &QuorumGate::new(5), &[]);
        assert!(prompt.contains("When 3 or 4 or more models make similar points"));
        assert!(prompt.contains("- Majority agreements (3 or 4+ models)"));
        assert!(prompt.contains("- Unanimous agreements (all 5 models)"));
    }
}
