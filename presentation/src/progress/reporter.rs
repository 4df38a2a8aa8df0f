//! Progress reporting for a submission

use colored::Colorize;
use godel_application::ProgressNotifier;
use godel_domain::{
    ModelDescriptor, Phase, ProgressSnapshot, WorkerOutcome, WorkerProgress, WorkerStatus,
};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a phase bar and one live line per worker
pub struct ProgressReporter {
    multi: MultiProgress,
    worker_lines: Mutex<HashMap<String, ProgressBar>>,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            worker_lines: Mutex::new(HashMap::new()),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|s| s.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn line_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("    {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn colored_line(worker: &WorkerProgress) -> String {
        let line = worker.render();
        match worker.status {
            WorkerStatus::Pending => line.dimmed().to_string(),
            WorkerStatus::Completed => line.green().to_string(),
            WorkerStatus::Timeout => line.yellow().to_string(),
            WorkerStatus::Error => line.red().to_string(),
        }
    }

    fn worker_line(&self, worker: &WorkerProgress) {
        let mut lines = self.worker_lines.lock().unwrap_or_else(|e| e.into_inner());
        let bar = lines.entry(worker.key.clone()).or_insert_with(|| {
            let bar = self.multi.add(ProgressBar::new_spinner());
            bar.set_style(Self::line_style());
            bar
        });
        bar.set_message(Self::colored_line(worker));
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = match phase {
            Phase::Workers => {
                let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
                pb.set_style(Self::phase_style());
                pb.set_message("Waiting for workers...");
                pb
            }
            Phase::Judge => {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::spinner_style());
                pb.set_message("Synthesizing...");
                pb.enable_steady_tick(Duration::from_millis(120));
                pb
            }
        };
        pb.set_prefix(phase.display_name().to_string());

        *self.phase_bar.lock().unwrap_or_else(|e| e.into_inner()) = Some(pb);
    }

    fn on_worker_settled(&self, model: &ModelDescriptor, outcome: &WorkerOutcome) {
        if let Some(pb) = self
            .phase_bar
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            let status = WorkerStatus::from(outcome);
            let label = format!("{} {}", status.glyph(), model.display_name);
            pb.set_message(match status {
                WorkerStatus::Completed => label.green().to_string(),
                _ => label.red().to_string(),
            });
            pb.inc(1);
        }
    }

    fn on_snapshot(&self, snapshot: &ProgressSnapshot) {
        for worker in &snapshot.workers {
            self.worker_line(worker);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Some(pb) = self
            .phase_bar
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            pb.finish_with_message(format!("{} complete", phase.display_name()).green().to_string());
        }
        if *phase == Phase::Workers {
            for (_, line) in self
                .worker_lines
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .drain()
            {
                line.finish_and_clear();
            }
        }
    }

    fn on_judge_complete(&self, judge: &ModelDescriptor, success: bool) {
        if let Some(pb) = self
            .phase_bar
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            let mark = if success { "✓".green() } else { "✗".red() };
            pb.set_message(format!("{} {}", mark, judge.display_name));
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_worker_settled(&self, model: &ModelDescriptor, outcome: &WorkerOutcome) {
        match outcome {
            WorkerOutcome::Completed(_) => eprintln!("  {} {}", "✓".green(), model.display_name),
            WorkerOutcome::TimedOut => {
                eprintln!("  {} {} (timed out)", "⏱".yellow(), model.display_name)
            }
            WorkerOutcome::Failed(e) => {
                eprintln!("  {} {} ({})", "✗".red(), model.display_name, e)
            }
        }
    }

    fn on_snapshot(&self, snapshot: &ProgressSnapshot) {
        eprintln!("{}", snapshot.render().dimmed());
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        eprintln!();
    }

    fn on_judge_complete(&self, judge: &ModelDescriptor, success: bool) {
        if success {
            eprintln!("  {} {}", "✓".green(), judge.display_name);
        } else {
            eprintln!("  {} {} (failed)", "✗".red(), judge.display_name);
        }
    }
}
