//! CLI entrypoint for Gödel Judge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use colored::Colorize;
use godel_application::{
    BehaviorConfig, HistoryStore, NoProgress, ProgressNotifier, RunJudgeError, RunJudgeInput,
    RunJudgeUseCase,
};
use godel_domain::{ConfigIssue, ModelRegistry, OutputFormat, Prompt, reconcile_selection};
use godel_infrastructure::{
    ConfigLoader, FileConfig, JsonlHistoryStore, OpenRouterClient, ReportWriter,
    read_attachments,
};
use godel_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Held until exit so buffered log lines reach the file
    let _guard = match init_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

async fn run(cli: Cli) -> Result<ExitCode> {
    info!("Starting Gödel Judge");

    // === Configuration ===
    if cli.show_config {
        for line in ConfigLoader::config_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let issues = config.validate();
    if !issues.is_empty() {
        eprint!("{}", ConsoleFormatter::format_config_issues(&issues));
    }
    if ConfigIssue::has_errors(&issues) {
        return Ok(ExitCode::FAILURE);
    }

    let registry = config.registry();
    let history = history_store(&config);

    // === Informational commands ===
    if cli.list_models {
        let judge = cli.judge.as_deref().unwrap_or(&config.judge.model);
        let workers = reconcile_selection(
            &config.judge.workers,
            judge,
            config.judge.worker_count,
            &registry,
        );
        print!("{}", ConsoleFormatter::format_models(&registry, judge, &workers));
        return Ok(ExitCode::SUCCESS);
    }

    if cli.history || cli.history_entry.is_some() || cli.clear_history {
        let Some(store) = history else {
            bail!("No history location available; set history.path in the config file");
        };
        if cli.clear_history {
            store.clear().context("Failed to clear history")?;
            println!("History cleared ({})", store.path().display());
            return Ok(ExitCode::SUCCESS);
        }

        let entries = store.load().context("Failed to read history")?;
        match cli.history_entry {
            Some(n) => match ConsoleFormatter::history_entry(&entries, n) {
                Some(entry) => println!("{}", entry.output),
                None => bail!("No history entry #{} ({} recorded)", n, entries.len()),
            },
            None => print!("{}", ConsoleFormatter::format_history(&entries)),
        }
        return Ok(ExitCode::SUCCESS);
    }

    // === Submission ===
    let Some(text) = cli.prompt.clone() else {
        bail!("A prompt is required. Use --help for usage.");
    };
    let attachments = read_attachments(&cli.attach)?;
    let prompt = Prompt::try_new(text)?.with_attachments(attachments);

    let judge = cli.judge.clone().unwrap_or_else(|| config.judge.model.clone());
    let (workers, worker_count) = worker_selection(&cli, &config, &judge, &registry);
    debug!("Judge: {}, workers: {:?}", judge, workers);

    let behavior = behavior(&cli, &config);
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    let input = RunJudgeInput::new(prompt, judge, workers)
        .with_worker_count(worker_count)
        .with_extended_report(cli.extended || config.judge.extended_report);

    // === Dependency Injection ===
    let client = Arc::new(OpenRouterClient::from_config(&config.openrouter)?);
    let mut use_case = RunJudgeUseCase::new(client, registry).with_behavior(behavior);
    if config.history.enabled
        && let Some(store) = history
    {
        use_case = use_case.with_history(Arc::new(store));
    }

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let result = match use_case.execute_with_progress(input, progress.as_ref()).await {
        Ok(result) => result,
        Err(RunJudgeError::InsufficientWorkers {
            required,
            received,
            snapshot,
            failures,
        }) => {
            eprint!(
                "{}",
                ConsoleFormatter::format_insufficient(required, received, &snapshot, &failures)
            );
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", ConsoleFormatter::format(&result, format));

    if cli.save {
        let dir = cli
            .save_dir
            .clone()
            .or_else(|| config.output.save_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let path = ReportWriter::new(dir).save(&result.report, chrono::Utc::now())?;
        eprintln!("{} {}", "Report saved to".green(), path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn history_store(config: &FileConfig) -> Option<JsonlHistoryStore> {
    let path = config.history.resolve_path();
    if path.is_none() {
        warn!("No data directory found; history is unavailable");
    }
    path.map(JsonlHistoryStore::new)
}

/// Explicit `-w` keys win; otherwise the configured workers are reconciled
/// with the judge and the requested count.
fn worker_selection(
    cli: &Cli,
    config: &FileConfig,
    judge: &str,
    registry: &ModelRegistry,
) -> (Vec<String>, usize) {
    if !cli.worker.is_empty() {
        let count = cli.worker_count.unwrap_or(cli.worker.len());
        return (cli.worker.clone(), count);
    }

    let count = cli.worker_count.unwrap_or(config.judge.worker_count);
    let workers = reconcile_selection(&config.judge.workers, judge, count, registry);
    (workers, count)
}

fn behavior(cli: &Cli, config: &FileConfig) -> BehaviorConfig {
    // Issues were already reported by validate()
    let (mut behavior, _) = config.behavior.to_behavior_config();
    if let Some(secs) = cli.timeout {
        behavior = behavior.with_worker_deadline(Duration::from_secs(secs));
    }
    if cli.judge_timeout.is_some() {
        behavior = behavior.with_judge_timeout_seconds(cli.judge_timeout);
    }
    behavior
}
