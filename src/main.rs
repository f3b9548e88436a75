use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use tumblr_theme_build::config::{Cli, Config, TaskCommand};
use tumblr_theme_build::pipeline::{run_task, Task};
use tumblr_theme_build::watcher;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(TaskCommand::Watch);
    let config = Config::from_cli(cli)?;

    // Validate project root
    if !config.root.exists() {
        bail!("Project root not found: {}", config.root.display());
    }
    if !config.template_src.exists() {
        bail!(
            "Not a theme project: {} (src/views/theme.pug not found)",
            config.root.display()
        );
    }

    let task = match command {
        TaskCommand::Views => Task::Views,
        TaskCommand::Scripts => Task::Scripts,
        TaskCommand::Styles => Task::Styles,
        TaskCommand::Compile => Task::Compile,
        TaskCommand::Tumblr => Task::Tumblr,
        TaskCommand::Watch => return run_watch(&config),
    };

    // Setup stage progress bar (only in verbose mode)
    let progress = if config.verbose {
        let pb = ProgressBar::new(task.stages().len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(task.as_str());
        Some(pb)
    } else {
        None
    };

    let report = run_task(task, &config, progress.as_ref())
        .with_context(|| format!("task `{}` failed", task.as_str()))?;

    if let Some(pb) = progress {
        pb.finish_with_message("Complete");
    }

    // Print summary
    println!(
        "Built {} in {:.2}s",
        task.artifact(&config).display(),
        report.duration.as_secs_f64()
    );

    // Per-stage breakdown
    if config.verbose {
        for stage in &report.stages {
            println!(
                "  {}: {:.2}s",
                stage.stage.as_str(),
                stage.duration.as_secs_f64()
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_watch(config: &Config) -> Result<ExitCode> {
    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")?;

    watcher::watch(config, running)?;

    println!("\nWatch stopped");
    Ok(ExitCode::SUCCESS)
}
