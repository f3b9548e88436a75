//! Pipeline orchestration: named tasks as fixed, strictly sequential
//! stage lists.
//!
//! A task runs its stages in order; the first stage failure aborts the
//! remainder of the run. No two stages ever run concurrently and a stage
//! only starts once the previous stage's file writes have completed.

use std::path::Path;
use std::time::{Duration, Instant};

use indicatif::ProgressBar;

use crate::compilers;
use crate::config::Config;
use crate::error::BuildError;
use crate::inject;
use crate::materialize;
use crate::substitute;

/// One pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Compile the template into intermediate HTML
    CompileTemplate,
    /// Concatenate and minify the scripts
    BundleScripts,
    /// Compile the stylesheet into compressed CSS
    CompileStylesheet,
    /// Copy the compiled HTML into the working document
    Materialize,
    /// Splice scripts and CSS into the working document
    Inject,
    /// Write dist/sample.html with sample content
    SubstituteSample,
    /// Write the platform-ready dist/theme.html
    SubstitutePlatform,
}

impl Stage {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::CompileTemplate => "compile-template",
            Stage::BundleScripts => "bundle-scripts",
            Stage::CompileStylesheet => "compile-stylesheet",
            Stage::Materialize => "materialize",
            Stage::Inject => "inject",
            Stage::SubstituteSample => "substitute-sample",
            Stage::SubstitutePlatform => "substitute-platform",
        }
    }

    /// Execute this stage against the configured paths
    pub fn run(&self, config: &Config) -> Result<(), BuildError> {
        match self {
            Stage::CompileTemplate => compilers::compile_template(config),
            Stage::BundleScripts => compilers::bundle_scripts(config),
            Stage::CompileStylesheet => compilers::compile_stylesheet(config),
            Stage::Materialize => materialize::materialize(config),
            Stage::Inject => inject::inject(config),
            Stage::SubstituteSample => substitute::write_sample(config),
            Stage::SubstitutePlatform => substitute::write_platform(config),
        }
    }
}

/// A named composite operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {
    /// Recompile the template, rebuild the sample
    Views,
    /// Rebundle the scripts, rebuild the sample
    Scripts,
    /// Recompile the stylesheet, rebuild the sample
    Styles,
    /// Run every compiler, produce the sample artifact
    Compile,
    /// Run every compiler, produce the platform-ready artifact
    Tumblr,
}

impl Task {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Views => "views",
            Task::Scripts => "scripts",
            Task::Styles => "styles",
            Task::Compile => "compile",
            Task::Tumblr => "tumblr",
        }
    }

    /// Ordered stage list for this task
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            Task::Views => &[
                Stage::CompileTemplate,
                Stage::Materialize,
                Stage::Inject,
                Stage::SubstituteSample,
            ],
            Task::Scripts => &[
                Stage::BundleScripts,
                Stage::Materialize,
                Stage::Inject,
                Stage::SubstituteSample,
            ],
            Task::Styles => &[
                Stage::CompileStylesheet,
                Stage::Materialize,
                Stage::Inject,
                Stage::SubstituteSample,
            ],
            Task::Compile => &[
                Stage::CompileTemplate,
                Stage::BundleScripts,
                Stage::CompileStylesheet,
                Stage::Materialize,
                Stage::Inject,
                Stage::SubstituteSample,
            ],
            Task::Tumblr => &[
                Stage::CompileTemplate,
                Stage::BundleScripts,
                Stage::CompileStylesheet,
                Stage::Materialize,
                Stage::Inject,
                Stage::SubstitutePlatform,
            ],
        }
    }

    /// Final artifact this task writes
    pub fn artifact<'a>(&self, config: &'a Config) -> &'a Path {
        match self {
            Task::Tumblr => &config.theme_out,
            _ => &config.sample_out,
        }
    }
}

/// Timing for a single completed stage
#[derive(Debug)]
pub struct StageReport {
    pub stage: Stage,
    pub duration: Duration,
}

/// Result of a completed task run
#[derive(Debug)]
pub struct TaskReport {
    pub task: Task,
    pub stages: Vec<StageReport>,
    pub duration: Duration,
}

/// Run every stage of `task` in order, aborting on the first failure.
pub fn run_task(
    task: Task,
    config: &Config,
    progress: Option<&ProgressBar>,
) -> Result<TaskReport, BuildError> {
    let start = Instant::now();
    let mut stages = Vec::with_capacity(task.stages().len());

    for stage in task.stages() {
        if config.verbose {
            eprintln!("[{}] {}", task.as_str(), stage.as_str());
        }

        let stage_start = Instant::now();
        stage.run(config)?;
        stages.push(StageReport {
            stage: *stage,
            duration: stage_start.elapsed(),
        });

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    Ok(TaskReport {
        task,
        stages,
        duration: start.elapsed(),
    })
}
