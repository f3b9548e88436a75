//! # Tumblr Theme Build
//!
//! Build pipeline for static Tumblr themes.
//!
//! This library turns a theme source tree (pug template, scripts,
//! stylesheet) into two HTML artifacts: a locally previewable
//! `dist/sample.html` populated with sample content, and a Tumblr-ready
//! `dist/theme.html` with its marker comments unwrapped for the platform.
//!
//! ## Features
//!
//! - Fixed, strictly sequential stage pipelines per task
//! - External compilers (pug, uglifyjs, sass) invoked as subprocesses
//! - Marker injection of bundled scripts and compiled CSS
//! - Ordered literal/sequence pattern substitution
//! - Watch mode with per-category rebuilds
//!
//! ## Usage
//!
//! ```ignore
//! use tumblr_theme_build::config::Config;
//! use tumblr_theme_build::pipeline::{run_task, Task};
//!
//! let config = Config::for_root(&project_root);
//! run_task(Task::Compile, &config, None)?;
//! ```

/// External compiler stages (template, scripts, stylesheet)
pub mod compilers;

/// CLI configuration and argument parsing
pub mod config;

/// Error types for build operations
pub mod error;

/// Inline injection of scripts and CSS at marker comments
pub mod inject;

/// Working document materialization
pub mod materialize;

/// Task and stage orchestration
pub mod pipeline;

/// Pattern substitution engine and rule sets
pub mod substitute;

/// File watcher for continuous rebuilds
pub mod watcher;
