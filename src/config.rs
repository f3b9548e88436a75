//! CLI configuration and runtime settings for the theme build pipeline.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Build pipeline for static Tumblr themes
#[derive(Parser, Debug)]
#[command(name = "tumblr-theme-build")]
#[command(version)]
#[command(about = "Build pipeline for static Tumblr themes")]
pub struct Cli {
    /// Task to run (defaults to watch)
    #[command(subcommand)]
    pub command: Option<TaskCommand>,

    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Fail when an injection marker is missing instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Template compiler: invoked with the template path, HTML expected on stdout
    #[arg(long, default_value = "pug")]
    pub template_cmd: String,

    /// Script minifier: invoked with every script path, minified JS expected on stdout
    #[arg(long, default_value = "uglifyjs")]
    pub minify_cmd: String,

    /// Stylesheet compiler: invoked with the stylesheet path, CSS expected on stdout
    #[arg(long, default_value = "sass --style=compressed")]
    pub style_cmd: String,
}

/// Named composite operations exposed on the command line
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCommand {
    /// Compile the template and rebuild the sample
    Views,
    /// Bundle the scripts and rebuild the sample
    Scripts,
    /// Compile the stylesheet and rebuild the sample
    Styles,
    /// Run every compiler and produce dist/sample.html
    Compile,
    /// Run every compiler and produce the Tumblr-ready dist/theme.html
    Tumblr,
    /// Watch the source trees and rebuild on change
    Watch,
}

/// How the injector treats a marker that is absent from the working document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerMode {
    /// Missing marker aborts the run
    Strict,
    /// Missing marker is skipped silently
    Lenient,
}

/// An external compiler invocation: program plus fixed leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CompilerCommand {
    /// Parse a whitespace-separated command spec, e.g. "sass --style=compressed".
    /// Returns None for an empty spec.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut parts = spec.split_whitespace();
        let program = parts.next()?.to_string();
        Some(Self {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }
}

/// Runtime configuration built once at startup and passed to the orchestrator
#[derive(Debug, Clone)]
pub struct Config {
    /// Project root directory
    pub root: PathBuf,
    /// Template source tree: src/views
    pub views_dir: PathBuf,
    /// Script source tree: src/scripts
    pub scripts_dir: PathBuf,
    /// Stylesheet source tree: src/styles
    pub styles_dir: PathBuf,
    /// Entry template: src/views/theme.pug
    pub template_src: PathBuf,
    /// Entry stylesheet: src/styles/theme.scss
    pub stylesheet_src: PathBuf,
    /// Transient intermediate directory: .build
    pub work_dir: PathBuf,
    /// Compiled template output: .build/temp.html
    pub compiled_html: PathBuf,
    /// Bundled scripts output: .build/theme.min.js
    pub bundled_js: PathBuf,
    /// Compiled stylesheet output: .build/theme.css
    pub compiled_css: PathBuf,
    /// Working document mutated by the injection stage: .build/theme.html
    pub working_html: PathBuf,
    /// Final artifact directory: dist
    pub dist_dir: PathBuf,
    /// Sample artifact: dist/sample.html
    pub sample_out: PathBuf,
    /// Platform-ready artifact: dist/theme.html
    pub theme_out: PathBuf,
    /// Template compiler command
    pub template_cmd: CompilerCommand,
    /// Script minifier command
    pub minify_cmd: CompilerCommand,
    /// Stylesheet compiler command
    pub style_cmd: CompilerCommand,
    /// Injection marker tolerance
    pub marker_mode: MarkerMode,
    /// Enable verbose output
    pub verbose: bool,
}

impl Config {
    /// Build a Config with the standard source/output layout under `root`
    /// and default compiler commands.
    pub fn for_root(root: &Path) -> Self {
        let root = root.to_path_buf();
        let src = root.join("src");
        let views_dir = src.join("views");
        let scripts_dir = src.join("scripts");
        let styles_dir = src.join("styles");
        let work_dir = root.join(".build");
        let dist_dir = root.join("dist");

        Config {
            template_src: views_dir.join("theme.pug"),
            stylesheet_src: styles_dir.join("theme.scss"),
            compiled_html: work_dir.join("temp.html"),
            bundled_js: work_dir.join("theme.min.js"),
            compiled_css: work_dir.join("theme.css"),
            working_html: work_dir.join("theme.html"),
            sample_out: dist_dir.join("sample.html"),
            theme_out: dist_dir.join("theme.html"),
            views_dir,
            scripts_dir,
            styles_dir,
            work_dir,
            dist_dir,
            root,
            template_cmd: CompilerCommand {
                program: "pug".to_string(),
                args: Vec::new(),
            },
            minify_cmd: CompilerCommand {
                program: "uglifyjs".to_string(),
                args: Vec::new(),
            },
            style_cmd: CompilerCommand {
                program: "sass".to_string(),
                args: vec!["--style=compressed".to_string()],
            },
            marker_mode: MarkerMode::Lenient,
            verbose: false,
        }
    }

    /// Create Config from CLI arguments
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let root = cli.root.canonicalize().unwrap_or(cli.root);
        let mut config = Config::for_root(&root);

        config.template_cmd = CompilerCommand::parse(&cli.template_cmd)
            .ok_or_else(|| anyhow::anyhow!("empty --template-cmd"))?;
        config.minify_cmd = CompilerCommand::parse(&cli.minify_cmd)
            .ok_or_else(|| anyhow::anyhow!("empty --minify-cmd"))?;
        config.style_cmd = CompilerCommand::parse(&cli.style_cmd)
            .ok_or_else(|| anyhow::anyhow!("empty --style-cmd"))?;

        config.marker_mode = if cli.strict {
            MarkerMode::Strict
        } else {
            MarkerMode::Lenient
        };
        config.verbose = cli.verbose;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cli(
        command: Option<TaskCommand>,
        strict: bool,
        verbose: bool,
        template_cmd: &str,
        minify_cmd: &str,
        style_cmd: &str,
    ) -> Cli {
        Cli {
            command,
            root: PathBuf::from("/tmp/theme"),
            strict,
            verbose,
            template_cmd: template_cmd.to_string(),
            minify_cmd: minify_cmd.to_string(),
            style_cmd: style_cmd.to_string(),
        }
    }

    // ==================== CompilerCommand tests ====================

    #[test]
    fn test_compiler_command_parse_bare_program() {
        let cmd = CompilerCommand::parse("pug").unwrap();
        assert_eq!(cmd.program, "pug");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_compiler_command_parse_with_args() {
        let cmd = CompilerCommand::parse("sass --style=compressed --no-source-map").unwrap();
        assert_eq!(cmd.program, "sass");
        assert_eq!(cmd.args, vec!["--style=compressed", "--no-source-map"]);
    }

    #[test]
    fn test_compiler_command_parse_empty() {
        assert!(CompilerCommand::parse("").is_none());
        assert!(CompilerCommand::parse("   ").is_none());
    }

    #[test]
    fn test_compiler_command_parse_collapses_whitespace() {
        let cmd = CompilerCommand::parse("  uglifyjs   --compress ").unwrap();
        assert_eq!(cmd.program, "uglifyjs");
        assert_eq!(cmd.args, vec!["--compress"]);
    }

    // ==================== Config::for_root tests ====================

    #[test]
    fn test_for_root_layout() {
        let config = Config::for_root(Path::new("/tmp/theme"));

        assert_eq!(config.views_dir, PathBuf::from("/tmp/theme/src/views"));
        assert_eq!(config.scripts_dir, PathBuf::from("/tmp/theme/src/scripts"));
        assert_eq!(config.styles_dir, PathBuf::from("/tmp/theme/src/styles"));
        assert_eq!(
            config.template_src,
            PathBuf::from("/tmp/theme/src/views/theme.pug")
        );
        assert_eq!(
            config.stylesheet_src,
            PathBuf::from("/tmp/theme/src/styles/theme.scss")
        );
    }

    #[test]
    fn test_for_root_intermediates_under_work_dir() {
        let config = Config::for_root(Path::new("/tmp/theme"));

        assert_eq!(config.work_dir, PathBuf::from("/tmp/theme/.build"));
        assert!(config.compiled_html.starts_with(&config.work_dir));
        assert!(config.bundled_js.starts_with(&config.work_dir));
        assert!(config.compiled_css.starts_with(&config.work_dir));
        assert!(config.working_html.starts_with(&config.work_dir));
    }

    #[test]
    fn test_for_root_final_artifacts() {
        let config = Config::for_root(Path::new("/tmp/theme"));

        assert_eq!(config.sample_out, PathBuf::from("/tmp/theme/dist/sample.html"));
        assert_eq!(config.theme_out, PathBuf::from("/tmp/theme/dist/theme.html"));
    }

    #[test]
    fn test_for_root_defaults() {
        let config = Config::for_root(Path::new("/tmp/theme"));

        assert_eq!(config.template_cmd.program, "pug");
        assert_eq!(config.minify_cmd.program, "uglifyjs");
        assert_eq!(config.style_cmd.program, "sass");
        assert_eq!(config.style_cmd.args, vec!["--style=compressed"]);
        assert_eq!(config.marker_mode, MarkerMode::Lenient);
        assert!(!config.verbose);
    }

    // ==================== Config::from_cli tests ====================

    #[test]
    fn test_config_from_cli_basic() {
        let cli = make_cli(None, false, false, "pug", "uglifyjs", "sass --style=compressed");
        let config = Config::from_cli(cli).unwrap();

        assert_eq!(config.marker_mode, MarkerMode::Lenient);
        assert!(!config.verbose);
        assert_eq!(config.style_cmd.args, vec!["--style=compressed"]);
    }

    #[test]
    fn test_config_from_cli_strict() {
        let cli = make_cli(Some(TaskCommand::Compile), true, false, "pug", "uglifyjs", "sass");
        let config = Config::from_cli(cli).unwrap();

        assert_eq!(config.marker_mode, MarkerMode::Strict);
    }

    #[test]
    fn test_config_from_cli_verbose() {
        let cli = make_cli(None, false, true, "pug", "uglifyjs", "sass");
        let config = Config::from_cli(cli).unwrap();

        assert!(config.verbose);
    }

    #[test]
    fn test_config_from_cli_custom_commands() {
        let cli = make_cli(None, false, false, "cat", "cat", "cat -u");
        let config = Config::from_cli(cli).unwrap();

        assert_eq!(config.template_cmd.program, "cat");
        assert_eq!(config.minify_cmd.program, "cat");
        assert_eq!(config.style_cmd.program, "cat");
        assert_eq!(config.style_cmd.args, vec!["-u"]);
    }

    #[test]
    fn test_config_from_cli_empty_command_rejected() {
        let cli = make_cli(None, false, false, "", "uglifyjs", "sass");
        assert!(Config::from_cli(cli).is_err());
    }

    #[test]
    fn test_config_clone() {
        let config = Config::for_root(Path::new("/tmp/theme"));
        let cloned = config.clone();

        assert_eq!(config.root, cloned.root);
        assert_eq!(config.template_cmd, cloned.template_cmd);
        assert_eq!(config.marker_mode, cloned.marker_mode);
    }
}
