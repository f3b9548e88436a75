//! External compiler stages: template, scripts, stylesheet.
//!
//! Each compiler is an opaque subprocess configured via [`CompilerCommand`]:
//! it receives the source path(s) as trailing arguments and is expected to
//! print the compiled result on stdout, which this module captures into the
//! stage's intermediate artifact. A non-zero exit aborts the run with the
//! tool's own stderr attached.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

use crate::config::{CompilerCommand, Config};
use crate::error::BuildError;

/// Compile the entry template into the intermediate HTML document.
pub fn compile_template(config: &Config) -> Result<(), BuildError> {
    run_compiler(
        "template",
        &config.template_cmd,
        &[config.template_src.clone()],
        &config.compiled_html,
        config.verbose,
    )
}

/// Concatenate and minify every script under the scripts tree into one file.
pub fn bundle_scripts(config: &Config) -> Result<(), BuildError> {
    let sources = collect_scripts(&config.scripts_dir)?;
    run_compiler(
        "script",
        &config.minify_cmd,
        &sources,
        &config.bundled_js,
        config.verbose,
    )
}

/// Compile the entry stylesheet into compressed CSS.
pub fn compile_stylesheet(config: &Config) -> Result<(), BuildError> {
    run_compiler(
        "stylesheet",
        &config.style_cmd,
        &[config.stylesheet_src.clone()],
        &config.compiled_css,
        config.verbose,
    )
}

/// Collect every .js file under the scripts tree, sorted by path so the
/// bundle order is deterministic across runs and platforms.
fn collect_scripts(scripts_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut sources: Vec<PathBuf> = WalkDir::new(scripts_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "js"))
        .map(|e| e.path().to_path_buf())
        .collect();

    if sources.is_empty() {
        return Err(BuildError::NoScriptSources {
            path: scripts_dir.to_path_buf(),
        });
    }

    sources.sort();
    Ok(sources)
}

/// Run one external compiler: sources as trailing args, stdout captured
/// into `dest`.
fn run_compiler(
    stage: &'static str,
    cmd: &CompilerCommand,
    sources: &[PathBuf],
    dest: &Path,
    verbose: bool,
) -> Result<(), BuildError> {
    for source in sources {
        if !source.exists() {
            return Err(BuildError::SourceNotFound {
                path: source.clone(),
            });
        }
    }

    let output = Command::new(&cmd.program)
        .args(&cmd.args)
        .args(sources)
        .output()
        .map_err(|e| BuildError::CompilerSpawn {
            stage,
            program: cmd.program.clone(),
            source: e,
        })?;

    if verbose && !output.stderr.is_empty() {
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
    }

    if !output.status.success() {
        return Err(BuildError::CompilerFailed {
            stage,
            program: cmd.program.clone(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    if let Some(parent) = dest.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| BuildError::CreateDirFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(dest, &output.stdout).map_err(|e| BuildError::WriteFailed {
        path: dest.to_path_buf(),
        source: e,
    })
}
