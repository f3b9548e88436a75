use std::path::PathBuf;
use thiserror::Error;

/// Build pipeline error types
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("No script sources found under {path}")]
    NoScriptSources { path: PathBuf },

    #[error("{stage} compiler `{program}` exited with code {code}: {stderr}")]
    CompilerFailed {
        stage: &'static str,
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to launch {stage} compiler `{program}`")]
    CompilerSpawn {
        stage: &'static str,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {src} to {dst}")]
    CopyFailed {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory: {path}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Marker `{marker}` not found in {path}")]
    MarkerMissing { marker: String, path: PathBuf },

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
