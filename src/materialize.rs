//! Stage materializer: copies the compiled template into the working
//! document that the injection and substitution stages operate on.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::BuildError;

/// Copy `src` to `dst`, overwriting any existing destination.
/// The source must exist; content is copied verbatim.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, BuildError> {
    if !src.exists() {
        return Err(BuildError::SourceNotFound {
            path: src.to_path_buf(),
        });
    }

    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| BuildError::CreateDirFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::copy(src, dst).map_err(|e| BuildError::CopyFailed {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source: e,
    })
}

/// Materialize the working document from the compiled template.
pub fn materialize(config: &Config) -> Result<(), BuildError> {
    copy_file(&config.compiled_html, &config.working_html)?;
    Ok(())
}
