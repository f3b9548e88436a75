//! Inline injector: splices the bundled scripts and the compiled CSS into
//! the working document at their marker comments.
//!
//! Each marker is expected at most once; only the first occurrence is
//! replaced. A missing marker is skipped in lenient mode and aborts the run
//! in strict mode.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, MarkerMode};
use crate::error::BuildError;

/// Marker replaced with the bundled script contents
pub const SCRIPT_MARKER: &str = "<!-- !import scripts-->";

/// Marker replaced with the compiled CSS contents
pub const STYLE_MARKER: &str = "<!-- !import styles-->";

/// A single (marker, source file) injection pair
#[derive(Debug, Clone)]
pub struct Injection {
    pub marker: String,
    pub source: PathBuf,
}

impl Injection {
    pub fn new(marker: &str, source: PathBuf) -> Self {
        Self {
            marker: marker.to_string(),
            source,
        }
    }
}

/// Apply every injection to `dest` in place. The source file of each pair
/// must exist; the full document is rewritten once at the end.
/// Returns the number of markers actually replaced.
pub fn inject_file(
    dest: &Path,
    injections: &[Injection],
    mode: MarkerMode,
) -> Result<usize, BuildError> {
    let mut doc = fs::read_to_string(dest).map_err(|e| BuildError::ReadFailed {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let mut applied = 0;
    for injection in injections {
        let payload =
            fs::read_to_string(&injection.source).map_err(|e| BuildError::ReadFailed {
                path: injection.source.clone(),
                source: e,
            })?;

        match doc.find(&injection.marker) {
            Some(pos) => {
                doc.replace_range(pos..pos + injection.marker.len(), &payload);
                applied += 1;
            }
            None => {
                if mode == MarkerMode::Strict {
                    return Err(BuildError::MarkerMissing {
                        marker: injection.marker.clone(),
                        path: dest.to_path_buf(),
                    });
                }
            }
        }
    }

    fs::write(dest, &doc).map_err(|e| BuildError::WriteFailed {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(applied)
}

/// Inject the bundled scripts and compiled CSS into the working document.
pub fn inject(config: &Config) -> Result<(), BuildError> {
    let injections = [
        Injection::new(SCRIPT_MARKER, config.bundled_js.clone()),
        Injection::new(STYLE_MARKER, config.compiled_css.clone()),
    ];
    inject_file(&config.working_html, &injections, config.marker_mode)?;
    Ok(())
}
