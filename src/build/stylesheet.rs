//! Stylesheet compilation through an external preprocessor.
//!
//! Each configured stylesheet is passed to the compiler (`lessc` by default)
//! as its last argument; whatever the compiler prints on stdout becomes the
//! output file. The call blocks until the compiler exits.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::config::StylesheetConfig;

use super::paths::resolve_path;

#[derive(thiserror::Error, Debug)]
pub enum StylesheetError {
    #[error("stylesheet source not found: {0}")]
    MissingSource(PathBuf),

    #[error("failed to run `{command}` for {path}: {source}")]
    Spawn {
        command: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("`{command}` failed for {path} ({status}): {stderr}")]
    ExternalProcess {
        command: String,
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to write compiled stylesheet {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Compile one stylesheet into the output directory, returning the written
/// path.
///
/// The compiler runs with `base_path` (the config file's directory) as its
/// working directory so relative `@import`s resolve the same way they would
/// by hand.
pub fn compile_stylesheet(
    sheet: &StylesheetConfig,
    base_path: &Path,
    output_dir: &Path,
) -> Result<PathBuf, StylesheetError> {
    let source = resolve_path(base_path, &sheet.source);
    if !source.is_file() {
        return Err(StylesheetError::MissingSource(source));
    }

    let mut command = Command::new(&sheet.command);
    command.args(&sheet.args).arg(&source);
    if !base_path.as_os_str().is_empty() {
        command.current_dir(base_path);
    }

    tracing::debug!(command = %sheet.command, source = %source.display(), "compiling stylesheet");
    let output = command.output().map_err(|e| StylesheetError::Spawn {
        command: sheet.command.clone(),
        path: source.clone(),
        source: e,
    })?;

    if !output.status.success() {
        return Err(StylesheetError::ExternalProcess {
            command: sheet.command.clone(),
            path: source,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let dest = output_dir.join(&sheet.output);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StylesheetError::Write {
            path: dest.clone(),
            source: e,
        })?;
    }
    std::fs::write(&dest, &output.stdout).map_err(|e| StylesheetError::Write {
        path: dest.clone(),
        source: e,
    })?;

    Ok(dest)
}
