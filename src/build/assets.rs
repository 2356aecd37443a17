//! Verbatim copying of static asset directories.

use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("asset directory not found: {0}")]
    MissingSource(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Recursively copy `src` into `dst`, returning the number of files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize, AssetError> {
    if !src.is_dir() {
        return Err(AssetError::MissingSource(src.to_path_buf()));
    }

    std::fs::create_dir_all(dst).map_err(|e| AssetError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source: e,
    })?;

    let entries = std::fs::read_dir(src).map_err(|e| AssetError::ReadDir {
        path: src.to_path_buf(),
        source: e,
    })?;

    let mut copied = 0;
    for entry in entries {
        let entry = entry.map_err(|e| AssetError::ReadDir {
            path: src.to_path_buf(),
            source: e,
        })?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if from.is_dir() {
            copied += copy_dir(&from, &to)?;
        } else {
            std::fs::copy(&from, &to).map_err(|e| AssetError::Copy {
                from: from.clone(),
                to: to.clone(),
                source: e,
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}
