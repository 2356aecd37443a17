pub mod build;
pub mod clean;
pub mod init;

use std::path::{Path, PathBuf};

/// Make a config file path absolute against the working directory, so the
/// base path derived from it is never empty.
pub(crate) fn absolute_config_path(config_file: Option<&Path>) -> Result<PathBuf, anyhow::Error> {
    let config_path = config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| "sagasite.yaml".into());

    Ok(if config_path.is_relative() {
        std::env::current_dir()?.join(&config_path)
    } else {
        config_path
    })
}
