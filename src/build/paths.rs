//! Path and URL conversion utilities.
//!
//! This module handles conversions between:
//! - Configured paths (relative to the config file's directory)
//! - URL paths (the URL at which a page will be served)
//! - Output file paths (where files are written in the output directory)

use std::path::{Path, PathBuf};

/// URL of a saga's or collection's index page.
///
/// `section_url("praxis") => "/praxis"`
pub fn section_url(slug: &str) -> String {
    format!("/{}", slug.trim_matches('/'))
}

/// URL of one episode page. Ordinals are always written unpadded, so
/// `09.html` and `9.html` both land on `/praxis/9`.
pub fn episode_url(slug: &str, ordinal: u32) -> String {
    format!("{}/{}", section_url(slug), ordinal)
}

/// URL of one card page.
pub fn card_url(slug: &str, stem: &str) -> String {
    format!("{}/{}", section_url(slug), stem)
}

/// Convert a URL path to an output file path.
///
/// Every page becomes a directory holding an `index.html`.
///
/// # Examples
/// ```ignore
/// url_to_output_path("/praxis/3", output_dir) => output_dir/praxis/3/index.html
/// url_to_output_path("/", output_dir) => output_dir/index.html
/// ```
pub fn url_to_output_path(url_path: &str, output_dir: &Path) -> PathBuf {
    let url_path = url_path.trim_matches('/');

    if url_path.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(url_path).join("index.html")
    }
}

/// Resolve a configured path against the base path unless it is absolute.
pub fn resolve_path(base_path: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}

/// The sibling directory an atomic build writes into before swapping.
///
/// `/site/_site` -> `/site/_site.staging`
pub fn staging_dir(output_dir: &Path) -> PathBuf {
    sibling_with_suffix(output_dir, "staging")
}

/// The sibling directory the previous output is moved to during a swap.
pub fn backup_dir(output_dir: &Path) -> PathBuf {
    sibling_with_suffix(output_dir, "previous")
}

fn sibling_with_suffix(dir: &Path, suffix: &str) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "_site".to_string());
    dir.with_file_name(format!("{name}.{suffix}"))
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_section_and_episode_urls() {
        assert_eq!(section_url("praxis"), "/praxis");
        assert_eq!(section_url("/praxis/"), "/praxis");
        assert_eq!(episode_url("praxis", 9), "/praxis/9");
        assert_eq!(card_url("cards", "fire-bolt"), "/cards/fire-bolt");
    }

    #[test]
    fn test_url_to_output_path_page() {
        let output = Path::new("/site");
        assert_eq!(
            url_to_output_path("/praxis/3", output),
            PathBuf::from("/site/praxis/3/index.html")
        );
        assert_eq!(
            url_to_output_path("rules", output),
            PathBuf::from("/site/rules/index.html")
        );
    }

    #[test]
    fn test_url_to_output_path_root() {
        let output = Path::new("/site");
        assert_eq!(
            url_to_output_path("/", output),
            PathBuf::from("/site/index.html")
        );
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/project");
        assert_eq!(
            resolve_path(base, Path::new("praxis")),
            PathBuf::from("/project/praxis")
        );
        assert_eq!(
            resolve_path(base, Path::new("/elsewhere/praxis")),
            PathBuf::from("/elsewhere/praxis")
        );
    }

    #[test]
    fn test_staging_dir() {
        assert_eq!(
            staging_dir(Path::new("/project/_site")),
            PathBuf::from("/project/_site.staging")
        );
        assert_eq!(
            backup_dir(Path::new("/project/_site")),
            PathBuf::from("/project/_site.previous")
        );
    }

    #[test]
    fn test_base_path_from_config() {
        assert_eq!(
            base_path_from_config(Path::new("/project/sagasite.yaml")),
            PathBuf::from("/project")
        );
        assert_eq!(
            base_path_from_config(Path::new("sagasite.yaml")),
            PathBuf::from("")
        );
    }
}
