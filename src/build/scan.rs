//! Content discovery for sagas and card collections.
//!
//! A saga directory holds one entry per episode: either a directory
//! containing a fragment file (`3/partial.html`) or a fragment file named by
//! its ordinal (`3.html`). Entries named `index` and hidden entries are
//! skipped. A card collection directory holds one `*.html` fragment per card.

use std::fs::DirEntry;
use std::path::{Path, PathBuf};

use crate::config::OrdinalNaming;

use super::document::{Card, Catalog, Episode};
use super::fragment::{HeadingLevel, extract_title};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("source path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("source path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("fragment file not found: {0}")]
    MissingFile(PathBuf),

    #[error("failed to read fragment {path}: {source}")]
    ReadFragment {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no <{heading}> title found in {path}")]
    MissingTitle { path: PathBuf, heading: HeadingLevel },

    #[error("cannot read an episode number from {path} (expected {expected})")]
    InvalidEntryName {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("episode {ordinal} appears twice: {first} and {second}")]
    DuplicateOrdinal {
        ordinal: u32,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("card '{stem}' appears twice: {first} and {second}")]
    DuplicateCard {
        stem: String,
        first: PathBuf,
        second: PathBuf,
    },
}

// =============================================================================
// Ordinals
// =============================================================================

/// Read an episode ordinal from an entry stem.
///
/// Leading zeros are insignificant. Ordinal 0 is rejected.
pub fn parse_ordinal(stem: &str, naming: OrdinalNaming) -> Option<u32> {
    let digits_end = stem
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(stem.len());
    if digits_end == 0 {
        return None;
    }

    let (digits, rest) = stem.split_at(digits_end);
    let valid_rest = match naming {
        OrdinalNaming::Strict => rest.is_empty(),
        OrdinalNaming::Prefixed => rest.is_empty() || rest.starts_with(['-', '_']),
    };
    if !valid_rest {
        return None;
    }

    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

fn expected_naming(naming: OrdinalNaming) -> &'static str {
    match naming {
        OrdinalNaming::Strict => "a name like `12` or `12.html`",
        OrdinalNaming::Prefixed => "a name like `12-title` or `12-title.html`",
    }
}

// =============================================================================
// Sagas
// =============================================================================

/// Scan a saga directory into its ordered catalog.
///
/// `fragment_name` is the file read inside per-episode directories.
pub fn scan_saga(
    dir: &Path,
    naming: OrdinalNaming,
    fragment_name: &str,
) -> Result<Catalog, ScanError> {
    let mut episodes = Vec::new();

    for entry in list_entries(dir)? {
        let path = entry.path();
        let is_dir = path.is_dir();

        let (stem, fragment_path) = if is_dir {
            let name = entry.file_name().to_string_lossy().into_owned();
            (name, path.join(fragment_name))
        } else if is_html(&path) {
            (file_stem(&path), path.clone())
        } else {
            tracing::warn!(path = %path.display(), "skipping non-HTML file in saga directory");
            continue;
        };

        if stem == "index" {
            continue;
        }

        let number = parse_ordinal(&stem, naming).ok_or_else(|| ScanError::InvalidEntryName {
            path: path.clone(),
            expected: expected_naming(naming),
        })?;

        let (content, title) = read_fragment(&fragment_path, HeadingLevel::H2)?;
        episodes.push(Episode {
            number,
            title,
            content,
            source_path: fragment_path,
        });
    }

    // Sort by ordinal, then path, so duplicate reports are deterministic
    episodes.sort_by(|a, b| {
        a.number
            .cmp(&b.number)
            .then_with(|| a.source_path.cmp(&b.source_path))
    });
    if let Some(pair) = episodes.windows(2).find(|w| w[0].number == w[1].number) {
        return Err(ScanError::DuplicateOrdinal {
            ordinal: pair[0].number,
            first: pair[0].source_path.clone(),
            second: pair[1].source_path.clone(),
        });
    }

    Ok(Catalog::new(episodes))
}

// =============================================================================
// Card collections
// =============================================================================

/// Scan a card collection directory. Cards are titled by their first `<h1>`
/// and ordered by file stem.
pub fn scan_cards(dir: &Path) -> Result<Vec<Card>, ScanError> {
    let mut cards = Vec::new();

    for entry in list_entries(dir)? {
        let path = entry.path();
        if path.is_dir() || !is_html(&path) {
            tracing::warn!(path = %path.display(), "skipping non-HTML entry in card collection");
            continue;
        }

        let stem = file_stem(&path);
        if stem == "index" {
            continue;
        }

        let (content, title) = read_fragment(&path, HeadingLevel::H1)?;
        cards.push(Card {
            stem,
            title,
            content,
            source_path: path,
        });
    }

    cards.sort_by(|a, b| {
        a.stem
            .cmp(&b.stem)
            .then_with(|| a.source_path.cmp(&b.source_path))
    });
    if let Some(pair) = cards.windows(2).find(|w| w[0].stem == w[1].stem) {
        return Err(ScanError::DuplicateCard {
            stem: pair[0].stem.clone(),
            first: pair[0].source_path.clone(),
            second: pair[1].source_path.clone(),
        });
    }

    Ok(cards)
}

// =============================================================================
// Helpers
// =============================================================================

/// List the visible entries of a directory, sorted by name.
fn list_entries(dir: &Path) -> Result<Vec<DirEntry>, ScanError> {
    if !dir.exists() {
        return Err(ScanError::PathNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut visible = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::ReadEntry {
            path: dir.to_path_buf(),
            source: e,
        })?;

        // Skip hidden files and directories
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        visible.push(entry);
    }

    visible.sort_by_key(|e| e.file_name());
    Ok(visible)
}

/// Read a fragment and extract its title.
fn read_fragment(path: &Path, level: HeadingLevel) -> Result<(String, String), ScanError> {
    if !path.is_file() {
        return Err(ScanError::MissingFile(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ScanError::ReadFragment {
        path: path.to_path_buf(),
        source: e,
    })?;

    let title = extract_title(&content, level).ok_or_else(|| ScanError::MissingTitle {
        path: path.to_path_buf(),
        heading: level,
    })?;

    Ok((content, title))
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_parse_ordinal_strict() {
        assert_eq!(parse_ordinal("9", OrdinalNaming::Strict), Some(9));
        assert_eq!(parse_ordinal("09", OrdinalNaming::Strict), Some(9));
        assert_eq!(parse_ordinal("10", OrdinalNaming::Strict), Some(10));
        assert_eq!(parse_ordinal("0", OrdinalNaming::Strict), None);
        assert_eq!(parse_ordinal("ep9", OrdinalNaming::Strict), None);
        assert_eq!(parse_ordinal("9-heist", OrdinalNaming::Strict), None);
        assert_eq!(parse_ordinal("", OrdinalNaming::Strict), None);
    }

    #[test]
    fn test_parse_ordinal_prefixed() {
        assert_eq!(parse_ordinal("09-the-heist", OrdinalNaming::Prefixed), Some(9));
        assert_eq!(parse_ordinal("12_finale", OrdinalNaming::Prefixed), Some(12));
        assert_eq!(parse_ordinal("3-part-2", OrdinalNaming::Prefixed), Some(3));
        assert_eq!(parse_ordinal("7", OrdinalNaming::Prefixed), Some(7));
        assert_eq!(parse_ordinal("7b", OrdinalNaming::Prefixed), None);
        assert_eq!(parse_ordinal("part-2", OrdinalNaming::Prefixed), None);
    }

    #[test]
    fn test_scan_saga_directory_layout_sorted_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for (n, title) in [(1, "One"), (2, "Two"), (9, "Nine"), (10, "Ten")] {
            write(
                &dir.path().join(n.to_string()).join("partial.html"),
                &format!("<h2>{title}</h2><p>text</p>"),
            );
        }
        // Left behind by an older in-place build; never an episode
        write(&dir.path().join("index.html"), "<p>old index</p>");

        let catalog = scan_saga(dir.path(), OrdinalNaming::Strict, "partial.html").unwrap();
        let got: Vec<(u32, &str)> = catalog
            .episodes()
            .iter()
            .map(|e| (e.number, e.title.as_str()))
            .collect();
        assert_eq!(got, vec![(1, "One"), (2, "Two"), (9, "Nine"), (10, "Ten")]);
    }

    #[test]
    fn test_scan_saga_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("02.html"), "<h2>B</h2>");
        write(&dir.path().join("1.html"), "<h2>A</h2>");
        write(&dir.path().join(".DS_Store"), "");
        write(&dir.path().join("notes.txt"), "not an episode");

        let catalog = scan_saga(dir.path(), OrdinalNaming::Strict, "partial.html").unwrap();
        let numbers: Vec<u32> = catalog.episodes().iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(catalog.episodes()[1].content, "<h2>B</h2>");
    }

    #[test]
    fn test_scan_saga_duplicate_padded_ordinal() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("09.html"), "<h2>Padded</h2>");
        write(&dir.path().join("9.html"), "<h2>Plain</h2>");

        let err = scan_saga(dir.path(), OrdinalNaming::Strict, "partial.html").unwrap_err();
        match err {
            ScanError::DuplicateOrdinal { ordinal, first, second } => {
                assert_eq!(ordinal, 9);
                assert!(first.ends_with("09.html"));
                assert!(second.ends_with("9.html"));
            }
            other => panic!("expected DuplicateOrdinal, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_saga_missing_title_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("1.html"), "<h2>Fine</h2>");
        write(&dir.path().join("2.html"), "<p>forgot the heading</p>");

        let err = scan_saga(dir.path(), OrdinalNaming::Strict, "partial.html").unwrap_err();
        match err {
            ScanError::MissingTitle { path, heading } => {
                assert!(path.ends_with("2.html"));
                assert_eq!(heading, HeadingLevel::H2);
            }
            other => panic!("expected MissingTitle, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_saga_missing_fragment_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("4")).unwrap();

        let err = scan_saga(dir.path(), OrdinalNaming::Strict, "partial.html").unwrap_err();
        assert!(matches!(err, ScanError::MissingFile(p) if p.ends_with("4/partial.html")));
    }

    #[test]
    fn test_scan_saga_invalid_name() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("bonus.html"), "<h2>Bonus</h2>");

        let err = scan_saga(dir.path(), OrdinalNaming::Strict, "partial.html").unwrap_err();
        assert!(matches!(err, ScanError::InvalidEntryName { .. }));
    }

    #[test]
    fn test_scan_saga_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_saga(&dir.path().join("nope"), OrdinalNaming::Strict, "partial.html")
            .unwrap_err();
        assert!(matches!(err, ScanError::PathNotFound(_)));
    }

    #[test]
    fn test_scan_cards() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("ice-wall.html"), "<h1>Ice Wall</h1><p>Blocks.</p>");
        write(&dir.path().join("fire-bolt.html"), "<h1>Fire Bolt</h1><h2>Cost</h2>");
        write(&dir.path().join("index.html"), "<h1>Old Index</h1>");

        let cards = scan_cards(dir.path()).unwrap();
        let got: Vec<(&str, &str)> = cards
            .iter()
            .map(|c| (c.stem.as_str(), c.title.as_str()))
            .collect();
        assert_eq!(got, vec![("fire-bolt", "Fire Bolt"), ("ice-wall", "Ice Wall")]);
    }

    #[test]
    fn test_scan_cards_requires_h1() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("odd.html"), "<h2>Only h2</h2>");

        let err = scan_cards(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ScanError::MissingTitle { heading: HeadingLevel::H1, .. }
        ));
    }

    #[test]
    fn test_scan_cards_same_stem_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("bolt.html"), "<h1>Bolt</h1>");
        write(&dir.path().join("bolt.htm"), "<h1>Bolt Again</h1>");

        let err = scan_cards(dir.path()).unwrap_err();
        match err {
            ScanError::DuplicateCard { stem, first, second } => {
                assert_eq!(stem, "bolt");
                assert!(first.ends_with("bolt.htm"));
                assert!(second.ends_with("bolt.html"));
            }
            other => panic!("expected DuplicateCard, got {other:?}"),
        }
    }
}
