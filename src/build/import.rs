//! Re-wrapping externally generated HTML.
//!
//! A rule-book export is a complete HTML document with its own head and body.
//! Its head keeps whatever the exporter put there; this site's stylesheet links
//! are appended so the page picks up the shared look once it is re-rendered
//! through the page template.

use std::path::{Path, PathBuf};

use super::fragment::{DocumentParts, split_document};

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("import source not found: {0}")]
    MissingFile(PathBuf),

    #[error("failed to read import {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read and restructure an exported document.
pub fn import_document(path: &Path, stylesheets: &[String]) -> Result<DocumentParts, ImportError> {
    if !path.is_file() {
        return Err(ImportError::MissingFile(path.to_path_buf()));
    }

    let html = std::fs::read_to_string(path).map_err(|e| ImportError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(splice_stylesheets(&html, stylesheets))
}

/// Split a document and append stylesheet links to its head. The result is
/// ready for the page template.
pub fn splice_stylesheets(html: &str, stylesheets: &[String]) -> DocumentParts {
    let parts = split_document(html);

    let mut head = parts.head;
    for href in stylesheets {
        if !head.is_empty() {
            head.push('\n');
        }
        head.push_str(&format!(r#"<link rel="stylesheet" href="{href}">"#));
    }

    DocumentParts {
        head,
        body: parts.body,
    }
}
