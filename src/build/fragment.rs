//! HTML fragment inspection.
//!
//! Fragments are parsed into a document tree with `scraper` rather than
//! pattern-matched, so attributes, whitespace and line breaks inside a heading
//! don't hide the title.

use std::fmt;

use scraper::{Html, Selector};

/// The heading that carries a fragment's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Card collections
    H1,
    /// Saga episodes
    H2,
}

impl HeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Extract the title from the first heading of the given level.
///
/// Returns the heading's inner HTML, trimmed. Only the first heading counts;
/// later ones are ignored. An empty heading counts as no title.
pub fn extract_title(html: &str, level: HeadingLevel) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(level.tag()).ok()?;
    let heading = fragment.select(&selector).next()?;

    let title = heading.inner_html().trim().to_string();
    (!title.is_empty()).then_some(title)
}

/// The inner HTML of a full document's `<head>` and `<body>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentParts {
    pub head: String,
    pub body: String,
}

/// Split a complete HTML document into its head and body contents.
///
/// The HTML parser always synthesizes `<head>` and `<body>`, so a document
/// missing either yields an empty string for that part.
pub fn split_document(html: &str) -> DocumentParts {
    let document = Html::parse_document(html);

    let inner = |tag: &str| {
        Selector::parse(tag)
            .ok()
            .and_then(|selector| document.select(&selector).next().map(|el| el.inner_html()))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    DocumentParts {
        head: inner("head"),
        body: inner("body"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_h2() {
        let html = "<p>intro</p>\n<h2>The Heist</h2>\n<p>body</p>";
        assert_eq!(
            extract_title(html, HeadingLevel::H2),
            Some("The Heist".to_string())
        );
    }

    #[test]
    fn test_extract_title_first_match_wins() {
        let html = "<h2>First</h2><h2>Second</h2>";
        assert_eq!(extract_title(html, HeadingLevel::H2), Some("First".to_string()));
    }

    #[test]
    fn test_extract_title_tolerates_formatting() {
        let html = "<h2 class=\"title\">\n   Across the  Sea\n</h2>";
        assert_eq!(
            extract_title(html, HeadingLevel::H2),
            Some("Across the  Sea".to_string())
        );
    }

    #[test]
    fn test_extract_title_keeps_inner_markup() {
        let html = "<h2>Tom &amp; <em>Jerry</em></h2>";
        assert_eq!(
            extract_title(html, HeadingLevel::H2),
            Some("Tom &amp; <em>Jerry</em>".to_string())
        );
    }

    #[test]
    fn test_extract_title_wrong_level() {
        let html = "<h1>Card</h1><p>text</p>";
        assert_eq!(extract_title(html, HeadingLevel::H2), None);
        assert_eq!(extract_title(html, HeadingLevel::H1), Some("Card".to_string()));
    }

    #[test]
    fn test_extract_title_missing_or_empty() {
        assert_eq!(extract_title("<p>no heading</p>", HeadingLevel::H2), None);
        assert_eq!(extract_title("<h2>  </h2>", HeadingLevel::H2), None);
    }

    #[test]
    fn test_split_document() {
        let html = r#"<!DOCTYPE html>
<html>
  <head><title>Rules</title></head>
  <body><h1>Combat</h1><p>Roll d20.</p></body>
</html>"#;
        let parts = split_document(html);
        assert_eq!(parts.head, "<title>Rules</title>");
        assert_eq!(parts.body, "<h1>Combat</h1><p>Roll d20.</p>");
    }
}
