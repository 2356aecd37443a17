//! Configuration type definitions.
//!
//! This module contains all the data structures used in sagasite configuration files.
//! These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Root config
// =============================================================================

/// Root site configuration - defines the whole generated site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootConfig {
    pub site: SiteConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub sagas: Vec<SagaConfig>,
    /// Card collections (fragments titled by their `<h1>`)
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
    /// Externally generated HTML documents re-wrapped in the site template
    #[serde(default)]
    pub imports: Vec<ImportConfig>,
    /// Static directories copied verbatim
    #[serde(default)]
    pub assets: Vec<AssetConfig>,
    /// Stylesheets run through an external compiler
    #[serde(default)]
    pub stylesheets: Vec<StylesheetConfig>,
}

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    /// Raw HTML shown on the site index
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Stylesheet hrefs linked from every page head
    #[serde(default = "default_stylesheets")]
    pub stylesheets: Vec<String>,
    /// Build into a staging directory and swap it in only on success
    #[serde(default)]
    pub atomic: bool,
}

fn default_output() -> PathBuf {
    PathBuf::from("_site")
}

fn default_stylesheets() -> Vec<String> {
    vec!["/style.css".to_string()]
}

// =============================================================================
// Theme configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Directory containing `templates/page.html`
    #[serde(default = "default_theme_path")]
    pub path: PathBuf,
    /// Arbitrary settings passed to templates as `theme.*`
    #[serde(default)]
    pub settings: serde_json::Value,
}

fn default_theme_path() -> PathBuf {
    PathBuf::from("theme")
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            path: default_theme_path(),
            settings: serde_json::Value::Null,
        }
    }
}

// =============================================================================
// Sagas
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagaConfig {
    /// Display name, also used in page titles
    pub name: String,
    /// URL segment (defaults to a slugified name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Directory holding the episode fragments
    pub source: PathBuf,
    /// Raw HTML shown above the episode list
    #[serde(default)]
    pub description: String,
    /// Fragment file name inside per-episode directories
    #[serde(default = "default_fragment")]
    pub fragment: String,
    #[serde(default)]
    pub naming: OrdinalNaming,
    #[serde(default)]
    pub index_link: IndexLink,
}

fn default_fragment() -> String {
    "partial.html".to_string()
}

/// How an episode's ordinal is read from its entry name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrdinalNaming {
    /// The whole stem is digits: `9`, `09`, `12.html`
    #[default]
    Strict,
    /// The stem starts with digits, then `-` or `_` and a slug: `09-the-heist`
    Prefixed,
}

/// Where the "Index" link of an episode's nav bar points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexLink {
    /// The saga's own index page
    #[default]
    Saga,
    /// The site index page
    Site,
}

// =============================================================================
// Card collections
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub source: PathBuf,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Imports, assets and stylesheets
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub name: String,
    /// The exported HTML document
    pub source: PathBuf,
    /// URL path under the output directory (e.g. "rules" -> /rules/index.html)
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    pub source: PathBuf,
    /// Directory under the output directory
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylesheetConfig {
    pub source: PathBuf,
    /// File under the output directory
    pub output: PathBuf,
    #[serde(default = "default_stylesheet_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_stylesheet_command() -> String {
    "lessc".to_string()
}

// =============================================================================
// Slugs
// =============================================================================

/// Derive a URL-safe slug from a display name.
///
/// "Donut Saga" -> "donut-saga", "Praxis!" -> "praxis"
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

impl SagaConfig {
    pub fn slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.name))
    }
}

impl CollectionConfig {
    pub fn slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.name))
    }
}
