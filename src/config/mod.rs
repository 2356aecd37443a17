//! Configuration loading and types for sagasite.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files and the environment (`load`)

mod load;
mod types;

use std::collections::HashSet;

pub use types::{
    AssetConfig, CollectionConfig, ImportConfig, IndexLink, OrdinalNaming, RootConfig, SagaConfig,
    SiteConfig, StylesheetConfig, ThemeConfig,
};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("config file not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("{0}")]
    Validation(String),
}

// =============================================================================
// Validation
// =============================================================================

impl RootConfig {
    /// Check invariants serde can't express: every saga and collection needs a
    /// non-empty slug, no two of them may share one, and imports must not
    /// write over any of their pages.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'site.name' must not be empty".to_string(),
            ));
        }

        let slugs = self
            .sagas
            .iter()
            .map(|s| (&s.name, s.slug()))
            .chain(self.collections.iter().map(|c| (&c.name, c.slug())));

        let mut seen = HashSet::new();
        for (name, slug) in slugs {
            if slug.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "invalid config: '{name}' has an empty slug (set 'slug' explicitly)"
                )));
            }
            if !seen.insert(slug.clone()) {
                return Err(ConfigError::Validation(format!(
                    "invalid config: slug '{slug}' is used more than once"
                )));
            }
        }

        // Imports may not write over a page that something else owns
        let mut outputs = HashSet::new();
        for import in &self.imports {
            let output = import.output.trim_matches('/');
            if output.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "invalid config: import '{}' would overwrite the site index",
                    import.name
                )));
            }
            if let Some(slug) = seen
                .iter()
                .find(|slug| output == slug.as_str() || output.starts_with(&format!("{slug}/")))
            {
                return Err(ConfigError::Validation(format!(
                    "invalid config: import '{}' output '{output}' collides with section '{slug}'",
                    import.name
                )));
            }
            if !outputs.insert(output) {
                return Err(ConfigError::Validation(format!(
                    "invalid config: import output '{output}' is used more than once"
                )));
            }
        }

        Ok(())
    }
}
