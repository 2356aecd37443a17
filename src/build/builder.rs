use std::path::{Path, PathBuf};

use crate::config::{CollectionConfig, ImportConfig, IndexLink, RootConfig, SagaConfig};

use super::assets::{AssetError, copy_dir};
use super::document::TitleLookup;
use super::import::{ImportError, import_document};
use super::nav::build_nav_bar;
use super::paths::{
    backup_dir, card_url, episode_url, resolve_path, section_url, staging_dir, url_to_output_path,
};
use super::render::{
    CardEntry, CollectionIndex, EpisodeEntry, RenderError, Renderer, SagaIndex, SectionLink,
    SiteContext,
};
use super::scan::{ScanError, scan_cards, scan_saga};
use super::stylesheet::{StylesheetError, compile_stylesheet};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("import error: {0}")]
    Import(#[from] ImportError),

    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to replace {output} with {staging}: {source}")]
    Swap {
        staging: PathBuf,
        output: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct BuildResult {
    pub output_dir: PathBuf,
    /// HTML pages written (episodes, cards, imports and every index)
    pub pages: usize,
    pub assets: usize,
    pub stylesheets: usize,
}

pub struct Builder {
    config: RootConfig,
    /// Base path for resolving relative paths (typically the config file's directory)
    base_path: PathBuf,
}

impl Builder {
    pub fn new(config: RootConfig, base_path: PathBuf) -> Self {
        Self { config, base_path }
    }

    /// Build the whole site.
    ///
    /// Without `site.atomic`, a failure leaves behind whatever was written
    /// before it. With it, everything goes to a staging directory that only
    /// replaces the output directory once the build has succeeded.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let output_dir = self.output_dir();

        if !self.config.site.atomic {
            return self.build_into(&output_dir);
        }

        let staging = staging_dir(&output_dir);
        remove_dir_if_exists(&staging).map_err(|e| BuildError::Write {
            path: staging.clone(),
            source: e,
        })?;

        match self.build_into(&staging) {
            Ok(mut result) => {
                swap_into_place(&staging, &output_dir)?;
                result.output_dir = output_dir;
                Ok(result)
            }
            Err(e) => {
                if let Err(cleanup) = remove_dir_if_exists(&staging) {
                    tracing::warn!(path = %staging.display(), error = %cleanup, "failed to remove staging directory");
                }
                Err(e)
            }
        }
    }

    fn build_into(&self, output_dir: &Path) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Load renderer (fails fast on a missing page template)
        // 2. Sagas: episode pages, then the saga index
        // 3. Card collections
        // 4. Imports
        // 5. Site index
        // 6. Static assets
        // 7. Stylesheets

        // Step 1: Load renderer
        let renderer = Renderer::new(
            &self.theme_path(),
            SiteContext {
                name: self.config.site.name.clone(),
                description: self.config.site.description.clone(),
                stylesheets: self.config.site.stylesheets.clone(),
            },
            self.config.theme.settings.clone(),
        )?;

        std::fs::create_dir_all(output_dir).map_err(|e| BuildError::Write {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

        let mut pages = 0;
        let mut sections = Vec::new();

        // Step 2: Sagas
        for saga in &self.config.sagas {
            pages += self.write_saga(saga, &renderer, output_dir)?;
            sections.push(SectionLink {
                name: saga.name.clone(),
                url: section_url(&saga.slug()),
                description: saga.description.clone(),
            });
        }

        // Step 3: Card collections
        for collection in &self.config.collections {
            pages += self.write_collection(collection, &renderer, output_dir)?;
            sections.push(SectionLink {
                name: collection.name.clone(),
                url: section_url(&collection.slug()),
                description: collection.description.clone(),
            });
        }

        // Step 4: Imports
        for import in &self.config.imports {
            pages += self.write_import(import, &renderer, output_dir)?;
            sections.push(SectionLink {
                name: import.name.clone(),
                url: section_url(&import.output),
                description: String::new(),
            });
        }

        // Step 5: Site index
        let head = renderer.render_head(&self.config.site.name)?;
        let body = renderer.render_site_index(&sections)?;
        write_page(output_dir, "/", &renderer.render_page(&head, &body)?)?;
        pages += 1;

        // Step 6: Static assets
        let mut assets = 0;
        for asset in &self.config.assets {
            let source = resolve_path(&self.base_path, &asset.source);
            let copied = copy_dir(&source, &output_dir.join(&asset.output))?;
            tracing::info!(source = %source.display(), files = copied, "copied assets");
            assets += copied;
        }

        // Step 7: Stylesheets
        for sheet in &self.config.stylesheets {
            let dest = compile_stylesheet(sheet, &self.base_path, output_dir)?;
            tracing::info!(output = %dest.display(), "compiled stylesheet");
        }

        Ok(BuildResult {
            output_dir: output_dir.to_path_buf(),
            pages,
            assets,
            stylesheets: self.config.stylesheets.len(),
        })
    }

    /// Write every episode page of a saga, then its index. Returns the
    /// number of pages written.
    fn write_saga(
        &self,
        saga: &SagaConfig,
        renderer: &Renderer,
        output_dir: &Path,
    ) -> Result<usize, BuildError> {
        let slug = saga.slug();
        let source = resolve_path(&self.base_path, &saga.source);
        let catalog = scan_saga(&source, saga.naming, &saga.fragment)?;
        if catalog.is_empty() {
            tracing::warn!(saga = %saga.name, source = %source.display(), "saga has no episodes");
        }
        tracing::info!(saga = %saga.name, episodes = catalog.len(), "scanned saga");

        let saga_url = section_url(&slug);
        let index_url = match saga.index_link {
            IndexLink::Saga => saga_url.clone(),
            IndexLink::Site => "/".to_string(),
        };

        let ordinals = catalog.ordinals();
        let mut titles = TitleLookup::default();

        for episode in catalog.episodes() {
            let nav = build_nav_bar(episode.number, &ordinals, &slug, &index_url);
            let nav_html = renderer.render_nav(&nav)?;

            let head = renderer.render_head(&format!(
                "{} {}: {}",
                saga.name, episode.number, episode.title
            ))?;
            let body = renderer.render_episode(&nav_html, &episode.content)?;

            let url = episode_url(&slug, episode.number);
            write_page(output_dir, &url, &renderer.render_page(&head, &body)?)?;
            titles.record(episode.number, episode.title.as_str());
        }

        // The index reads the titles recorded above, so it always comes last
        let index = SagaIndex {
            name: saga.name.clone(),
            url: saga_url.clone(),
            description: saga.description.clone(),
            episodes: titles
                .iter()
                .map(|(number, title)| EpisodeEntry {
                    number,
                    title: title.to_string(),
                    url: episode_url(&slug, number),
                })
                .collect(),
        };
        let head = renderer.render_head(&saga.name)?;
        let body = renderer.render_saga_index(&index)?;
        write_page(output_dir, &saga_url, &renderer.render_page(&head, &body)?)?;

        Ok(titles.len() + 1)
    }

    fn write_collection(
        &self,
        collection: &CollectionConfig,
        renderer: &Renderer,
        output_dir: &Path,
    ) -> Result<usize, BuildError> {
        let slug = collection.slug();
        let source = resolve_path(&self.base_path, &collection.source);
        let cards = scan_cards(&source)?;
        tracing::info!(collection = %collection.name, cards = cards.len(), "scanned collection");

        let mut entries = Vec::with_capacity(cards.len());
        for card in &cards {
            let url = card_url(&slug, &card.stem);
            tracing::debug!(card = %card.source_path.display(), url = %url, "rendering card");
            let head = renderer.render_head(&format!("{}: {}", collection.name, card.title))?;
            write_page(output_dir, &url, &renderer.render_page(&head, &card.content)?)?;
            entries.push(CardEntry {
                title: card.title.clone(),
                url,
            });
        }

        let index = CollectionIndex {
            name: collection.name.clone(),
            url: section_url(&slug),
            description: collection.description.clone(),
            cards: entries,
        };
        let head = renderer.render_head(&collection.name)?;
        let body = renderer.render_collection_index(&index)?;
        write_page(output_dir, &index.url, &renderer.render_page(&head, &body)?)?;

        Ok(cards.len() + 1)
    }

    fn write_import(
        &self,
        import: &ImportConfig,
        renderer: &Renderer,
        output_dir: &Path,
    ) -> Result<usize, BuildError> {
        let source = resolve_path(&self.base_path, &import.source);
        let page = import_document(&source, &self.config.site.stylesheets)?;
        tracing::info!(import = %import.name, source = %source.display(), "imported document");

        write_page(
            output_dir,
            &import.output,
            &renderer.render_page(&page.head, &page.body)?,
        )?;
        Ok(1)
    }

    /// Get the output directory path, resolved against base_path.
    fn output_dir(&self) -> PathBuf {
        resolve_path(&self.base_path, &self.config.site.output)
    }

    /// Get the theme path, resolved against base_path.
    fn theme_path(&self) -> PathBuf {
        resolve_path(&self.base_path, &self.config.theme.path)
    }
}

/// Write a rendered page to the file its URL maps to.
fn write_page(output_dir: &Path, url: &str, html: &str) -> Result<(), BuildError> {
    let path = url_to_output_path(url, output_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BuildError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(&path, html).map_err(|e| BuildError::Write {
        path: path.clone(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "wrote page");
    Ok(())
}

fn remove_dir_if_exists(dir: &Path) -> std::io::Result<()> {
    match std::fs::remove_dir_all(dir) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Move a finished staging directory into place, keeping the previous output
/// aside until the rename has gone through.
fn swap_into_place(staging: &Path, output: &Path) -> Result<(), BuildError> {
    let swap_err = |e: std::io::Error| BuildError::Swap {
        staging: staging.to_path_buf(),
        output: output.to_path_buf(),
        source: e,
    };

    let backup = backup_dir(output);
    remove_dir_if_exists(&backup).map_err(swap_err)?;

    let had_output = output.exists();
    if had_output {
        std::fs::rename(output, &backup).map_err(swap_err)?;
    }
    if let Err(e) = std::fs::rename(staging, output) {
        if had_output {
            // Put the old site back rather than leave nothing behind
            if let Err(restore) = std::fs::rename(&backup, output) {
                tracing::error!(
                    backup = %backup.display(),
                    output = %output.display(),
                    error = %restore,
                    "failed to restore previous output; it remains in the backup directory"
                );
            }
        }
        return Err(swap_err(e));
    }
    if had_output {
        remove_dir_if_exists(&backup).map_err(swap_err)?;
    }

    Ok(())
}
