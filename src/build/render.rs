use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::{Context, Tera};

use super::nav::NavBar;

/// The page template every output file is wrapped in. It must contain the
/// `{{ head }}` and `{{ body }}` placeholders.
pub const PAGE_TEMPLATE: &str = "page.html";

/// Partials shipped with the binary. A theme overrides one by placing a file
/// with the same name next to its page template.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("head.html", include_str!("templates/head.html")),
    ("nav.html", include_str!("templates/nav.html")),
    ("episode.html", include_str!("templates/episode.html")),
    ("saga_index.html", include_str!("templates/saga_index.html")),
    ("collection_index.html", include_str!("templates/collection_index.html")),
    ("site_index.html", include_str!("templates/site_index.html")),
];

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("page template not found: {0}")]
    MissingTemplate(PathBuf),
}

/// The template renderer, wrapping Tera.
///
/// Built once per run and handed to whatever needs it; nothing is cached
/// behind its back.
pub struct Renderer {
    tera: Tera,
    site: SiteContext,
    theme: serde_json::Value,
}

impl Renderer {
    /// Create a new renderer loading templates from the given theme directory.
    ///
    /// Fails if `<theme>/templates/page.html` is missing; there is no fallback
    /// page template.
    pub fn new(
        theme_path: &Path,
        site: SiteContext,
        theme: serde_json::Value,
    ) -> Result<Self, RenderError> {
        let templates_path = theme_path.join("templates");
        let page_path = templates_path.join(PAGE_TEMPLATE);
        if !page_path.is_file() {
            return Err(RenderError::MissingTemplate(page_path));
        }

        let mut tera = Tera::default();
        // Fragments are trusted HTML and must pass through untouched
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(BUILTIN_TEMPLATES.iter().copied())?;

        let mut files = vec![(page_path, Some(PAGE_TEMPLATE))];
        for (name, _) in BUILTIN_TEMPLATES {
            let override_path = templates_path.join(name);
            if override_path.is_file() {
                tracing::debug!(template = name, "using theme override");
                files.push((override_path, Some(*name)));
            }
        }
        tera.add_template_files(files)?;

        Ok(Self { tera, site, theme })
    }

    /// Wrap a head and body fragment in the page template.
    ///
    /// Both placeholders are filled in a single pass, so a fragment that
    /// happens to contain `{{ body }}` is emitted literally.
    pub fn render_page(&self, head: &str, body: &str) -> Result<String, RenderError> {
        let mut context = self.base_context();
        context.insert("head", head);
        context.insert("body", body);
        self.render(PAGE_TEMPLATE, &context)
    }

    /// Render the head fragment: title plus the site's stylesheet links.
    pub fn render_head(&self, title: &str) -> Result<String, RenderError> {
        let mut context = self.base_context();
        context.insert("title", title);
        self.render("head.html", &context)
    }

    pub fn render_nav(&self, nav: &NavBar) -> Result<String, RenderError> {
        let mut context = self.base_context();
        context.insert("nav", nav);
        self.render("nav.html", &context)
    }

    /// Render an episode body: the nav bar above and below the fragment.
    pub fn render_episode(&self, nav_html: &str, content: &str) -> Result<String, RenderError> {
        let mut context = self.base_context();
        context.insert("nav", nav_html);
        context.insert("content", content);
        self.render("episode.html", &context)
    }

    pub fn render_saga_index(&self, saga: &SagaIndex) -> Result<String, RenderError> {
        let mut context = self.base_context();
        context.insert("saga", saga);
        self.render("saga_index.html", &context)
    }

    pub fn render_collection_index(
        &self,
        collection: &CollectionIndex,
    ) -> Result<String, RenderError> {
        let mut context = self.base_context();
        context.insert("collection", collection);
        self.render("collection_index.html", &context)
    }

    pub fn render_site_index(&self, sections: &[SectionLink]) -> Result<String, RenderError> {
        let mut context = self.base_context();
        context.insert("sections", sections);
        self.render("site_index.html", &context)
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("theme", &self.theme);
        context
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, RenderError> {
        Ok(self.tera.render(template, context)?)
    }
}

/// Site-level information.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub name: String,
    pub description: String,
    pub stylesheets: Vec<String>,
}

/// Context for a saga's index page.
#[derive(Debug, Serialize)]
pub struct SagaIndex {
    pub name: String,
    pub url: String,
    pub description: String,
    pub episodes: Vec<EpisodeEntry>,
}

/// One line of a saga index.
#[derive(Debug, Serialize)]
pub struct EpisodeEntry {
    pub number: u32,
    pub title: String,
    pub url: String,
}

/// Context for a card collection's index page.
#[derive(Debug, Serialize)]
pub struct CollectionIndex {
    pub name: String,
    pub url: String,
    pub description: String,
    pub cards: Vec<CardEntry>,
}

#[derive(Debug, Serialize)]
pub struct CardEntry {
    pub title: String,
    pub url: String,
}

/// A saga, collection or import listed on the site index.
#[derive(Debug, Clone, Serialize)]
pub struct SectionLink {
    pub name: String,
    pub url: String,
    pub description: String,
}
