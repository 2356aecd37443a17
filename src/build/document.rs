use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

// =============================================================================
// Episodes
// =============================================================================

/// One installment of a saga.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Positive ordinal, unique within the saga
    pub number: u32,
    /// Inner HTML of the fragment's first `<h2>`
    pub title: String,
    /// The raw fragment, inserted into the page untouched
    pub content: String,
    /// Where the fragment was read from
    pub source_path: PathBuf,
}

/// The episodes of one saga, ascending by ordinal.
///
/// Built once per run by the scanner and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    episodes: Vec<Episode>,
}

impl Catalog {
    /// Build a catalog, sorting episodes by ordinal.
    ///
    /// Callers are expected to have rejected duplicate ordinals already.
    pub fn new(mut episodes: Vec<Episode>) -> Self {
        episodes.sort_by_key(|e| e.number);
        Self { episodes }
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// The set of ordinals present, used for neighbor lookups.
    pub fn ordinals(&self) -> BTreeSet<u32> {
        self.episodes.iter().map(|e| e.number).collect()
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

// =============================================================================
// Title lookup
// =============================================================================

/// Titles recorded while episode pages are written, read back to render the
/// saga index.
#[derive(Debug, Clone, Default)]
pub struct TitleLookup {
    titles: BTreeMap<u32, String>,
}

impl TitleLookup {
    pub fn record(&mut self, number: u32, title: impl Into<String>) {
        self.titles.insert(number, title.into());
    }

    /// All recorded titles, ascending by ordinal.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.titles.iter().map(|(n, t)| (*n, t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }
}

// =============================================================================
// Cards
// =============================================================================

/// One page of a card collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// File stem, used as the URL segment
    pub stem: String,
    /// Inner HTML of the fragment's first `<h1>`
    pub title: String,
    pub content: String,
    pub source_path: PathBuf,
}
