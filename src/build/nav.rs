//! Episode navigation.
//!
//! Every episode page carries a nav bar with up to three links: the previous
//! episode, an index page, and the next episode. Neighbors are looked up by
//! ordinal, so a gap in the numbering (say 4 is missing) leaves episode 3
//! without a "Next" link and episode 5 without a "Previous" link.

use std::collections::BTreeSet;

use serde::Serialize;

use super::paths::episode_url;

/// A single navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

/// The nav bar of one episode page. Absent neighbors are rendered as empty
/// placeholders by the `nav.html` template so the index link stays centered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavBar {
    pub previous: Option<NavLink>,
    pub index: NavLink,
    pub next: Option<NavLink>,
}

/// Build the nav bar for `ordinal` given every ordinal in its saga.
///
/// `index_url` is the target of the always-present "Index" link; whether that
/// is the saga index or the site index is decided by configuration.
pub fn build_nav_bar(
    ordinal: u32,
    ordinals: &BTreeSet<u32>,
    slug: &str,
    index_url: &str,
) -> NavBar {
    let neighbor = |candidate: Option<u32>, title: &str| {
        candidate
            .filter(|n| ordinals.contains(n))
            .map(|n| NavLink {
                title: title.to_string(),
                url: episode_url(slug, n),
            })
    };

    NavBar {
        previous: neighbor(ordinal.checked_sub(1), "Previous"),
        index: NavLink {
            title: "Index".to_string(),
            url: index_url.to_string(),
        },
        next: neighbor(ordinal.checked_add(1), "Next"),
    }
}
