//! Shared navigation types.
//!
//! `NavEntry`, `AnchorLink` and `LanguageConfig` are loaded from
//! `docs-nav.toml` and never change afterwards. `ResolvedPageIdentity` is
//! derived from a URL path on every render and never stored.

use serde::{Deserialize, Serialize};

/// A logical navigation destination.
///
/// `id` is stable across languages; `href` and `text` are per-language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavEntry {
    pub id: String,
    pub href: String,
    pub text: String,
}

impl NavEntry {
    pub fn new(id: &str, href: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            href: href.to_string(),
            text: text.to_string(),
        }
    }
}

/// An in-page anchor (`#features`) shown on the home page when the
/// navigation collapses to local anchors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorLink {
    pub href: String,
    pub text: String,
}

impl AnchorLink {
    pub fn new(href: &str, text: &str) -> Self {
        Self {
            href: href.to_string(),
            text: text.to_string(),
        }
    }
}

/// Navigation for one language.
///
/// Link order is the left-to-right menu order. Every language must define
/// the same set of ids, each exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageConfig {
    /// Label shown in the language switcher (`EN`, `RU`).
    pub name: String,
    /// File-name marker for pages in this language, placed right before the
    /// extension (`docs_ru.html` has suffix `_ru`). Empty for the default
    /// language.
    #[serde(default)]
    pub suffix: String,
    pub links: Vec<NavEntry>,
    /// Local anchors for the collapsed home page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<AnchorLink>,
}

impl LanguageConfig {
    /// Find the entry with the given id.
    pub fn entry(&self, id: &str) -> Option<&NavEntry> {
        self.links.iter().find(|link| link.id == id)
    }
}

/// Who the current page is, derived from its URL path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPageIdentity {
    /// Last path segment, or the home page when the path ends in `/`.
    pub file_name: String,
    /// Language code (`en`, `ru`).
    pub language: String,
    /// Stable page id, `None` for pages missing from the page mapping.
    pub page_id: Option<String>,
}
