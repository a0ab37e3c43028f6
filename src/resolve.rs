//! Active-link resolution and cross-language mapping.
//!
//! Both resolvers are pure lookups over the [`LinkTable`]. Neither can fail:
//! a page without an id simply has no active link, and its language switcher
//! points back at the page itself.

use crate::table::LinkTable;
use crate::types::{LanguageConfig, NavEntry, ResolvedPageIdentity};
use serde::Serialize;

/// A navigation entry paired with its active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLink<'a> {
    pub entry: &'a NavEntry,
    pub is_active: bool,
}

/// Pair every entry of `language` with whether it is the current page.
///
/// Keeps the configured link order. At most one entry is active since ids
/// are unique; none is when `page_id` is `None`.
pub fn active_links<'a>(page_id: Option<&str>, language: &'a LanguageConfig) -> Vec<ResolvedLink<'a>> {
    language
        .links
        .iter()
        .map(|entry| ResolvedLink {
            entry,
            is_active: page_id == Some(entry.id.as_str()),
        })
        .collect()
}

/// Targets of the two language switcher buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSwitch {
    pub current_language: String,
    pub current_name: String,
    pub current_href: String,
    pub other_language: String,
    pub other_name: String,
    pub other_href: String,
}

/// Map the current page onto its equivalent in the other language.
///
/// Both hrefs fall back to the current file name when the page has no id,
/// so switching language on an unmapped page links to the page itself.
pub fn language_switch(table: &LinkTable, identity: &ResolvedPageIdentity) -> LanguageSwitch {
    let current = identity.language.as_str();
    let other = table.other_language(current);
    let (current_name, current_href) = switch_target(table, current, identity);
    let (other_name, other_href) = switch_target(table, other, identity);

    LanguageSwitch {
        current_language: current.to_string(),
        current_name,
        current_href,
        other_language: other.to_string(),
        other_name,
        other_href,
    }
}

/// Display name and href of the page's equivalent in `code`.
fn switch_target(table: &LinkTable, code: &str, identity: &ResolvedPageIdentity) -> (String, String) {
    let language = table.language(code);
    let name = language
        .map(|language| language.name.clone())
        .unwrap_or_else(|| code.to_uppercase());
    let href = language
        .zip(identity.page_id.as_deref())
        .and_then(|(language, id)| language.entry(id))
        .map(|entry| entry.href.clone())
        .unwrap_or_else(|| identity.file_name.clone());
    (name, href)
}
