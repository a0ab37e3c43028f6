//! Page identity resolution.
//!
//! Derives `{file_name, language, page_id}` from a URL path. Resolution never
//! fails: an empty last segment means the home page, a file without a
//! language suffix is in the default language, and a file missing from the
//! page mapping simply has no page id.
//!
//! ```text
//! /docs/repository-server_ru.html  →  repository-server_ru.html, ru, Some("repository-server")
//! /docs/                           →  index.html,                en, Some("home")
//! /docs/unknown.html               →  unknown.html,              en, None
//! ```

use crate::table::LinkTable;
use crate::types::ResolvedPageIdentity;

/// Resolve the identity of the page served at `url_path`.
pub fn resolve_identity(table: &LinkTable, url_path: &str) -> ResolvedPageIdentity {
    let file_name = file_name(url_path).unwrap_or(table.home_page());
    ResolvedPageIdentity {
        file_name: file_name.to_string(),
        language: detect_language(table, file_name).to_string(),
        page_id: table.page_id(file_name).map(str::to_string),
    }
}

/// Last path segment, ignoring any query string or fragment.
/// `None` when the path ends in `/` (or is empty).
fn file_name(url_path: &str) -> Option<&str> {
    let path = url_path.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').next().filter(|segment| !segment.is_empty())
}

/// Language of a file name.
///
/// A file belongs to the first non-default language (by code) whose
/// `"{suffix}."` marker it contains; anything else is in the default
/// language.
pub fn detect_language<'a>(table: &'a LinkTable, file_name: &str) -> &'a str {
    table
        .languages()
        .filter(|(code, language)| *code != table.default_language() && !language.suffix.is_empty())
        .find(|(_, language)| file_name.contains(&format!("{}.", language.suffix)))
        .map(|(code, _)| code)
        .unwrap_or(table.default_language())
}

/// Language-agnostic base name: the file name without its extension and
/// without its language suffix (`repository-server_ru.html` →
/// `repository-server`).
pub fn base_name(table: &LinkTable, identity: &ResolvedPageIdentity) -> String {
    let file_name = identity.file_name.as_str();
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    let suffix = table
        .language(&identity.language)
        .map(|language| language.suffix.as_str())
        .unwrap_or_default();
    if suffix.is_empty() {
        return stem.to_string();
    }
    stem.strip_suffix(suffix).unwrap_or(stem).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn russian_page_in_subdirectory() {
        let table = stock_navigator().table().clone();
        let identity = resolve_identity(&table, "/docs/repository-server_ru.html");
        assert_eq!(identity.file_name, "repository-server_ru.html");
        assert_eq!(identity.language, "ru");
        assert_eq!(identity.page_id.as_deref(), Some("repository-server"));
    }

    #[test]
    fn english_page() {
        let table = stock_navigator().table().clone();
        let identity = resolve_identity(&table, "/docs.html");
        assert_eq!(identity.language, "en");
        assert_eq!(identity.page_id.as_deref(), Some("client-docs"));
    }

    #[test]
    fn trailing_slash_is_home_page() {
        let table = stock_navigator().table().clone();
        for path in ["/", "", "/docs/"] {
            let identity = resolve_identity(&table, path);
            assert_eq!(identity.file_name, "index.html", "path {path:?}");
            assert_eq!(identity.page_id.as_deref(), Some("home"));
        }
    }

    #[test]
    fn unmapped_page_has_no_id() {
        let table = stock_navigator().table().clone();
        let identity = resolve_identity(&table, "/docs/unknown.html");
        assert_eq!(identity.file_name, "unknown.html");
        assert_eq!(identity.language, "en");
        assert_eq!(identity.page_id, None);
    }

    #[test]
    fn unmapped_russian_page_keeps_language() {
        let table = stock_navigator().table().clone();
        let identity = resolve_identity(&table, "/changelog_ru.html");
        assert_eq!(identity.language, "ru");
        assert_eq!(identity.page_id, None);
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        let table = stock_navigator().table().clone();
        let identity = resolve_identity(&table, "/mcp-server_ru.html?tab=linux#install");
        assert_eq!(identity.file_name, "mcp-server_ru.html");
        assert_eq!(identity.page_id.as_deref(), Some("mcp-server"));
    }

    #[test]
    fn suffix_without_dot_is_not_a_language_marker() {
        let table = stock_navigator().table().clone();
        assert_eq!(detect_language(&table, "ru_rules.html"), "en");
        assert_eq!(detect_language(&table, "docs_ru.html"), "ru");
    }

    #[test]
    fn registered_language_is_detected() {
        let mut navigator = stock_navigator();
        navigator.register_language("de", german()).unwrap();
        let identity = resolve_identity(navigator.table(), "/docs_de.html");
        assert_eq!(identity.language, "de");
        assert_eq!(identity.page_id.as_deref(), Some("client-docs"));
    }

    // =========================================================================
    // base_name
    // =========================================================================

    #[test]
    fn base_name_strips_extension_and_suffix() {
        let table = stock_navigator().table().clone();
        let cases = [
            ("/index.html", "index"),
            ("/index_ru.html", "index"),
            ("/repository-server_ru.html", "repository-server"),
            ("/mcp-server.html", "mcp-server"),
            ("/README", "README"),
        ];
        for (path, expected) in cases {
            let identity = resolve_identity(&table, path);
            assert_eq!(base_name(&table, &identity), expected, "path {path:?}");
        }
    }
}
