//! The link table: validated navigation data for every language.
//!
//! A [`LinkTable`] is built once from [`NavConfig`] and only changes through
//! [`LinkTable::register_language`] and [`LinkTable::merge_external_links`].
//! Every structural invariant is checked when the table is built and again
//! on each language registration, so rendering never has to deal with
//! malformed data:
//!
//! - ids are unique within a language,
//! - every language defines exactly the default language's id set,
//! - the default and alternate languages exist and differ,
//! - every non-default language has its own file-name suffix,
//! - the page mapping only points at known ids.

use crate::config::{ConfigError, NavConfig};
use crate::identity::detect_language;
use crate::types::LanguageConfig;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq)]
pub struct LinkTable {
    default_language: String,
    alternate_language: String,
    home_page: String,
    external_fallback: String,
    languages: BTreeMap<String, LanguageConfig>,
    page_mapping: BTreeMap<String, String>,
    external_links: BTreeMap<String, String>,
}

impl LinkTable {
    /// Build and validate a table from configuration.
    pub fn from_config(config: &NavConfig) -> Result<Self, ConfigError> {
        let table = Self {
            default_language: config.default_language.clone(),
            alternate_language: config.alternate_language.clone(),
            home_page: config.home_page.clone(),
            external_fallback: config.external_fallback.clone(),
            languages: config.languages.clone(),
            page_mapping: config.page_mapping.clone(),
            external_links: config.external_links.clone(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Check every table invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.home_page.is_empty() {
            return Err(invalid("home_page must not be empty"));
        }
        let reference = self.languages.get(&self.default_language).ok_or_else(|| {
            invalid(format!(
                "default_language `{}` has no [languages.{}] table",
                self.default_language, self.default_language
            ))
        })?;
        if !self.languages.contains_key(&self.alternate_language) {
            return Err(invalid(format!(
                "alternate_language `{}` has no [languages.{}] table",
                self.alternate_language, self.alternate_language
            )));
        }
        if self.alternate_language == self.default_language {
            return Err(invalid(
                "alternate_language must differ from default_language",
            ));
        }

        let reference_ids = unique_ids(&self.default_language, reference)?;
        let mut suffixes: BTreeMap<&str, &str> = BTreeMap::new();
        for (code, language) in &self.languages {
            let ids = unique_ids(code, language)?;
            if ids != reference_ids {
                let missing: Vec<&str> = reference_ids.difference(&ids).copied().collect();
                let extra: Vec<&str> = ids.difference(&reference_ids).copied().collect();
                return Err(invalid(format!(
                    "language `{code}` must define the same ids as `{}` (missing: {missing:?}, extra: {extra:?})",
                    self.default_language
                )));
            }

            if *code == self.default_language {
                continue;
            }
            if language.suffix.is_empty() {
                return Err(invalid(format!(
                    "language `{code}` needs a file-name suffix (e.g. \"_{code}\")"
                )));
            }
            if let Some(other) = suffixes.insert(language.suffix.as_str(), code.as_str()) {
                return Err(invalid(format!(
                    "languages `{other}` and `{code}` share the suffix `{}`",
                    language.suffix
                )));
            }
        }

        for (file, id) in &self.page_mapping {
            if !reference_ids.contains(id.as_str()) {
                return Err(invalid(format!(
                    "page_mapping `{file}` points at unknown id `{id}`"
                )));
            }
        }
        Ok(())
    }

    /// Register (or replace) a language at runtime.
    ///
    /// The invariants are re-checked with the new language in place, and
    /// every href of the new language must be detected as that language and
    /// must not already map to a different id. On failure the table is left
    /// exactly as it was. On success the new hrefs join the page mapping, so
    /// its pages resolve to their ids.
    pub fn register_language(
        &mut self,
        code: &str,
        language: LanguageConfig,
    ) -> Result<(), ConfigError> {
        let previous = self.languages.insert(code.to_string(), language);
        if let Err(err) = self.validate().and_then(|()| self.check_new_hrefs(code)) {
            match previous {
                Some(previous) => {
                    self.languages.insert(code.to_string(), previous);
                }
                None => {
                    self.languages.remove(code);
                }
            }
            return Err(err);
        }

        if let Some(language) = self.languages.get(code) {
            for link in &language.links {
                self.page_mapping
                    .entry(link.href.clone())
                    .or_insert_with(|| link.id.clone());
            }
        }
        Ok(())
    }

    /// Hrefs of a freshly inserted language must resolve back to it.
    fn check_new_hrefs(&self, code: &str) -> Result<(), ConfigError> {
        let Some(language) = self.languages.get(code) else {
            return Ok(());
        };
        for link in &language.links {
            let detected = detect_language(self, &link.href);
            if detected != code {
                return Err(invalid(format!(
                    "language `{code}`: href `{}` would be served as `{detected}` (missing the `{}.` marker?)",
                    link.href, language.suffix
                )));
            }
            if let Some(mapped) = self.page_id(&link.href) {
                if mapped != link.id {
                    return Err(invalid(format!(
                        "language `{code}`: href `{}` for id `{}` is already mapped to id `{mapped}`",
                        link.href, link.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Merge additional base-name → URL entries into the external links.
    /// Existing keys are overwritten.
    pub fn merge_external_links<I>(&mut self, links: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.external_links.extend(links);
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn alternate_language(&self) -> &str {
        &self.alternate_language
    }

    pub fn home_page(&self) -> &str {
        &self.home_page
    }

    /// The id the home page maps to, if it is mapped.
    pub fn home_id(&self) -> Option<&str> {
        self.page_id(&self.home_page)
    }

    pub fn language(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.get(code)
    }

    /// All languages, ordered by code.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &LanguageConfig)> {
        self.languages
            .iter()
            .map(|(code, language)| (code.as_str(), language))
    }

    /// The language the switcher targets from `code`.
    ///
    /// Binary toggle: the default language switches to the alternate one,
    /// every other language switches back to the default.
    pub fn other_language(&self, code: &str) -> &str {
        if code == self.default_language {
            &self.alternate_language
        } else {
            &self.default_language
        }
    }

    pub fn page_id(&self, file_name: &str) -> Option<&str> {
        self.page_mapping.get(file_name).map(String::as_str)
    }

    pub fn page_mapping(&self) -> &BTreeMap<String, String> {
        &self.page_mapping
    }

    /// External link for a page base name, or the configured fallback.
    pub fn external_link(&self, base_name: &str) -> &str {
        self.external_links
            .get(base_name)
            .map(String::as_str)
            .unwrap_or(&self.external_fallback)
    }

    pub fn external_links(&self) -> &BTreeMap<String, String> {
        &self.external_links
    }

    pub fn external_fallback(&self) -> &str {
        &self.external_fallback
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

/// The id set of a language, rejecting duplicates.
fn unique_ids<'a>(code: &str, language: &'a LanguageConfig) -> Result<BTreeSet<&'a str>, ConfigError> {
    let mut ids = BTreeSet::new();
    for link in &language.links {
        if !ids.insert(link.id.as_str()) {
            return Err(invalid(format!(
                "language `{code}` defines id `{}` more than once",
                link.id
            )));
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::NavEntry;

    fn stock_table() -> LinkTable {
        LinkTable::from_config(&NavConfig::default()).unwrap()
    }

    fn validation_message(result: Result<impl std::fmt::Debug, ConfigError>) -> String {
        match result {
            Err(ConfigError::Validation(message)) => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn stock_table_lookups() {
        let table = stock_table();
        assert_eq!(table.default_language(), "en");
        assert_eq!(table.page_id("mcp-server_ru.html"), Some("mcp-server"));
        assert_eq!(table.page_id("unknown.html"), None);
        assert_eq!(table.home_id(), Some("home"));
    }

    #[test]
    fn other_language_is_a_binary_toggle() {
        let table = stock_table();
        assert_eq!(table.other_language("en"), "ru");
        assert_eq!(table.other_language("ru"), "en");
    }

    #[test]
    fn external_link_falls_back() {
        let table = stock_table();
        assert_eq!(
            table.external_link("repository-server"),
            "https://github.com/criage-oss/criage-server"
        );
        assert_eq!(
            table.external_link("changelog"),
            "https://github.com/criage-oss/criage-client"
        );
    }

    // =========================================================================
    // Construction-time validation
    // =========================================================================

    #[test]
    fn duplicate_id_rejected() {
        let mut config = NavConfig::default();
        config
            .languages
            .get_mut("ru")
            .unwrap()
            .links
            .push(NavEntry::new("home", "again_ru.html", "Ещё раз"));
        let message = validation_message(LinkTable::from_config(&config));
        assert!(message.contains("`ru`"));
        assert!(message.contains("`home`"));
    }

    #[test]
    fn id_missing_from_one_language_rejected() {
        let mut config = NavConfig::default();
        config
            .languages
            .get_mut("ru")
            .unwrap()
            .links
            .retain(|link| link.id != "cicd-examples");
        // The mapping still points at the id, but the set check runs first.
        let message = validation_message(LinkTable::from_config(&config));
        assert!(message.contains("cicd-examples"));
    }

    #[test]
    fn missing_default_language_rejected() {
        let mut config = NavConfig::default();
        config.default_language = "de".to_string();
        let message = validation_message(LinkTable::from_config(&config));
        assert!(message.contains("default_language"));
    }

    #[test]
    fn alternate_equal_to_default_rejected() {
        let mut config = NavConfig::default();
        config.alternate_language = "en".to_string();
        assert!(LinkTable::from_config(&config).is_err());
    }

    #[test]
    fn mapping_to_unknown_id_rejected() {
        let mut config = NavConfig::default();
        config
            .page_mapping
            .insert("faq.html".to_string(), "faq".to_string());
        let message = validation_message(LinkTable::from_config(&config));
        assert!(message.contains("faq"));
    }

    #[test]
    fn non_default_language_needs_suffix() {
        let mut config = NavConfig::default();
        config.languages.get_mut("ru").unwrap().suffix = String::new();
        let message = validation_message(LinkTable::from_config(&config));
        assert!(message.contains("suffix"));
    }

    #[test]
    fn empty_home_page_rejected() {
        let mut config = NavConfig::default();
        config.home_page = String::new();
        assert!(LinkTable::from_config(&config).is_err());
    }

    // =========================================================================
    // Runtime registration
    // =========================================================================

    #[test]
    fn register_language_maps_its_pages() {
        let mut table = stock_table();
        table.register_language("de", german()).unwrap();

        assert!(table.language("de").is_some());
        assert_eq!(table.page_id("docs_de.html"), Some("client-docs"));
        // Existing mappings are untouched
        assert_eq!(table.page_id("docs.html"), Some("client-docs"));
    }

    #[test]
    fn register_language_with_missing_ids_leaves_table_unchanged() {
        let mut table = stock_table();
        let before = table.clone();

        let mut partial = german();
        partial.links.truncate(2);
        let message = validation_message(table.register_language("de", partial));

        assert!(message.contains("`de`"));
        assert_eq!(table, before);
    }

    #[test]
    fn register_language_failure_restores_replaced_language() {
        let mut table = stock_table();
        let before = table.clone();

        let mut broken = table.language("ru").unwrap().clone();
        broken.links.push(NavEntry::new("faq", "faq_ru.html", "Вопросы"));
        assert!(table.register_language("ru", broken).is_err());

        assert_eq!(table, before);
    }

    #[test]
    fn register_language_rejects_shared_suffix() {
        let mut table = stock_table();
        let mut clash = german();
        clash.suffix = "_ru".to_string();
        let message = validation_message(table.register_language("de", clash));
        assert!(message.contains("suffix"));
    }

    #[test]
    fn register_language_rejects_conflicting_href() {
        let mut table = stock_table();
        table.register_language("de", german()).unwrap();
        let before = table.clone();

        // docs_de.html is already the German client docs page
        let mut swapped = german();
        swapped.links[0].href = "docs_de.html".to_string();
        swapped.links[1].href = "index_de.html".to_string();
        let message = validation_message(table.register_language("de", swapped));
        assert!(message.contains("`docs_de.html`"), "{message}");
        assert!(message.contains("`client-docs`"), "{message}");

        assert_eq!(table, before);
        assert_eq!(table.page_id("docs_de.html"), Some("client-docs"));
    }

    #[test]
    fn register_language_rejects_href_without_marker() {
        let mut table = stock_table();
        let before = table.clone();

        let mut unmarked = german();
        unmarked.links[0].href = "docs.html".to_string();
        let message = validation_message(table.register_language("de", unmarked));
        assert!(message.contains("`docs.html`"), "{message}");
        assert!(message.contains("`en`"), "{message}");

        assert_eq!(table, before);
        assert_eq!(table.page_id("docs.html"), Some("client-docs"));
    }

    #[test]
    fn reregistering_a_language_keeps_its_mapping() {
        let mut table = stock_table();
        let russian = table.language("ru").unwrap().clone();
        table.register_language("ru", russian).unwrap();
        assert_eq!(table.page_id("docs_ru.html"), Some("client-docs"));
    }

    #[test]
    fn merge_external_links_overrides_and_adds() {
        let mut table = stock_table();
        table.merge_external_links([
            ("docs".to_string(), "https://example.org/docs".to_string()),
            ("faq".to_string(), "https://example.org/faq".to_string()),
        ]);
        assert_eq!(table.external_link("docs"), "https://example.org/docs");
        assert_eq!(table.external_link("faq"), "https://example.org/faq");
        assert_eq!(
            table.external_link("mcp-server"),
            "https://github.com/criage-oss/criage-mcp"
        );
    }
}
