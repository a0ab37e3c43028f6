//! Navigation configuration.
//!
//! Handles loading, validating, and merging `docs-nav.toml`. The stock
//! defaults describe the Criage documentation site (English and Russian,
//! five pages, one repository link per page); a user file only needs the
//! keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! default_language = "en"          # Language of pages without a suffix
//! alternate_language = "ru"        # Target of the language switcher on default pages
//! home_page = "index.html"         # File served for paths ending in "/"
//! collapse_home_to_anchors = false # Home page shows local #anchors instead of global links
//! external_fallback = "https://github.com/criage-oss/criage-client"
//!
//! [render]
//! link_class = "nav-link"
//! active_class = "active"
//! external_class = "github-link"
//! external_label = "GitHub"
//! language_button_class = "lang-btn"
//!
//! [mount]
//! primary_nav = ".nav-links"
//! mobile_nav = ".mobile-nav .nav-links"
//! language_switcher = ".language-switcher"
//!
//! [languages.en]
//! name = "EN"
//! links = [{ id = "home", href = "index.html", text = "Home" }]
//!
//! [page_mapping]
//! "index.html" = "home"
//!
//! [external_links]
//! index = "https://github.com/criage-oss/criage-client"
//! ```
//!
//! ## Merging
//!
//! User values are merged key-by-key over the stock table. Tables merge,
//! everything else (including `links` arrays) is replaced wholesale, so a
//! new language is added with a single `[languages.<code>]` table.
//!
//! Unknown keys are rejected to catch typos early. Structural problems
//! (duplicate ids, languages with different id sets) are rejected by
//! [`NavConfig::validate`] before anything is rendered.

use crate::table::LinkTable;
use crate::types::{AnchorLink, LanguageConfig, NavEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Navigation configuration loaded from `docs-nav.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Language of pages whose file name carries no language suffix.
    pub default_language: String,
    /// Language the switcher points to from a default-language page.
    pub alternate_language: String,
    /// File name used when the URL path ends in `/`.
    pub home_page: String,
    /// Render the home page's local anchors instead of the global links.
    pub collapse_home_to_anchors: bool,
    /// External link used when a page's base name has no entry.
    pub external_fallback: String,
    /// Class names and labels used in the rendered fragments.
    pub render: RenderConfig,
    /// CSS selectors locating the mount containers.
    pub mount: MountConfig,
    /// Language code → navigation for that language.
    pub languages: BTreeMap<String, LanguageConfig>,
    /// Served file name → stable page id.
    pub page_mapping: BTreeMap<String, String>,
    /// Page base name → external (repository) URL.
    pub external_links: BTreeMap<String, String>,
}

const CLIENT_REPO: &str = "https://github.com/criage-oss/criage-client";
const SERVER_REPO: &str = "https://github.com/criage-oss/criage-server";
const MCP_REPO: &str = "https://github.com/criage-oss/criage-mcp";

impl Default for NavConfig {
    fn default() -> Self {
        let english = LanguageConfig {
            name: "EN".to_string(),
            suffix: String::new(),
            links: vec![
                NavEntry::new("home", "index.html", "Home"),
                NavEntry::new("client-docs", "docs.html", "Client Docs"),
                NavEntry::new(
                    "repository-server",
                    "repository-server.html",
                    "Repository Server",
                ),
                NavEntry::new("mcp-server", "mcp-server.html", "MCP Server"),
                NavEntry::new("cicd-examples", "cicd-examples.html", "CI/CD Examples"),
            ],
            anchors: vec![
                AnchorLink::new("#features", "Features"),
                AnchorLink::new("#installation", "Installation"),
                AnchorLink::new("#commands", "Commands"),
            ],
        };
        let russian = LanguageConfig {
            name: "RU".to_string(),
            suffix: "_ru".to_string(),
            links: vec![
                NavEntry::new("home", "index_ru.html", "Главная"),
                NavEntry::new("client-docs", "docs_ru.html", "Документация клиента"),
                NavEntry::new(
                    "repository-server",
                    "repository-server_ru.html",
                    "Сервер репозитория",
                ),
                NavEntry::new("mcp-server", "mcp-server_ru.html", "MCP Server"),
                NavEntry::new("cicd-examples", "cicd-examples_ru.html", "Примеры CI/CD"),
            ],
            anchors: vec![
                AnchorLink::new("#features", "Возможности"),
                AnchorLink::new("#installation", "Установка"),
                AnchorLink::new("#commands", "Команды"),
            ],
        };

        // Both variants of every page map to the same id.
        let page_mapping = english
            .links
            .iter()
            .chain(&russian.links)
            .map(|link| (link.href.clone(), link.id.clone()))
            .collect();

        let external_links = [
            ("index", CLIENT_REPO),
            ("docs", CLIENT_REPO),
            ("repository-server", SERVER_REPO),
            ("mcp-server", MCP_REPO),
            ("cicd-examples", CLIENT_REPO),
        ]
        .into_iter()
        .map(|(base, url)| (base.to_string(), url.to_string()))
        .collect();

        Self {
            default_language: "en".to_string(),
            alternate_language: "ru".to_string(),
            home_page: "index.html".to_string(),
            collapse_home_to_anchors: false,
            external_fallback: CLIENT_REPO.to_string(),
            render: RenderConfig::default(),
            mount: MountConfig::default(),
            languages: BTreeMap::from([
                ("en".to_string(), english),
                ("ru".to_string(), russian),
            ]),
            page_mapping,
            external_links,
        }
    }
}

impl NavConfig {
    /// Validate the configuration.
    ///
    /// Builds the link table (which enforces the id invariants) and checks
    /// that every mount selector parses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        LinkTable::from_config(self)?;
        for (key, selector) in self.mount.selectors() {
            let invalid = |message: String| {
                ConfigError::Validation(format!(
                    "mount.{key}: invalid selector `{selector}`: {message}"
                ))
            };
            scraper::Selector::parse(selector).map_err(|e| invalid(e.to_string()))?;
            // Pages are rewritten with lol_html, which supports fewer selectors.
            selector
                .parse::<lol_html::Selector>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        Ok(())
    }
}

/// Class names and labels used by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Class on every navigation anchor.
    pub link_class: String,
    /// Extra class on the active anchor and the current language button.
    pub active_class: String,
    /// Extra class on the trailing external link.
    pub external_class: String,
    /// Text of the trailing external link.
    pub external_label: String,
    /// Class on every language switcher button.
    pub language_button_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            link_class: "nav-link".to_string(),
            active_class: "active".to_string(),
            external_class: "github-link".to_string(),
            external_label: "GitHub".to_string(),
            language_button_class: "lang-btn".to_string(),
        }
    }
}

/// Selector contract for the three mount containers.
///
/// Each selector picks the first matching element in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MountConfig {
    pub primary_nav: String,
    pub mobile_nav: String,
    pub language_switcher: String,
}

impl MountConfig {
    /// `(key, selector)` pairs, in mount order.
    pub fn selectors(&self) -> [(&'static str, &str); 3] {
        [
            ("primary_nav", self.primary_nav.as_str()),
            ("mobile_nav", self.mobile_nav.as_str()),
            ("language_switcher", self.language_switcher.as_str()),
        ]
    }
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            primary_nav: ".nav-links".to_string(),
            mobile_nav: ".mobile-nav .nav-links".to_string(),
            language_switcher: ".language-switcher".to_string(),
        }
    }
}

// =============================================================================
// Loading docs-nav.toml over the stock file
// =============================================================================

/// The stock configuration as a TOML table, read from the same commented
/// file `gen-config` prints.
pub fn stock_table() -> Result<toml::Table, ConfigError> {
    Ok(toml::from_str(stock_config_toml())?)
}

/// Write each key of `overrides` into `target`.
///
/// A table overriding a table is applied key by key, so `[languages.de]`
/// adds a language and `[languages.ru] name = ".."` renames one without
/// restating its links. Everything else, arrays included, is replaced.
pub fn apply_overrides(target: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        let value = match (target.remove(&key), value) {
            (Some(toml::Value::Table(mut existing)), toml::Value::Table(nested)) => {
                apply_overrides(&mut existing, nested);
                toml::Value::Table(existing)
            }
            (_, value) => value,
        };
        target.insert(key, value);
    }
}

/// Read the overrides in `path`. A missing file overrides nothing.
pub fn read_overrides(path: &Path) -> Result<toml::Table, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "config file not found, using stock defaults");
            Ok(toml::Table::new())
        }
        Err(err) => Err(err.into()),
    }
}

/// Stock configuration with `overrides` applied, deserialized and validated.
pub fn config_from_overrides(overrides: toml::Table) -> Result<NavConfig, ConfigError> {
    let mut table = stock_table()?;
    apply_overrides(&mut table, overrides);
    let config: NavConfig = toml::Value::Table(table).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `docs-nav.toml` from `path` over the stock configuration.
pub fn load_config(path: &Path) -> Result<NavConfig, ConfigError> {
    config_from_overrides(read_overrides(path)?)
}

/// Returns a fully-commented stock `docs-nav.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docs-nav configuration
# =====================
# All settings are optional. Values shown below are the defaults; a config
# file only needs the keys it wants to override. Tables merge key by key,
# arrays (such as `links`) are replaced as a whole. Unknown keys are errors.

# Language of pages whose file name has no language suffix.
default_language = "en"

# Language the switcher points to from a default-language page. Pages in any
# other language switch back to the default language.
alternate_language = "ru"

# File name used when the URL path ends in "/".
home_page = "index.html"

# Show the home page's local anchors (#features, ...) instead of the global
# navigation links. The external link is rendered either way.
collapse_home_to_anchors = false

# External link for pages without an entry in [external_links].
external_fallback = "https://github.com/criage-oss/criage-client"

# ---------------------------------------------------------------------------
# Rendered markup
# ---------------------------------------------------------------------------
[render]
link_class = "nav-link"
active_class = "active"
external_class = "github-link"
external_label = "GitHub"
language_button_class = "lang-btn"

# ---------------------------------------------------------------------------
# Mount containers (CSS selectors, first match wins; missing ones are skipped)
# ---------------------------------------------------------------------------
[mount]
primary_nav = ".nav-links"
mobile_nav = ".mobile-nav .nav-links"
language_switcher = ".language-switcher"

# ---------------------------------------------------------------------------
# Languages. Every language must define the same ids, each exactly once.
# A page belongs to a language when its file name contains "<suffix>.".
# ---------------------------------------------------------------------------
[languages.en]
name = "EN"
suffix = ""
links = [
    { id = "home", href = "index.html", text = "Home" },
    { id = "client-docs", href = "docs.html", text = "Client Docs" },
    { id = "repository-server", href = "repository-server.html", text = "Repository Server" },
    { id = "mcp-server", href = "mcp-server.html", text = "MCP Server" },
    { id = "cicd-examples", href = "cicd-examples.html", text = "CI/CD Examples" },
]
anchors = [
    { href = "#features", text = "Features" },
    { href = "#installation", text = "Installation" },
    { href = "#commands", text = "Commands" },
]

[languages.ru]
name = "RU"
suffix = "_ru"
links = [
    { id = "home", href = "index_ru.html", text = "Главная" },
    { id = "client-docs", href = "docs_ru.html", text = "Документация клиента" },
    { id = "repository-server", href = "repository-server_ru.html", text = "Сервер репозитория" },
    { id = "mcp-server", href = "mcp-server_ru.html", text = "MCP Server" },
    { id = "cicd-examples", href = "cicd-examples_ru.html", text = "Примеры CI/CD" },
]
anchors = [
    { href = "#features", text = "Возможности" },
    { href = "#installation", text = "Установка" },
    { href = "#commands", text = "Команды" },
]

# ---------------------------------------------------------------------------
# Served file name -> page id
# ---------------------------------------------------------------------------
[page_mapping]
"index.html" = "home"
"index_ru.html" = "home"
"docs.html" = "client-docs"
"docs_ru.html" = "client-docs"
"repository-server.html" = "repository-server"
"repository-server_ru.html" = "repository-server"
"mcp-server.html" = "mcp-server"
"mcp-server_ru.html" = "mcp-server"
"cicd-examples.html" = "cicd-examples"
"cicd-examples_ru.html" = "cicd-examples"

# ---------------------------------------------------------------------------
# Page base name (file name without language suffix and extension) -> URL
# ---------------------------------------------------------------------------
[external_links]
index = "https://github.com/criage-oss/criage-client"
docs = "https://github.com/criage-oss/criage-client"
repository-server = "https://github.com/criage-oss/criage-server"
mcp-server = "https://github.com/criage-oss/criage-mcp"
cicd-examples = "https://github.com/criage-oss/criage-client"
"##
}
