//! Shared test utilities for the docs-nav test suite.
//!
//! Builds navigators over the stock EN/RU table, a third language to register
//! at runtime, and a sample page carrying all three navigation containers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let mut navigator = stock_navigator();
//! navigator.register_language("de", german()).unwrap();
//!
//! let tmp = setup_site();
//! let report = mount_site(tmp.path(), &navigator, &MountOptions::default()).unwrap();
//! ```

use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::config::NavConfig;
use crate::engine::Navigator;
use crate::resolve::ResolvedLink;
use crate::types::{AnchorLink, LanguageConfig, NavEntry};

// =========================================================================
// Navigators
// =========================================================================

/// Navigator over the stock configuration.
pub fn stock_navigator() -> Navigator {
    Navigator::new(&NavConfig::default()).unwrap()
}

/// A German table with the stock ids, suffix `_de`.
pub fn german() -> LanguageConfig {
    LanguageConfig {
        name: "DE".to_string(),
        suffix: "_de".to_string(),
        links: vec![
            NavEntry::new("home", "index_de.html", "Startseite"),
            NavEntry::new("client-docs", "docs_de.html", "Client-Dokumentation"),
            NavEntry::new(
                "repository-server",
                "repository-server_de.html",
                "Repository-Server",
            ),
            NavEntry::new("mcp-server", "mcp-server_de.html", "MCP Server"),
            NavEntry::new("cicd-examples", "cicd-examples_de.html", "CI/CD-Beispiele"),
        ],
        anchors: vec![
            AnchorLink::new("#features", "Funktionen"),
            AnchorLink::new("#installation", "Installation"),
        ],
    }
}

/// Ids of the active links, in order.
pub fn active_ids<'a>(links: &[ResolvedLink<'a>]) -> Vec<&'a str> {
    links
        .iter()
        .filter(|link| link.is_active)
        .map(|link| link.entry.id.as_str())
        .collect()
}

// =========================================================================
// Pages
// =========================================================================

/// A docs page with stale navigation in every container.
pub const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Client documentation</title></head>
<body>
<nav class="navbar">
<a class="logo" href="index.html">Criage</a>
<ul class="nav-links"><li><a href="old.html">stale link</a></li></ul>
<div class="language-switcher"><a href="old.html" class="lang-btn">stale</a></div>
<button class="mobile-menu-toggle">Menu</button>
</nav>
<div class="mobile-nav">
<ul class="nav-links"><li><a href="old.html">stale mobile link</a></li></ul>
</div>
<main>
<h1>Client documentation</h1>
<p>Install the client with the package manager of your choice.</p>
</main>
</body>
</html>
"#;

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can rewrite without touching the fixtures.
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    for entry in WalkDir::new(&fixtures) {
        let entry = entry.unwrap();
        let target = tmp.path().join(entry.path().strip_prefix(&fixtures).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).unwrap();
        } else {
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
    tmp
}
