//! CLI output formatting for every command.
//!
//! Output leads with what a page *is* (file, language, page id) and shows
//! rendered markup or container names as indented context underneath.
//!
//! # Output Format
//!
//! ## Render
//!
//! ```text
//! repository-server_ru.html (ru, repository-server)
//! Navigation
//!     <li><a href="index_ru.html" class="nav-link">Главная</a></li>
//!     ...
//! Language switcher
//!     <a href="repository-server_ru.html" class="lang-btn active">RU</a>
//!     <a href="repository-server.html" class="lang-btn">EN</a>
//! ```
//!
//! ## Mount
//!
//! ```text
//! 001 404.html (en, unmapped)
//!     Status: no navigation containers
//! 002 docs/repository-server_ru.html (ru, repository-server)
//!     Mounted: primary nav, mobile nav, language switcher
//!     Status: updated
//!
//! Mounted 2 pages: 1 updated, 0 unchanged, 1 without navigation
//! ```
//!
//! A page that could not be processed shows `Status: failed: <error>`, and
//! the summary gains `, N failed`.
//!
//! ## Check
//!
//! ```text
//! Languages
//! 001 en EN (default)
//!     Links: home, client-docs, repository-server, mcp-server, cicd-examples
//!     Anchors: 3
//! 002 ru RU (alternate, suffix _ru)
//!     ...
//!
//! Page mapping: 10 files
//! External links: 5 (fallback https://github.com/criage-oss/criage-client)
//! ```
//!
//! Each command has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper that writes to stdout. Format functions do no I/O.

use crate::engine::NavFragments;
use crate::mount::ContainerRole;
use crate::site::{PageStatus, SiteReport};
use crate::table::LinkTable;
use crate::types::ResolvedPageIdentity;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `(language, page id)` suffix shown after a page name.
fn identity_detail(identity: &ResolvedPageIdentity) -> String {
    format!(
        "({}, {})",
        identity.language,
        identity.page_id.as_deref().unwrap_or("unmapped")
    )
}

/// Split rendered markup after each closing `tag`, one element per line.
fn markup_lines<'a>(markup: &'a str, tag: &str) -> Vec<&'a str> {
    markup
        .split_inclusive(tag)
        .filter(|line| !line.trim().is_empty())
        .collect()
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

// ============================================================================
// render
// ============================================================================

/// Format the fragments rendered for one page.
pub fn format_render_output(fragments: &NavFragments) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        fragments.identity.file_name,
        identity_detail(&fragments.identity)
    )];

    lines.push("Navigation".to_string());
    for item in markup_lines(&fragments.nav_links, "</li>") {
        lines.push(format!("    {item}"));
    }

    lines.push("Language switcher".to_string());
    for button in markup_lines(&fragments.language_switcher, "</a>") {
        lines.push(format!("    {button}"));
    }
    lines
}

pub fn print_render_output(fragments: &NavFragments) {
    for line in format_render_output(fragments) {
        println!("{}", line);
    }
}

// ============================================================================
// mount
// ============================================================================

/// Format a site mount report: one entry per page, then a summary line.
pub fn format_site_report(report: &SiteReport, dry_run: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} {}",
            format_index(i + 1),
            page.path,
            identity_detail(&page.identity)
        ));
        if !page.mounted.is_empty() {
            let roles: Vec<String> = page.mounted.iter().map(ContainerRole::to_string).collect();
            lines.push(format!("    Mounted: {}", roles.join(", ")));
        }
        let status = match page.status {
            PageStatus::Updated if dry_run => "would update",
            PageStatus::Updated => "updated",
            PageStatus::Unchanged => "unchanged",
            PageStatus::NoContainers => "no navigation containers",
            PageStatus::Failed => "failed",
        };
        match &page.error {
            Some(error) => lines.push(format!("    Status: {}: {}", status, error)),
            None => lines.push(format!("    Status: {}", status)),
        }
    }

    if !report.pages.is_empty() {
        lines.push(String::new());
    }
    let verb = if dry_run { "Checked" } else { "Mounted" };
    let mut summary = format!(
        "{} {}: {} updated, {} unchanged, {} without navigation",
        verb,
        plural(report.pages.len(), "page"),
        report.count(PageStatus::Updated),
        report.count(PageStatus::Unchanged),
        report.count(PageStatus::NoContainers),
    );
    let failed = report.count(PageStatus::Failed);
    if failed > 0 {
        summary.push_str(&format!(", {} failed", failed));
    }
    lines.push(summary);
    lines
}

pub fn print_site_report(report: &SiteReport, dry_run: bool) {
    for line in format_site_report(report, dry_run) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format a summary of a validated link table.
pub fn format_table_summary(table: &LinkTable) -> Vec<String> {
    let mut lines = vec!["Languages".to_string()];

    for (i, (code, language)) in table.languages().enumerate() {
        let mut roles = Vec::new();
        if code == table.default_language() {
            roles.push("default".to_string());
        }
        if code == table.alternate_language() {
            roles.push("alternate".to_string());
        }
        if !language.suffix.is_empty() {
            roles.push(format!("suffix {}", language.suffix));
        }
        let detail = if roles.is_empty() {
            String::new()
        } else {
            format!(" ({})", roles.join(", "))
        };
        lines.push(format!(
            "{} {} {}{}",
            format_index(i + 1),
            code,
            language.name,
            detail
        ));

        let ids: Vec<&str> = language.links.iter().map(|entry| entry.id.as_str()).collect();
        lines.push(format!("    Links: {}", ids.join(", ")));
        if !language.anchors.is_empty() {
            lines.push(format!("    Anchors: {}", language.anchors.len()));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Page mapping: {}",
        plural(table.page_mapping().len(), "file")
    ));
    lines.push(format!(
        "External links: {} (fallback {})",
        table.external_links().len(),
        table.external_fallback()
    ));
    lines
}

pub fn print_table_summary(table: &LinkTable) {
    for line in format_table_summary(table) {
        println!("{}", line);
    }
}
