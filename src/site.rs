//! Site-wide mounting.
//!
//! Runs the navigation engine over every page of a built documentation site,
//! the same render and mount pass the browser scripts perform on page load,
//! done once at build time instead.
//!
//! ## Page URLs
//!
//! Each page's URL path is its path relative to the site root:
//!
//! ```text
//! site/index.html                    → /index.html
//! site/docs/repository-server_ru.html → /docs/repository-server_ru.html
//! ```
//!
//! ## Writes
//!
//! A page is only rewritten when its SHA-256 digest changes. Mounting is
//! idempotent, so running over an already mounted site writes nothing and
//! reports every page as unchanged.
//!
//! ## Parallelism
//!
//! Pages are independent and mounted in parallel with
//! [rayon](https://docs.rs/rayon); the [`Navigator`] is only read.

use crate::engine::Navigator;
use crate::mount::{ContainerRole, Dispatcher, HtmlPage, MountError, TraceListener};
use crate::types::ResolvedPageIdentity;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk site directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{}: {source}", path.display())]
    Mount { path: PathBuf, source: MountError },
}

#[derive(Debug, Clone, Default)]
pub struct MountOptions {
    /// Compute outcomes without writing any file.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// Navigation changed; the page was (or, in a dry run, would be) rewritten.
    Updated,
    /// Navigation was already up to date.
    Unchanged,
    /// The page has none of the navigation containers.
    NoContainers,
    /// The page could not be read, mounted or written; see
    /// [`PageOutcome::error`]. Other pages are still processed.
    Failed,
}

#[derive(Debug, Clone)]
pub struct PageOutcome {
    /// Path relative to the site root, `/`-separated.
    pub path: String,
    pub identity: ResolvedPageIdentity,
    pub mounted: Vec<ContainerRole>,
    pub status: PageStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SiteReport {
    /// One outcome per page, sorted by path.
    pub pages: Vec<PageOutcome>,
}

impl SiteReport {
    pub fn count(&self, status: PageStatus) -> usize {
        self.pages.iter().filter(|page| page.status == status).count()
    }
}

/// Mount navigation into every `.html` page under `root`.
///
/// Only a failure to walk `root` is an error. A page that cannot be
/// processed is reported as [`PageStatus::Failed`].
pub fn mount_site(
    root: &Path,
    navigator: &Navigator,
    options: &MountOptions,
) -> Result<SiteReport, SiteError> {
    let pages = find_pages(root)?;
    tracing::info!(root = %root.display(), pages = pages.len(), "mounting navigation");

    let mut outcomes: Vec<PageOutcome> = pages
        .par_iter()
        .map(|path| {
            let relative = relative_url(root, path);
            let url_path = format!("/{relative}");
            let identity = navigator.identify(&url_path);
            match mount_page(path, &url_path, navigator, options) {
                Ok((mounted, status)) => PageOutcome {
                    path: relative,
                    identity,
                    mounted,
                    status,
                    error: None,
                },
                Err(err) => {
                    tracing::warn!(page = %relative, error = %err, "failed to mount page");
                    PageOutcome {
                        path: relative,
                        identity,
                        mounted: Vec::new(),
                        status: PageStatus::Failed,
                        error: Some(err.to_string()),
                    }
                }
            }
        })
        .collect();
    outcomes.sort_by(|a, b| a.path.cmp(&b.path));

    let report = SiteReport { pages: outcomes };
    tracing::info!(
        updated = report.count(PageStatus::Updated),
        unchanged = report.count(PageStatus::Unchanged),
        skipped = report.count(PageStatus::NoContainers),
        failed = report.count(PageStatus::Failed),
        dry_run = options.dry_run,
        "navigation mounted"
    );
    Ok(report)
}

/// Mount navigation into one HTML document served at `url_path`.
///
/// Returns the new document and the containers that were filled.
pub fn mount_document(
    navigator: &Navigator,
    url_path: &str,
    source: &str,
) -> Result<(String, Vec<ContainerRole>), MountError> {
    let mut page = HtmlPage::parse(source, navigator.mount_config())?;
    let mut dispatcher = Dispatcher::new();
    dispatcher.subscribe(TraceListener);
    let report = dispatcher.mount_with_retry(&mut page, navigator, url_path);
    Ok((page.to_html(), report.mounted))
}

fn mount_page(
    path: &Path,
    url_path: &str,
    navigator: &Navigator,
    options: &MountOptions,
) -> Result<(Vec<ContainerRole>, PageStatus), SiteError> {
    let source = fs::read_to_string(path)?;

    let (mounted_html, mounted) = mount_document(navigator, url_path, &source)
        .map_err(|err| SiteError::Mount {
            path: path.to_path_buf(),
            source: err,
        })?;

    let status = if mounted.is_empty() {
        PageStatus::NoContainers
    } else if digest(&mounted_html) == digest(&source) {
        PageStatus::Unchanged
    } else {
        PageStatus::Updated
    };
    if status == PageStatus::Updated && !options.dry_run {
        fs::write(path, &mounted_html)?;
    }
    Ok((mounted, status))
}

/// All `.html` files under `root`, sorted by path.
fn find_pages(root: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut pages = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let is_html = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if entry.file_type().is_file() && is_html {
            pages.push(entry.into_path());
        }
    }
    Ok(pages)
}

/// `path` relative to `root`, joined with `/` regardless of platform.
fn relative_url(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn digest(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn relative_url_uses_forward_slashes() {
        let root = Path::new("/srv/site");
        let path = root.join("docs").join("index_ru.html");
        assert_eq!(relative_url(root, &path), "docs/index_ru.html");
    }

    #[test]
    fn find_pages_only_returns_html_files() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("docs")).unwrap();
        fs::write(tmp.path().join("index.html"), SAMPLE_PAGE).unwrap();
        fs::write(tmp.path().join("docs/docs_ru.HTML"), SAMPLE_PAGE).unwrap();
        fs::write(tmp.path().join("style.css"), "body {}").unwrap();

        let pages = find_pages(tmp.path()).unwrap();
        let names: Vec<String> = pages
            .iter()
            .map(|page| relative_url(tmp.path(), page))
            .collect();
        assert_eq!(names, vec!["docs/docs_ru.HTML", "index.html"]);
    }

    #[test]
    fn mount_document_uses_page_url() {
        let navigator = stock_navigator();
        let (html, mounted) =
            mount_document(&navigator, "/docs/mcp-server_ru.html", SAMPLE_PAGE).unwrap();
        assert_eq!(mounted.len(), 3);
        assert!(html.contains(r#"class="nav-link active">MCP Server</a>"#));
        assert!(html.contains("https://github.com/criage-oss/criage-mcp"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let page = tmp.path().join("docs.html");
        fs::write(&page, SAMPLE_PAGE).unwrap();

        let report = mount_site(
            tmp.path(),
            &stock_navigator(),
            &MountOptions { dry_run: true },
        )
        .unwrap();

        assert_eq!(report.count(PageStatus::Updated), 1);
        assert_eq!(fs::read_to_string(&page).unwrap(), SAMPLE_PAGE);
    }

    #[test]
    fn page_without_containers_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let page = tmp.path().join("404.html");
        let source = "<!DOCTYPE html><html><head></head><body><p>Not found</p></body></html>";
        fs::write(&page, source).unwrap();

        let report = mount_site(tmp.path(), &stock_navigator(), &MountOptions::default()).unwrap();

        assert_eq!(report.pages[0].status, PageStatus::NoContainers);
        assert_eq!(fs::read_to_string(&page).unwrap(), source);
    }

    #[test]
    fn fixture_site_is_mounted_then_stable() {
        let tmp = setup_site();
        let navigator = stock_navigator();

        let first = mount_site(tmp.path(), &navigator, &MountOptions::default()).unwrap();
        let paths: Vec<&str> = first.pages.iter().map(|page| page.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "404.html",
                "docs/repository-server_ru.html",
                "docs/unknown.html",
                "index.html",
                "index_ru.html"
            ]
        );
        assert_eq!(first.count(PageStatus::Updated), 4);
        assert_eq!(first.count(PageStatus::NoContainers), 1);
        assert_eq!(
            first.pages[2].mounted,
            vec![ContainerRole::PrimaryNav, ContainerRole::LanguageSwitcher]
        );

        let second = mount_site(tmp.path(), &navigator, &MountOptions::default()).unwrap();
        assert_eq!(second.count(PageStatus::Updated), 0);
        assert_eq!(second.count(PageStatus::Unchanged), 4);
    }

    #[test]
    fn unreadable_page_fails_alone() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.html"), SAMPLE_PAGE).unwrap();
        fs::write(tmp.path().join("b.html"), [0xff, 0xfe, 0x00, 0x3c]).unwrap();
        fs::write(tmp.path().join("c.html"), SAMPLE_PAGE).unwrap();

        let report = mount_site(tmp.path(), &stock_navigator(), &MountOptions::default()).unwrap();

        let statuses: Vec<PageStatus> = report.pages.iter().map(|page| page.status).collect();
        assert_eq!(
            statuses,
            vec![PageStatus::Updated, PageStatus::Failed, PageStatus::Updated]
        );
        assert!(report.pages[1].error.as_deref().unwrap().starts_with("IO error"));
        assert!(report.pages[1].mounted.is_empty());
        assert_ne!(fs::read_to_string(tmp.path().join("c.html")).unwrap(), SAMPLE_PAGE);
    }

    #[test]
    fn code_blocks_survive_repeated_runs() {
        let tmp = TempDir::new().unwrap();
        let page = tmp.path().join("install.html");
        let snippet = "<pre>\n\ncriage install foo\n</pre><textarea>\n\nx</textarea>";
        fs::write(&page, format!("{SAMPLE_PAGE}{snippet}")).unwrap();
        let navigator = stock_navigator();

        let first = mount_site(tmp.path(), &navigator, &MountOptions::default()).unwrap();
        let mounted = fs::read_to_string(&page).unwrap();
        let second = mount_site(tmp.path(), &navigator, &MountOptions::default()).unwrap();

        assert_eq!(first.pages[0].status, PageStatus::Updated);
        assert_eq!(second.pages[0].status, PageStatus::Unchanged);
        assert!(mounted.ends_with(snippet));
        assert_eq!(fs::read_to_string(&page).unwrap(), mounted);
    }
}
