//! Mounting rendered fragments into a page.
//!
//! A page exposes up to three containers, identified by [`ContainerRole`].
//! Mounting replaces a container's whole content with its fragment; missing
//! containers are skipped without complaint. After every pass the
//! [`Dispatcher`] broadcasts a [`NavigationUpdated`] event to its listeners
//! so collaborators (the mobile menu's link rebinder, the CLI log) can react
//! to the new nodes. Listeners are handed to the dispatcher explicitly.
//!
//! [`HtmlPage`] is the [`MountTarget`] for built HTML files: containers are
//! found with the CSS selectors from `[mount]`, first match in document order,
//! and their content is spliced into the page source with a streaming
//! rewriter, leaving every other byte of the page as it was.

use crate::config::MountConfig;
use crate::engine::{NavFragments, Navigator};
use lol_html::html_content::{ContentType, Element};
use lol_html::{ElementContentHandlers, HandlerResult, RewriteStrSettings};
use scraper::{Html, Selector};
use serde::Serialize;
use std::borrow::Cow;
use std::cell::Cell;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MountError {
    #[error("invalid {role} selector `{selector}`: {message}")]
    Selector {
        role: ContainerRole,
        selector: String,
        message: String,
    },
}

/// The three navigation containers, in mount order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerRole {
    PrimaryNav,
    MobileNav,
    LanguageSwitcher,
}

impl ContainerRole {
    pub const ALL: [ContainerRole; 3] = [
        ContainerRole::PrimaryNav,
        ContainerRole::MobileNav,
        ContainerRole::LanguageSwitcher,
    ];

    /// The fragment that belongs in this container.
    pub fn fragment(self, fragments: &NavFragments) -> &str {
        match self {
            ContainerRole::PrimaryNav | ContainerRole::MobileNav => &fragments.nav_links,
            ContainerRole::LanguageSwitcher => &fragments.language_switcher,
        }
    }
}

impl std::fmt::Display for ContainerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ContainerRole::PrimaryNav => "primary nav",
            ContainerRole::MobileNav => "mobile nav",
            ContainerRole::LanguageSwitcher => "language switcher",
        };
        f.write_str(label)
    }
}

/// Something navigation can be mounted into.
pub trait MountTarget {
    /// Replace the full content of the `role` container with `html`.
    /// Returns `false` when the page has no such container.
    fn replace_content(&mut self, role: ContainerRole, html: &str) -> bool;

    /// Whether the `role` container has element children, `None` when the
    /// page has no such container.
    fn has_content(&self, role: ContainerRole) -> Option<bool>;
}

/// Broadcast after every mount pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationUpdated {
    pub file_name: String,
    pub page_id: Option<String>,
    /// Containers that received content, in mount order.
    pub mounted: Vec<ContainerRole>,
}

pub trait NavigationListener {
    fn navigation_updated(&mut self, event: &NavigationUpdated);
}

/// Forward events over a channel, for listeners living on another thread.
impl NavigationListener for Sender<NavigationUpdated> {
    fn navigation_updated(&mut self, event: &NavigationUpdated) {
        // A hung-up receiver just stops listening.
        let _ = self.send(event.clone());
    }
}

/// Logs every update at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceListener;

impl NavigationListener for TraceListener {
    fn navigation_updated(&mut self, event: &NavigationUpdated) {
        tracing::debug!(
            file = %event.file_name,
            page_id = event.page_id.as_deref().unwrap_or("-"),
            containers = event.mounted.len(),
            "navigation updated"
        );
    }
}

/// Outcome of [`Dispatcher::mount`] / [`Dispatcher::mount_with_retry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountReport {
    /// Containers filled by the last pass.
    pub mounted: Vec<ContainerRole>,
    /// Number of passes run (1, or 2 after a retry).
    pub passes: u8,
}

/// Mounts fragments and notifies listeners.
#[derive(Default)]
pub struct Dispatcher<'a> {
    listeners: Vec<Box<dyn NavigationListener + 'a>>,
}

impl<'a> Dispatcher<'a> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl NavigationListener + 'a) {
        self.listeners.push(Box::new(listener));
    }

    /// One mount pass: replace every present container, then notify.
    pub fn mount(&mut self, target: &mut impl MountTarget, fragments: &NavFragments) -> MountReport {
        let mounted: Vec<ContainerRole> = ContainerRole::ALL
            .into_iter()
            .filter(|role| target.replace_content(*role, role.fragment(fragments)))
            .collect();

        let event = NavigationUpdated {
            file_name: fragments.identity.file_name.clone(),
            page_id: fragments.identity.page_id.clone(),
            mounted: mounted.clone(),
        };
        for listener in &mut self.listeners {
            listener.navigation_updated(&event);
        }

        MountReport { mounted, passes: 1 }
    }

    /// Render and mount the page at `url_path`, running one more pass when
    /// the primary container is present but still empty afterwards.
    pub fn mount_with_retry(
        &mut self,
        target: &mut impl MountTarget,
        navigator: &Navigator,
        url_path: &str,
    ) -> MountReport {
        let report = self.mount(target, &navigator.render(url_path));
        if target.has_content(ContainerRole::PrimaryNav) != Some(false) {
            return report;
        }

        tracing::warn!(url_path, "primary navigation still empty, mounting again");
        let retry = self.mount(target, &navigator.render(url_path));
        MountReport {
            mounted: retry.mounted,
            passes: 2,
        }
    }
}

/// An HTML document with the mount selectors resolved.
///
/// Only container content is ever rewritten: [`HtmlPage::to_html`] returns
/// the original source byte for byte outside the replaced containers.
pub struct HtmlPage {
    source: String,
    selectors: Vec<ContainerSelector>,
}

/// One container's selector, parsed for lookup (scraper) and for
/// rewriting (lol_html).
struct ContainerSelector {
    role: ContainerRole,
    lookup: Selector,
    rewrite: lol_html::Selector,
}

impl HtmlPage {
    pub fn parse(source: &str, config: &MountConfig) -> Result<Self, MountError> {
        let selectors = ContainerRole::ALL
            .into_iter()
            .zip(config.selectors())
            .map(|(role, (_, selector))| {
                let invalid = |message: String| MountError::Selector {
                    role,
                    selector: selector.to_string(),
                    message,
                };
                Ok(ContainerSelector {
                    role,
                    lookup: Selector::parse(selector).map_err(|e| invalid(e.to_string()))?,
                    rewrite: selector
                        .parse::<lol_html::Selector>()
                        .map_err(|e| invalid(e.to_string()))?,
                })
            })
            .collect::<Result<Vec<_>, MountError>>()?;

        Ok(Self {
            source: source.to_string(),
            selectors,
        })
    }

    /// The document, including every container replaced so far.
    pub fn to_html(&self) -> String {
        self.source.clone()
    }

    fn selector(&self, role: ContainerRole) -> Option<&ContainerSelector> {
        self.selectors.iter().find(|selector| selector.role == role)
    }
}

impl MountTarget for HtmlPage {
    fn replace_content(&mut self, role: ContainerRole, html: &str) -> bool {
        let Some(selector) = self.selector(role) else {
            return false;
        };

        // Streamed, so bytes outside the container pass through untouched.
        // Only the first match is replaced.
        let matched = Cell::new(false);
        let handlers = ElementContentHandlers::default().element(replace_first(&matched, html));
        let settings = RewriteStrSettings {
            element_content_handlers: vec![(Cow::Borrowed(&selector.rewrite), handlers)],
            ..RewriteStrSettings::new()
        };

        match lol_html::rewrite_str(&self.source, settings) {
            Ok(rewritten) if matched.get() => {
                self.source = rewritten;
                true
            }
            Ok(_) => false,
            Err(err) => {
                tracing::warn!(container = %role, error = %err, "failed to rewrite container");
                false
            }
        }
    }

    fn has_content(&self, role: ContainerRole) -> Option<bool> {
        let selector = self.selector(role)?;
        let document = Html::parse_document(&self.source);
        let container = document.select(&selector.lookup).next()?;
        Some(container.children().any(|child| child.value().is_element()))
    }
}

/// Element handler setting the inner content of the first element it sees.
fn replace_first<'h>(
    matched: &'h Cell<bool>,
    html: &'h str,
) -> impl FnMut(&mut Element<'_, '_>) -> HandlerResult + 'h {
    move |element| {
        if !matched.get() {
            matched.set(true);
            element.set_inner_content(html, ContentType::Html);
        }
        Ok(())
    }
}
