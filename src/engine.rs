//! The navigation engine.
//!
//! [`Navigator`] ties the pipeline together for one URL path:
//!
//! ```text
//! url path → identity → active links + language switch → fragments
//! ```
//!
//! It owns the validated [`LinkTable`] plus the render and mount settings.
//! Rendering takes `&self` and is shared freely between threads; the two
//! extension points take `&mut self` and re-validate before committing.

use crate::config::{ConfigError, MountConfig, NavConfig, RenderConfig};
use crate::identity::{base_name, resolve_identity};
use crate::render::{render_anchor_links, render_language_switcher, render_nav_links};
use crate::resolve::{active_links, language_switch};
use crate::table::LinkTable;
use crate::types::{LanguageConfig, ResolvedPageIdentity};
use serde::Serialize;

/// Rendered navigation for one page.
///
/// `nav_links` goes into both the primary and the mobile navigation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavFragments {
    pub identity: ResolvedPageIdentity,
    pub nav_links: String,
    pub language_switcher: String,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    table: LinkTable,
    render: RenderConfig,
    mount: MountConfig,
    collapse_home_to_anchors: bool,
}

impl Navigator {
    /// Validate `config` and build a navigator from it.
    pub fn new(config: &NavConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            table: LinkTable::from_config(config)?,
            render: config.render.clone(),
            mount: config.mount.clone(),
            collapse_home_to_anchors: config.collapse_home_to_anchors,
        })
    }

    pub fn table(&self) -> &LinkTable {
        &self.table
    }

    pub fn mount_config(&self) -> &MountConfig {
        &self.mount
    }

    /// Resolve the identity of the page at `url_path`.
    pub fn identify(&self, url_path: &str) -> ResolvedPageIdentity {
        resolve_identity(&self.table, url_path)
    }

    /// Render every fragment for the page at `url_path`.
    pub fn render(&self, url_path: &str) -> NavFragments {
        self.render_identity(self.identify(url_path))
    }

    /// Render every fragment for an already resolved page.
    pub fn render_identity(&self, identity: ResolvedPageIdentity) -> NavFragments {
        let external_href = self.table.external_link(&base_name(&self.table, &identity));
        let language = self.table.language(&identity.language);

        let nav_links = match language {
            Some(language) if self.shows_local_anchors(&identity) => {
                render_anchor_links(&language.anchors, external_href, &self.render)
            }
            Some(language) => render_nav_links(
                &active_links(identity.page_id.as_deref(), language),
                external_href,
                &self.render,
            ),
            None => render_nav_links(&[], external_href, &self.render),
        };
        let switch = language_switch(&self.table, &identity);
        let language_switcher = render_language_switcher(&switch, &self.render);

        NavFragments {
            identity,
            nav_links: nav_links.into_string(),
            language_switcher: language_switcher.into_string(),
        }
    }

    /// Register an additional language. See [`LinkTable::register_language`].
    pub fn register_language(
        &mut self,
        code: &str,
        language: LanguageConfig,
    ) -> Result<(), ConfigError> {
        self.table.register_language(code, language)
    }

    /// Merge extra external links. See [`LinkTable::merge_external_links`].
    pub fn merge_external_links<I>(&mut self, links: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.table.merge_external_links(links);
    }

    fn shows_local_anchors(&self, identity: &ResolvedPageIdentity) -> bool {
        self.collapse_home_to_anchors
            && identity.page_id.is_some()
            && identity.page_id.as_deref() == self.table.home_id()
    }
}
