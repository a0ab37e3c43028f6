//! # docs-nav
//!
//! Navigation for a small multi-language documentation site. Every page of
//! the site carries the same global navigation list and a two-button
//! language switcher; this crate works out which page a URL path points at
//! and renders both for it.
//!
//! # Architecture: One Pipeline Per Page
//!
//! ```text
//! url path → identity  → active links      → nav list      ┐
//!            (file name,  (one entry per id,                ├→ mount → NavigationUpdated
//!             language,    current marked)   language switch┘
//!             page id)
//! ```
//!
//! Resolution is a pure lookup over a validated [`table::LinkTable`], and
//! rendering never fails: an unknown page just gets no active link and a
//! switcher pointing back at itself. All configuration problems surface once,
//! when the table is built.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `docs-nav.toml` loading, merging over stock defaults, validation |
//! | [`table`] | The link table: languages, page mapping, external links, invariants |
//! | [`types`] | Navigation entries, language tables, resolved page identity |
//! | [`identity`] | URL path → file name, language, page id, base name |
//! | [`resolve`] | Active-link resolution and the cross-language mapping |
//! | [`render`] | Nav list and language switcher markup with Maud |
//! | [`engine`] | [`engine::Navigator`], the whole pipeline behind one type |
//! | [`mount`] | Container replacement, the retry pass, `NavigationUpdated` listeners |
//! | [`site`] | Mounting every page of a built site in parallel |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Languages Are Data
//!
//! A language is a [`types::LanguageConfig`]: display name, file-name suffix,
//! links and home anchors. Nothing in the pipeline knows about English or
//! Russian; the stock configuration just happens to define those two. More
//! languages can be registered at runtime with
//! [`engine::Navigator::register_language`], which re-checks the table
//! invariants before committing.
//!
//! ## Build-Time Mounting
//!
//! Pages are rewritten once after the site is built instead of patching the
//! DOM on every page load. [`site::mount_site`] is idempotent, so it can run
//! as part of every build and only touches pages whose navigation changed.
//!
//! ## No Global State
//!
//! Listeners for [`mount::NavigationUpdated`] are handed to a
//! [`mount::Dispatcher`] explicitly, and the [`engine::Navigator`] is a plain
//! value shared by reference across worker threads.

pub mod config;
pub mod engine;
pub mod identity;
pub mod mount;
pub mod output;
pub mod render;
pub mod resolve;
pub mod site;
pub mod table;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
