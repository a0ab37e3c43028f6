//! HTML fragment rendering.
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the crate's markup:
//! fragments are plain `Markup` values, all interpolated text is escaped, and
//! rendering is a pure function of its inputs, so the same page always
//! renders to byte-identical output.
//!
//! ## Navigation list
//!
//! ```html
//! <li><a href="index.html" class="nav-link">Home</a></li>
//! <li><a href="docs.html" class="nav-link active">Client Docs</a></li>
//! ...
//! <li><a href="https://github.com/…" target="_blank" rel="noopener" class="nav-link github-link">GitHub</a></li>
//! ```
//!
//! ## Language switcher
//!
//! ```html
//! <a href="docs.html" class="lang-btn active">EN</a><a href="docs_ru.html" class="lang-btn">RU</a>
//! ```

use crate::config::RenderConfig;
use crate::resolve::{LanguageSwitch, ResolvedLink};
use crate::types::AnchorLink;
use maud::{Markup, html};

/// Render the global navigation entries followed by the external link.
pub fn render_nav_links(links: &[ResolvedLink], external_href: &str, config: &RenderConfig) -> Markup {
    html! {
        @for link in links {
            li {
                a href=(link.entry.href) class=(link_class(config, link.is_active)) {
                    (link.entry.text)
                }
            }
        }
        (external_link(external_href, config))
    }
}

/// Render a page's local anchors followed by the external link.
///
/// Used for the home page when navigation collapses to local anchors.
pub fn render_anchor_links(anchors: &[AnchorLink], external_href: &str, config: &RenderConfig) -> Markup {
    html! {
        @for anchor in anchors {
            li {
                a href=(anchor.href) { (anchor.text) }
            }
        }
        (external_link(external_href, config))
    }
}

/// Render the two language switcher buttons, current language first.
pub fn render_language_switcher(switch: &LanguageSwitch, config: &RenderConfig) -> Markup {
    let button = config.language_button_class.as_str();
    html! {
        a href=(switch.current_href) class={ (button) " " (config.active_class) } {
            (switch.current_name)
        }
        a href=(switch.other_href) class=(button) {
            (switch.other_name)
        }
    }
}

fn external_link(href: &str, config: &RenderConfig) -> Markup {
    html! {
        li {
            a href=(href) target="_blank" rel="noopener"
                class={ (config.link_class) " " (config.external_class) } {
                (config.external_label)
            }
        }
    }
}

fn link_class(config: &RenderConfig, is_active: bool) -> String {
    if is_active {
        format!("{} {}", config.link_class, config.active_class)
    } else {
        config.link_class.clone()
    }
}
