//! Index page parser: the navigation menus list every source page.

use url::Url;

use crate::markup::{attr_of, text_of, Document, ANCHOR, MENU};
use crate::source::SourceDescriptor;

/// Sources found on the index page.
#[derive(Debug, Clone, Default)]
pub struct IndexLinks {
    /// Sources in page order, names unique.
    pub sources: Vec<SourceDescriptor>,
    /// Links that were ignored, with the reason.
    pub skipped: Vec<(String, String)>,
}

/// Collect one source per link in every navigation menu after the first.
///
/// The first menu holds site navigation rather than sources. Hrefs are
/// resolved against `base` with any trailing `/` dropped. Links without
/// text are skipped, and when two links share a name the first one wins.
pub fn parse_index(doc: &Document, base: &Url) -> IndexLinks {
    let mut links = IndexLinks::default();

    for menu in doc.select_all(&MENU).skip(1) {
        for anchor in menu.select(&ANCHOR) {
            let name = text_of(&anchor);
            let Some(href) = attr_of(&anchor, "href") else {
                continue;
            };
            if name.is_empty() {
                links
                    .skipped
                    .push((href.to_string(), "link has no text".to_string()));
                continue;
            }

            let url = match base.join(href) {
                Ok(url) => url.as_str().trim_end_matches('/').to_string(),
                Err(e) => {
                    links
                        .skipped
                        .push((href.to_string(), format!("unresolvable href: {}", e)));
                    continue;
                }
            };

            if links.sources.iter().any(|s| s.name == name) {
                links
                    .skipped
                    .push((href.to_string(), format!("duplicate source name {}", name)));
                continue;
            }

            links.sources.push(SourceDescriptor::new(name, url));
        }
    }

    links
}
