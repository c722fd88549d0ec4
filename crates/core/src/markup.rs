//! Thin wrapper over `scraper` exposing the handful of queries the parsers
//! need: select elements, read trimmed text, read an attribute.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::page::PageError;

pub(crate) static TABLE: Lazy<Selector> = Lazy::new(|| selector("table"));
pub(crate) static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
pub(crate) static CELL: Lazy<Selector> = Lazy::new(|| selector("td"));
pub(crate) static ANCHOR: Lazy<Selector> = Lazy::new(|| selector("a"));
pub(crate) static MENU: Lazy<Selector> = Lazy::new(|| selector("p.menu"));

fn selector(css: &str) -> Selector {
    // Only called with the literal selectors above.
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {}", css, e))
}

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a response body. A blank body has nothing to parse and is
    /// rejected; anything else is accepted the way a browser would.
    pub fn parse(body: &str) -> Result<Self, PageError> {
        if body.trim().is_empty() {
            return Err(PageError::MalformedDocument("empty body".to_string()));
        }
        Ok(Self {
            html: Html::parse_document(body),
        })
    }

    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    pub fn select_all<'a>(
        &'a self,
        selector: &'a Selector,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(selector)
    }
}

/// Concatenated descendant text, trimmed.
pub fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn attr_of<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// `href` of the first anchor below `element`.
pub fn first_href<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element
        .select(&ANCHOR)
        .next()
        .and_then(|a| attr_of(&a, "href"))
}

pub fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}
