//! Page parsers for the site's two page kinds: the index page listing every
//! source, and the listing pages holding the records.

mod index;
mod listing;

pub use index::{parse_index, IndexLinks};
pub use listing::{parse_listing, ParsedPage, SkippedRow};

use thiserror::Error;

/// Errors for page parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Invalid page URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
