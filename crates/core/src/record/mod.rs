//! Catalogued media records and the row parser that produces them.
//!
//! A listing row arrives as an ordered list of [`Cell`]s; the [`Layout`] of
//! the owning source decides which column holds which field.

mod parser;
mod types;

pub use parser::{extract_checksum, parse_row, parse_size};
pub use types::*;
