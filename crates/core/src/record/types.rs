//! Types for catalogued records and listing layouts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A catalogued media file.
///
/// The checksum is the merge key: two records with the same checksum are the
/// same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Absolute download URL.
    pub url: String,
    /// Song title.
    pub title: String,
    /// Size in bytes (0 when the size cell could not be read).
    pub size: u64,
    /// Sequencer / arranger, may be empty.
    pub author: String,
    /// Group name inherited from the nearest preceding header row.
    pub game: String,
    /// Name of the source (console) the record was listed under.
    pub console: String,
    /// Identifier extracted from the file's info link.
    pub checksum: String,
}

/// One table cell as seen by the row parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Trimmed text content.
    pub text: String,
    /// `href` of the first anchor inside the cell, if any.
    pub href: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: Some(href.into()),
        }
    }
}

/// Table schema of a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Per-console archive page: title, size, author, info link.
    Archive,
    /// Chronological new-submissions feed: date, console, game, title,
    /// author, size, info link.
    NewFiles,
}

/// Column positions for one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub title: usize,
    pub size: usize,
    pub author: usize,
    pub checksum: usize,
    pub console: Option<usize>,
    pub game: Option<usize>,
}

impl Layout {
    /// Pick the layout for a source by the shape of its URL.
    pub fn for_url(url: &str) -> Self {
        if url.contains("new-files") {
            Layout::NewFiles
        } else {
            Layout::Archive
        }
    }

    pub fn columns(self) -> Columns {
        match self {
            Layout::Archive => Columns {
                title: 0,
                size: 1,
                author: 2,
                checksum: 3,
                console: None,
                game: None,
            },
            Layout::NewFiles => Columns {
                title: 3,
                size: 5,
                author: 4,
                checksum: 6,
                console: Some(1),
                game: Some(2),
            },
        }
    }

    /// Number of cells a complete row has.
    pub fn cell_count(self) -> usize {
        match self {
            Layout::Archive => 4,
            Layout::NewFiles => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Archive => "archive",
            Layout::NewFiles => "new-files",
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors for row parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Malformed row: {0}")]
    MalformedRow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_for_url() {
        assert_eq!(
            Layout::for_url("https://www.vgmusic.com/music/console/nintendo/nes"),
            Layout::Archive
        );
        assert_eq!(
            Layout::for_url("https://www.vgmusic.com/new-files/index.php?&s1=date"),
            Layout::NewFiles
        );
    }

    #[test]
    fn test_layout_serialization() {
        assert_eq!(
            serde_json::to_string(&Layout::NewFiles).unwrap(),
            "\"new-files\""
        );
        assert_eq!(
            serde_json::to_string(&Layout::Archive).unwrap(),
            "\"archive\""
        );
    }

    #[test]
    fn test_columns_fit_cell_count() {
        for layout in [Layout::Archive, Layout::NewFiles] {
            let cols = layout.columns();
            let max = [cols.title, cols.size, cols.author, cols.checksum]
                .into_iter()
                .chain(cols.console)
                .chain(cols.game)
                .max()
                .unwrap();
            assert_eq!(max + 1, layout.cell_count());
        }
    }

    #[test]
    fn test_record_json_field_names() {
        let record = Record {
            url: "https://vgmusic.com/music/console/nintendo/nes/smb.mid".to_string(),
            title: "Overworld".to_string(),
            size: 1234,
            author: "someone".to_string(),
            game: "Super Mario Bros.".to_string(),
            console: "NES".to_string(),
            checksum: "deadbeef".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        for key in ["url", "title", "size", "author", "game", "console", "checksum"] {
            assert!(value.get(key).is_some(), "missing field {}", key);
        }
        assert_eq!(value["size"], 1234);
    }
}
