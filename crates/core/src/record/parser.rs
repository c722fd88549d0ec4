//! Row parser: ordered cells + layout -> [`Record`].

use once_cell::sync::Lazy;
use regex_lite::Regex;
use url::Url;

use super::{Cell, Layout, Record, RecordError};

/// Info links look like `/file/<checksum>.html`.
static CHECKSUM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/file/(.*?)\.html").expect("checksum pattern is a valid regex")
});

const SIZE_SUFFIX: &str = " bytes";

/// Extract the file checksum from an info-link `href`.
///
/// This is the single place that knows the site's `/file/<id>.html` scheme.
pub fn extract_checksum(href: &str) -> Option<&str> {
    CHECKSUM_RE
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|checksum| !checksum.is_empty())
}

/// Parse a size cell such as `"12345 bytes"`. Unreadable sizes are 0.
pub fn parse_size(text: &str) -> u64 {
    text.replace(SIZE_SUFFIX, "").trim().parse().unwrap_or(0)
}

/// Parse one row into a [`Record`].
///
/// Only the checksum is mandatory; every other absent or unreadable cell
/// degrades to an empty string or zero. `console` and `game` are filled from
/// the row itself for layouts that carry them, and left empty otherwise.
pub fn parse_row(cells: &[Cell], layout: Layout, base: &Url) -> Result<Record, RecordError> {
    let cols = layout.columns();

    let checksum_cell = cells.get(cols.checksum).ok_or_else(|| {
        RecordError::MalformedRow(format!(
            "expected {} cells for {} layout, found {}",
            layout.cell_count(),
            layout,
            cells.len()
        ))
    })?;
    let href = checksum_cell
        .href
        .as_deref()
        .ok_or_else(|| RecordError::MalformedRow("checksum cell has no link".to_string()))?;
    let checksum = extract_checksum(href)
        .ok_or_else(|| RecordError::MalformedRow(format!("no checksum in link {}", href)))?;

    let text_at = |idx: usize| cells.get(idx).map(|c| c.text.clone()).unwrap_or_default();
    let title_cell = cells.get(cols.title);

    Ok(Record {
        url: title_cell
            .and_then(|c| c.href.as_deref())
            .map(|href| resolve(base, href))
            .unwrap_or_default(),
        title: text_at(cols.title),
        size: cells.get(cols.size).map(|c| parse_size(&c.text)).unwrap_or(0),
        author: text_at(cols.author),
        game: cols.game.map(text_at).unwrap_or_default(),
        console: cols.console.map(text_at).unwrap_or_default(),
        checksum: checksum.to_string(),
    })
}

/// Join a possibly relative `href` against the page URL; keep it verbatim if
/// it cannot be joined.
fn resolve(base: &Url, href: &str) -> String {
    base.join(href)
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.vgmusic.com/music/console/nintendo/nes/").unwrap()
    }

    fn archive_row() -> Vec<Cell> {
        vec![
            Cell::link("Overworld Theme", "smb-overworld.mid"),
            Cell::text("4321 bytes"),
            Cell::text("John Doe"),
            Cell::link("Info", "/file/deadbeef.html"),
        ]
    }

    #[test]
    fn test_extract_checksum() {
        assert_eq!(extract_checksum("/file/deadbeef.html"), Some("deadbeef"));
        assert_eq!(
            extract_checksum("https://www.vgmusic.com/file/0a1b2c.html"),
            Some("0a1b2c")
        );
        assert_eq!(extract_checksum("/music/file.mid"), None);
        assert_eq!(extract_checksum("/file/.html"), None);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("4321 bytes"), 4321);
        assert_eq!(parse_size("99"), 99);
        assert_eq!(parse_size("unknown"), 0);
        assert_eq!(parse_size(""), 0);
    }

    #[test]
    fn test_parse_archive_row() {
        let record = parse_row(&archive_row(), Layout::Archive, &base()).unwrap();

        assert_eq!(
            record.url,
            "https://www.vgmusic.com/music/console/nintendo/nes/smb-overworld.mid"
        );
        assert_eq!(record.title, "Overworld Theme");
        assert_eq!(record.size, 4321);
        assert_eq!(record.author, "John Doe");
        assert_eq!(record.checksum, "deadbeef");
        assert!(record.game.is_empty());
        assert!(record.console.is_empty());
    }

    #[test]
    fn test_parse_new_files_row() {
        let cells = vec![
            Cell::text("2024-01-01 12:00"),
            Cell::text("NES"),
            Cell::text("Super Mario Bros."),
            Cell::link("Overworld Theme", "/music/console/nintendo/nes/smb-overworld.mid"),
            Cell::text("John Doe"),
            Cell::text("4321 bytes"),
            Cell::link("Info", "/file/deadbeef.html"),
        ];
        let record = parse_row(&cells, Layout::NewFiles, &base()).unwrap();

        assert_eq!(record.console, "NES");
        assert_eq!(record.game, "Super Mario Bros.");
        assert_eq!(record.title, "Overworld Theme");
        assert_eq!(record.author, "John Doe");
        assert_eq!(record.size, 4321);
        assert_eq!(record.checksum, "deadbeef");
    }

    #[test]
    fn test_layouts_agree_on_equivalent_rows() {
        let archive = parse_row(&archive_row(), Layout::Archive, &base()).unwrap();

        let a = archive_row();
        let new_files = vec![
            Cell::text("2024-01-01"),
            Cell::text("NES"),
            Cell::text("Super Mario Bros."),
            a[0].clone(),
            a[2].clone(),
            a[1].clone(),
            a[3].clone(),
        ];
        let mut from_feed = parse_row(&new_files, Layout::NewFiles, &base()).unwrap();

        from_feed.console.clear();
        from_feed.game.clear();
        assert_eq!(archive, from_feed);
    }

    #[test]
    fn test_unreadable_size_degrades_to_zero() {
        let mut cells = archive_row();
        cells[1] = Cell::text("n/a");
        let record = parse_row(&cells, Layout::Archive, &base()).unwrap();
        assert_eq!(record.size, 0);
    }

    #[test]
    fn test_missing_checksum_link_is_malformed() {
        let mut cells = archive_row();
        cells[3] = Cell::text("Info");
        let err = parse_row(&cells, Layout::Archive, &base()).unwrap_err();
        assert!(matches!(err, RecordError::MalformedRow(_)));
    }

    #[test]
    fn test_checksum_link_without_match_is_malformed() {
        let mut cells = archive_row();
        cells[3] = Cell::link("Info", "/music/somewhere-else.html");
        assert!(parse_row(&cells, Layout::Archive, &base()).is_err());
    }

    #[test]
    fn test_short_row_is_malformed() {
        let cells = archive_row()[..2].to_vec();
        let err = parse_row(&cells, Layout::Archive, &base()).unwrap_err();
        assert!(err.to_string().contains("expected 4 cells"));
    }

    #[test]
    fn test_title_without_link_has_empty_url() {
        let mut cells = archive_row();
        cells[0] = Cell::text("Unlinked");
        let record = parse_row(&cells, Layout::Archive, &base()).unwrap();
        assert_eq!(record.title, "Unlinked");
        assert!(record.url.is_empty());
    }
}
