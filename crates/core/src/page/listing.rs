//! Listing page parser.

use url::Url;

use super::PageError;
use crate::markup::{first_href, has_class, text_of, Document, CELL, ROW, TABLE};
use crate::record::{parse_row, Cell, Record, RecordError};
use crate::source::SourceDescriptor;

/// Rows before this index are the banner and column headings.
const FIRST_DATA_ROW: usize = 2;

/// Result of parsing one listing page.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Records in page order.
    pub records: Vec<Record>,
    /// Rows that looked like records but could not be parsed.
    pub skipped: Vec<SkippedRow>,
}

/// A row dropped because it could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based row index within the table.
    pub index: usize,
    pub error: RecordError,
}

/// Parse the first table of a listing page into records.
///
/// Header rows (`<tr class="header">`) set the group name inherited by the
/// records below them; blank rows are spacers. Malformed rows are skipped and
/// reported in [`ParsedPage::skipped`] without affecting their neighbours.
pub fn parse_listing(doc: &Document, source: &SourceDescriptor) -> Result<ParsedPage, PageError> {
    let base = page_base(&source.url)?;
    let layout = source.layout();

    let mut page = ParsedPage::default();
    let Some(table) = doc.select_first(&TABLE) else {
        return Ok(page);
    };

    let mut group = String::new();

    for (index, row) in table.select(&ROW).enumerate().skip(FIRST_DATA_ROW) {
        let text = text_of(&row);
        if text.is_empty() {
            continue;
        }
        if has_class(&row, "header") {
            group = text;
            continue;
        }

        let cells: Vec<Cell> = row
            .select(&CELL)
            .map(|td| Cell {
                text: text_of(&td),
                href: first_href(&td).map(str::to_string),
            })
            .collect();

        match parse_row(&cells, layout, &base) {
            Ok(mut record) => {
                if record.console.is_empty() {
                    record.console = source.name.clone();
                }
                if record.game.is_empty() {
                    record.game = group.clone();
                }
                page.records.push(record);
            }
            Err(error) => page.skipped.push(SkippedRow { index, error }),
        }
    }

    Ok(page)
}

/// Base URL for the relative links on a listing page.
///
/// Discovered source URLs have their trailing `/` trimmed, so a last path
/// segment without an extension names a directory and gets it back.
fn page_base(url: &str) -> Result<Url, PageError> {
    let mut base = Url::parse(url).map_err(|e| PageError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let is_file = base
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .is_some_and(|last| last.contains('.'));
    if !is_file && !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    fn nes() -> SourceDescriptor {
        SourceDescriptor::new("NES", "https://www.vgmusic.com/music/console/nintendo/nes/")
    }

    fn parse(html: &str, source: &SourceDescriptor) -> ParsedPage {
        let doc = Document::parse(html).unwrap();
        parse_listing(&doc, source).unwrap()
    }

    #[test]
    fn test_header_rows_set_group() {
        let html = fixtures::archive_page(&[
            fixtures::header_row("Super Mario Bros."),
            fixtures::archive_row("Overworld", "smb1.mid", 100, "Alice", "aaa111"),
            fixtures::archive_row("Underworld", "smb2.mid", 200, "Bob", "bbb222"),
            fixtures::header_row("Zelda"),
            fixtures::archive_row("Title", "zelda.mid", 300, "Carol", "ccc333"),
        ]);

        let page = parse(&html, &nes());

        assert!(page.skipped.is_empty());
        assert_eq!(page.records.len(), 3);
        assert_eq!(page.records[0].game, "Super Mario Bros.");
        assert_eq!(page.records[1].game, "Super Mario Bros.");
        assert_eq!(page.records[2].game, "Zelda");
        assert!(page.records.iter().all(|r| r.console == "NES"));
        assert_eq!(
            page.records[0].url,
            "https://www.vgmusic.com/music/console/nintendo/nes/smb1.mid"
        );
    }

    #[test]
    fn test_records_before_any_header_have_empty_group() {
        let html = fixtures::archive_page(&[fixtures::archive_row(
            "Orphan", "orphan.mid", 1, "Dan", "ddd444",
        )]);
        let page = parse(&html, &nes());
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].game, "");
    }

    #[test]
    fn test_spacer_rows_keep_group() {
        let html = fixtures::archive_page(&[
            fixtures::header_row("Metroid"),
            fixtures::spacer_row(),
            fixtures::archive_row("Brinstar", "brinstar.mid", 10, "Eve", "eee555"),
        ]);
        let page = parse(&html, &nes());
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].game, "Metroid");
    }

    #[test]
    fn test_first_two_rows_are_skipped() {
        // A valid record in row 1 must not be picked up.
        let html = r#"<html><body><table>
            <tr><td>Banner</td></tr>
            <tr><td><a href="x.mid">X</a></td><td>1 bytes</td><td>A</td><td><a href="/file/fff.html">i</a></td></tr>
            <tr><td><a href="y.mid">Y</a></td><td>2 bytes</td><td>B</td><td><a href="/file/ggg.html">i</a></td></tr>
        </table></body></html>"#;
        let page = parse(html, &nes());
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].checksum, "ggg");
    }

    #[test]
    fn test_only_first_table_is_parsed() {
        let mut html = fixtures::archive_page(&[fixtures::archive_row(
            "One", "one.mid", 1, "A", "first1",
        )]);
        html = html.replace(
            "</body>",
            &format!(
                "<table><tr><td>b</td></tr><tr><td>h</td></tr>{}</table></body>",
                fixtures::archive_row("Two", "two.mid", 2, "B", "second2")
            ),
        );
        let page = parse(&html, &nes());
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].checksum, "first1");
    }

    #[test]
    fn test_short_table_yields_nothing() {
        let page = parse("<html><body><table><tr><td>Banner</td></tr></table></body></html>", &nes());
        assert!(page.records.is_empty());
        assert!(page.skipped.is_empty());
    }

    #[test]
    fn test_no_table_yields_nothing() {
        let page = parse("<html><body><p>Nothing here</p></body></html>", &nes());
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_malformed_row_is_skipped() {
        let html = fixtures::archive_page(&[
            fixtures::header_row("Kirby"),
            fixtures::archive_row("Good", "good.mid", 1, "A", "good1"),
            "<tr><td><a href=\"bad.mid\">Bad</a></td><td>5 bytes</td><td>B</td><td>no link</td></tr>"
                .to_string(),
            fixtures::archive_row("Also good", "good2.mid", 2, "C", "good2"),
        ]);

        let page = parse(&html, &nes());

        assert_eq!(page.records.len(), 2);
        assert_eq!(page.skipped.len(), 1);
        assert_eq!(page.skipped[0].index, 4);
        assert!(matches!(page.skipped[0].error, RecordError::MalformedRow(_)));
    }

    #[test]
    fn test_new_files_rows_keep_their_own_console() {
        let source = SourceDescriptor::new(
            "New Files",
            "https://www.vgmusic.com/new-files/index.php?&s1=date",
        );
        let html = fixtures::archive_page(&[fixtures::new_files_row(
            "2024-03-01",
            "SNES",
            "Chrono Trigger",
            "Corridors of Time",
            "/music/console/nintendo/snes/cot.mid",
            "Frank",
            999,
            "c0ffee",
        )]);

        let page = parse(&html, &source);

        assert_eq!(page.records.len(), 1);
        let record = &page.records[0];
        assert_eq!(record.console, "SNES");
        assert_eq!(record.game, "Chrono Trigger");
        assert_eq!(record.size, 999);
        assert_eq!(
            record.url,
            "https://www.vgmusic.com/music/console/nintendo/snes/cot.mid"
        );
    }

    #[test]
    fn test_trimmed_source_url_resolves_inside_its_directory() {
        let source = SourceDescriptor::new("NES", "https://www.vgmusic.com/music/console/nintendo/nes");
        let html = fixtures::archive_page(&[fixtures::archive_row(
            "Overworld", "smb1.mid", 100, "Alice", "aaa111",
        )]);

        let page = parse(&html, &source);

        assert_eq!(
            page.records[0].url,
            "https://www.vgmusic.com/music/console/nintendo/nes/smb1.mid"
        );
    }

    #[test]
    fn test_page_base() {
        assert_eq!(
            page_base("https://vgmusic.com/music/console/sega/genesis").unwrap().as_str(),
            "https://vgmusic.com/music/console/sega/genesis/"
        );
        assert_eq!(
            page_base("https://vgmusic.com/music/console/sega/genesis/").unwrap().as_str(),
            "https://vgmusic.com/music/console/sega/genesis/"
        );
        assert_eq!(
            page_base("https://www.vgmusic.com/new-files/index.php?&s1=date")
                .unwrap()
                .as_str(),
            "https://www.vgmusic.com/new-files/index.php?&s1=date"
        );
        assert_eq!(page_base("https://vgmusic.com").unwrap().as_str(), "https://vgmusic.com/");
    }

    #[test]
    fn test_invalid_source_url() {
        let doc = Document::parse("<table></table>").unwrap();
        let source = SourceDescriptor::new("Broken", "not a url");
        assert!(matches!(
            parse_listing(&doc, &source),
            Err(PageError::InvalidUrl { .. })
        ));
    }
}
