//! Testing utilities and mock implementations.
//!
//! This module provides a canned [`Fetcher`](crate::fetcher::Fetcher), an
//! in-memory [`SyncObserver`](crate::sync::SyncObserver) and HTML builders,
//! so the sync engine can be exercised end to end without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use vgmsync_core::testing::{fixtures, MockFetcher, RecordingObserver};
//!
//! let fetcher = Arc::new(MockFetcher::new());
//! fetcher.respond("https://vgmusic.test/nes", FetchResponse::ok(fixtures::archive_page(&[
//!     fixtures::header_row("Metroid"),
//!     fixtures::archive_row("Brinstar", "brinstar.mid", 1234, "someone", "c0ffee"),
//! ])));
//!
//! let observer = Arc::new(RecordingObserver::new());
//! let engine = SyncEngine::new(fetcher, options).with_observer(observer.clone());
//! ```

mod mock_fetcher;
mod recording_observer;

pub use mock_fetcher::MockFetcher;
pub use recording_observer::RecordingObserver;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::record::Record;

    /// A listing page whose first table holds the banner row, the column
    /// heading row and then `rows`.
    pub fn archive_page(rows: &[String]) -> String {
        format!(
            r#"<html><head><title>Listing</title></head><body>
<table>
<tr><td colspan="4">VGMusic.com</td></tr>
<tr><th>Song</th><th>Size</th><th>Author</th><th>Info</th></tr>
{}
</table>
</body></html>"#,
            rows.join("\n")
        )
    }

    /// A group heading row.
    pub fn header_row(name: &str) -> String {
        format!(r#"<tr class="header"><td colspan="4">{}</td></tr>"#, name)
    }

    /// A blank separator row.
    pub fn spacer_row() -> String {
        r#"<tr><td colspan="4"> </td></tr>"#.to_string()
    }

    /// An archive-layout record row.
    pub fn archive_row(title: &str, file: &str, size: u64, author: &str, checksum: &str) -> String {
        format!(
            r#"<tr><td><a href="{}">{}</a></td><td>{} bytes</td><td>{}</td><td><a href="/file/{}.html">Info</a></td></tr>"#,
            file, title, size, author, checksum
        )
    }

    /// A new-files-layout record row.
    #[allow(clippy::too_many_arguments)]
    pub fn new_files_row(
        date: &str,
        console: &str,
        game: &str,
        title: &str,
        file: &str,
        author: &str,
        size: u64,
        checksum: &str,
    ) -> String {
        format!(
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td><a href="{}">{}</a></td><td>{}</td><td>{} bytes</td><td><a href="/file/{}.html">Info</a></td></tr>"#,
            date, console, game, file, title, author, size, checksum
        )
    }

    /// An index page with one `p.menu` per entry of `menus`, each holding
    /// `(link text, href)` anchors.
    pub fn index_page(menus: &[&[(&str, &str)]]) -> String {
        let menus: Vec<String> = menus
            .iter()
            .map(|links| {
                let anchors: Vec<String> = links
                    .iter()
                    .map(|(name, href)| format!(r#"<a href="{}">{}</a>"#, href, name))
                    .collect();
                format!(r#"<p class="menu">{}</p>"#, anchors.join("<br>"))
            })
            .collect();
        format!(
            "<html><head><title>VGMusic</title></head><body>{}</body></html>",
            menus.join("\n")
        )
    }

    /// A record with plausible defaults.
    pub fn record(checksum: &str, title: &str, console: &str) -> Record {
        Record {
            url: format!("https://vgmusic.test/music/{}.mid", checksum),
            title: title.to_string(),
            size: 4096,
            author: "Test Author".to_string(),
            game: "Test Game".to_string(),
            console: console.to_string(),
            checksum: checksum.to_string(),
        }
    }
}
