//! Catalog persistence: JSON snapshots, optionally gzip-compressed.
//!
//! The document has two top-level fields, `entries` (checksum -> record) and
//! `consoles` (sources in discovery order). The compressed variant is the
//! same bytes in a single gzip member named `database.json`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::Utc;
use flate2::read::GzDecoder;
use flate2::{Compression, GzBuilder};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogSnapshot};

/// Name stored in the gzip header.
const GZIP_MEMBER_NAME: &str = "database.json";

/// Errors for catalog persistence.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Decompression error: {0}")]
    Decompression(String),
}

/// Write the catalog as pretty-printed JSON. Returns the bytes written.
pub fn dump<W: Write>(catalog: &Catalog, mut writer: W) -> Result<usize, PersistError> {
    info!("Dumping catalog");
    let bytes = serde_json::to_vec_pretty(&catalog.snapshot())?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(bytes.len())
}

/// Write the catalog as gzip-compressed JSON. Returns the uncompressed size.
pub fn dump_compressed<W: Write>(catalog: &Catalog, writer: W) -> Result<usize, PersistError> {
    info!("Dumping catalog (gzip)");
    let mtime = u32::try_from(Utc::now().timestamp()).unwrap_or(0);
    let mut encoder = GzBuilder::new()
        .filename(GZIP_MEMBER_NAME)
        .mtime(mtime)
        .write(writer, Compression::default());

    let bytes = serde_json::to_vec(&catalog.snapshot())?;
    encoder.write_all(&bytes)?;
    encoder.finish()?.flush()?;
    Ok(bytes.len())
}

/// Replace the catalog's state with a JSON document read from `reader`.
pub fn load<R: Read>(catalog: &Catalog, mut reader: R) -> Result<(), PersistError> {
    info!("Loading catalog");
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    restore_from_json(catalog, &bytes)
}

/// Replace the catalog's state with a gzip-compressed JSON document.
pub fn load_compressed<R: Read>(catalog: &Catalog, mut reader: R) -> Result<(), PersistError> {
    info!("Loading catalog (gzip)");
    let mut compressed = Vec::new();
    reader.read_to_end(&mut compressed)?;

    let mut bytes = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut bytes)
        .map_err(|e| PersistError::Decompression(e.to_string()))?;

    restore_from_json(catalog, &bytes)
}

fn restore_from_json(catalog: &Catalog, bytes: &[u8]) -> Result<(), PersistError> {
    let snapshot: CatalogSnapshot = serde_json::from_slice(bytes)?;
    debug!(
        entries = snapshot.entries.len(),
        consoles = snapshot.consoles.len(),
        "Catalog snapshot decoded"
    );
    catalog.restore(snapshot);
    Ok(())
}

/// Save to a file, compressed or plain.
pub fn dump_to_path(catalog: &Catalog, path: &Path, compress: bool) -> Result<usize, PersistError> {
    let writer = BufWriter::new(File::create(path)?);
    if compress {
        dump_compressed(catalog, writer)
    } else {
        dump(catalog, writer)
    }
}

/// Load from a file, compressed or plain.
pub fn load_from_path(catalog: &Catalog, path: &Path, compress: bool) -> Result<(), PersistError> {
    let reader = BufReader::new(File::open(path)?);
    if compress {
        load_compressed(catalog, reader)
    } else {
        load(catalog, reader)
    }
}
