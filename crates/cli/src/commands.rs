//! Subcommand implementations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use vgmsync_core::{
    dump_to_path, load_config, load_from_path, validate_config, Catalog, Config, HttpFetcher,
    Record, StorageConfig, SyncEngine, SyncOptions,
};

/// Config file looked for in the working directory.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "vgmsync.toml";

/// Environment variable naming the config file.
pub(crate) const CONFIG_ENV: &str = "VGMSYNC_CONFIG";

/// Pick the config file: the flag, then the environment, then
/// `vgmsync.toml` if it exists. `None` means built-in defaults.
pub(crate) fn config_path(flag: Option<PathBuf>, env: Option<String>) -> Option<PathBuf> {
    flag.or_else(|| env.map(PathBuf::from)).or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    })
}

pub(crate) fn resolve_config(flag: Option<PathBuf>) -> Result<Config> {
    let config = match config_path(flag, std::env::var(CONFIG_ENV).ok()) {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => {
            info!("No configuration file, using defaults");
            Config::default()
        }
    };

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

/// Load the saved catalog, or start empty when none exists yet.
pub(crate) fn open_catalog(storage: &StorageConfig) -> Result<Catalog> {
    let catalog = Catalog::new();
    if storage.path.exists() {
        load_from_path(&catalog, &storage.path, storage.compress)
            .with_context(|| format!("Failed to load catalog from {:?}", storage.path))?;
        let stats = catalog.stats();
        info!(
            entries = stats.entries,
            consoles = stats.consoles,
            "Loaded catalog from {:?}",
            storage.path
        );
    } else {
        info!("No catalog at {:?}, starting empty", storage.path);
    }
    Ok(catalog)
}

fn save_catalog(catalog: &Catalog, storage: &StorageConfig) -> Result<()> {
    let bytes = dump_to_path(catalog, &storage.path, storage.compress)
        .with_context(|| format!("Failed to save catalog to {:?}", storage.path))?;
    info!(bytes, "Saved catalog to {:?}", storage.path);
    Ok(())
}

fn engine(config: &Config) -> Result<SyncEngine> {
    let fetcher = HttpFetcher::new(&config.sync).context("Failed to create HTTP client")?;
    Ok(SyncEngine::new(Arc::new(fetcher), SyncOptions::from(config)))
}

/// Discover, refresh and save. The catalog is saved even when some sources
/// failed; the first failure is returned afterwards.
pub(crate) async fn sync(config: &Config) -> Result<()> {
    let catalog = open_catalog(&config.storage)?;
    let engine = engine(config)?;

    engine
        .discover(&catalog)
        .await
        .context("Source discovery failed")?;

    let report = engine.refresh_report(&catalog).await;
    let failure = report.first_error().cloned();
    if let Some(error) = &failure {
        warn!(
            before = report.before.entries,
            after = report.after.entries,
            failed = report.count("failed"),
            "Refresh incomplete: {}",
            error
        );
    } else {
        info!(
            before = report.before.entries,
            after = report.after.entries,
            parsed = report.count("parsed"),
            unchanged = report.count("unchanged"),
            "Refresh complete"
        );
    }

    save_catalog(&catalog, &config.storage)?;

    match failure {
        Some(error) => Err(error).context("Some sources failed to refresh"),
        None => Ok(()),
    }
}

pub(crate) async fn discover(config: &Config) -> Result<()> {
    let catalog = open_catalog(&config.storage)?;
    let count = engine(config)?
        .discover(&catalog)
        .await
        .context("Source discovery failed")?;

    for source in catalog.sources() {
        println!("{}\t{}", source.name, source.url);
    }
    info!(sources = count, "Discovery complete");

    save_catalog(&catalog, &config.storage)
}

pub(crate) fn stats(config: &Config) -> Result<()> {
    let stats = open_catalog(&config.storage)?.stats();
    println!("entries: {}", stats.entries);
    println!("consoles: {}", stats.consoles);
    Ok(())
}

pub(crate) fn search(config: &Config, text: &str) -> Result<()> {
    let catalog = open_catalog(&config.storage)?;
    let mut hits = find(&catalog, text);
    hits.sort_by(|a, b| (&a.console, &a.game, &a.title).cmp(&(&b.console, &b.game, &b.title)));

    for record in &hits {
        println!(
            "{} | {} | {} | {} | {}",
            record.console, record.game, record.title, record.author, record.url
        );
    }
    info!(matches = hits.len(), "Search complete");
    Ok(())
}

/// Records whose title, game, author or console contains `text`, ignoring case.
pub(crate) fn find(catalog: &Catalog, text: &str) -> Vec<Record> {
    let needle = text.to_lowercase();
    catalog.search(|r| {
        [&r.title, &r.game, &r.author, &r.console]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    })
}
