use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where the listing pages live
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Index page holding the navigation sections (default: https://vgmusic.com)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Chronological feed of submissions not yet sorted into the archive
    #[serde(default = "default_new_files_url")]
    pub new_files_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            new_files_url: default_new_files_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://vgmusic.com".to_string()
}

fn default_new_files_url() -> String {
    "https://www.vgmusic.com/new-files/index.php?&s1=date".to_string()
}

/// Synchronisation behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whether the new-files feed is discovered and refreshed.
    /// The feed is large and changes constantly, so it is off by default.
    #[serde(default)]
    pub refresh_new_files: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            refresh_new_files: false,
        }
    }
}

fn default_timeout() -> u32 {
    10
}

fn default_user_agent() -> String {
    format!("vgmsync/{}", env!("CARGO_PKG_VERSION"))
}

/// Catalog snapshot location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Gzip the snapshot (default: true)
    #[serde(default = "default_compress")]
    pub compress: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            compress: default_compress(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("catalog.json.gz")
}

fn default_compress() -> bool {
    true
}
