use url::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Sync timeout is not 0
/// - Site URLs are absolute http(s) URLs
/// - Storage path is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.sync.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "sync.timeout_secs cannot be 0".to_string(),
        ));
    }

    validate_http_url("site.base_url", &config.site.base_url)?;
    validate_http_url("site.new_files_url", &config.site.new_files_url)?;

    if config.storage.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::ValidationError(format!("{} is not a valid URL: {}", field, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::ValidationError(format!(
            "{} must use http or https, got {}",
            field, other
        ))),
    }
}
