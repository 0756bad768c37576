use crate::config::types::{Config, CrawlConfig, StorageConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.seed_url.is_empty() {
        return Err(ConfigError::Validation(
            "seed-url cannot be empty".to_string(),
        ));
    }

    let seed = Url::parse(&config.seed_url).map_err(|e| {
        ConfigError::Validation(format!("Invalid seed-url '{}': {}", config.seed_url, e))
    })?;

    if seed.host_str().is_none() {
        return Err(ConfigError::Validation(format!(
            "seed-url '{}' has no host",
            config.seed_url
        )));
    }

    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be >= 1, got {}",
            config.concurrency
        )));
    }

    if config.request_timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-ms must be >= 1, got {}",
            config.request_timeout_ms
        )));
    }

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.base_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "base-dir cannot be empty".to_string(),
        ));
    }

    if let Some(project) = &config.project {
        if project.is_empty() {
            return Err(ConfigError::Validation(
                "project cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
