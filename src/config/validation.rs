use crate::config::types::{ApiConfig, ClientConfig, Config, ListingConfig, RenderConfig};
use crate::ConfigError;
use tokio::sync::Semaphore;
use url::Url;

/// Largest listing the API serves
pub const MAX_LISTING_LIMIT: usize = 500;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_client_config(&config.client)?;
    validate_listing_config(&config.listing)?;
    validate_render_config(&config.render)?;
    Ok(())
}

/// Validates item source configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    if let Some(limit) = config.max_concurrent_fetches {
        if limit < 1 || limit > Semaphore::MAX_PERMITS {
            return Err(ConfigError::Validation(format!(
                "max-concurrent-fetches must be between 1 and {}, got {}",
                Semaphore::MAX_PERMITS,
                limit
            )));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.client_name.is_empty() {
        return Err(ConfigError::Validation(
            "client-name cannot be empty".to_string(),
        ));
    }

    if !config
        .client_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "client-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.client_name
        )));
    }

    if config.client_version.is_empty() {
        return Err(ConfigError::Validation(
            "client-version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_listing_config(config: &ListingConfig) -> Result<(), ConfigError> {
    if config.limit < 1 || config.limit > MAX_LISTING_LIMIT {
        return Err(ConfigError::Validation(format!(
            "listing limit must be between 1 and {}, got {}",
            MAX_LISTING_LIMIT, config.limit
        )));
    }
    Ok(())
}

fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if config.indent.is_empty() {
        return Err(ConfigError::Validation(
            "render indent cannot be empty".to_string(),
        ));
    }

    if config.indent.contains('\n') {
        return Err(ConfigError::Validation(
            "render indent cannot contain a newline".to_string(),
        ));
    }

    Ok(())
}
