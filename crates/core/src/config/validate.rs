use super::{types::Config, ConfigError};
use crate::browser::RecencyWindow;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Browser base URL is an http(s) origin
/// - Search timeout and viewport are non-zero
/// - Default recency window is one of the supported day counts
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let base_url = config.browser.base_url.trim();
    if base_url.is_empty() || !base_url.starts_with("http") {
        return Err(ConfigError::ValidationError(format!(
            "browser.base_url must be an http(s) URL, got '{}'",
            config.browser.base_url
        )));
    }

    if config.browser.search_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "browser.search_timeout_ms cannot be 0".to_string(),
        ));
    }

    if config.browser.viewport_width == 0 || config.browser.viewport_height == 0 {
        return Err(ConfigError::ValidationError(
            "browser viewport dimensions must be non-zero".to_string(),
        ));
    }

    RecencyWindow::try_from(config.scan.default_recency_window_days)
        .map_err(|e| ConfigError::ValidationError(format!("scan.{}", e)))?;

    Ok(())
}
