use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::browser::SortKey;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    5000
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("makerscan.db")
}

/// Browser session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserConfig {
    /// Persistent profile directory. Cookies and fingerprint survive across runs.
    #[serde(default = "default_profile_dir")]
    pub profile_dir: PathBuf,
    /// Run without a visible window.
    #[serde(default)]
    pub headless: bool,
    /// Explicit Chromium binary; auto-detected when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    /// Marketplace origin (e.g., "https://makerworld.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Locale path segment of the search page.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Bounded wait for the first result anchor on a search page (milliseconds).
    #[serde(default = "default_search_timeout")]
    pub search_timeout_ms: u64,
    /// Unconditional delay used when the search wait times out (milliseconds).
    #[serde(default = "default_fallback_delay")]
    pub fallback_delay_ms: u64,
    /// Pause after every detail page load (milliseconds).
    #[serde(default = "default_pacing_delay")]
    pub pacing_delay_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            profile_dir: default_profile_dir(),
            headless: false,
            executable: None,
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            base_url: default_base_url(),
            locale: default_locale(),
            search_timeout_ms: default_search_timeout(),
            fallback_delay_ms: default_fallback_delay(),
            pacing_delay_ms: default_pacing_delay(),
        }
    }
}

fn default_profile_dir() -> PathBuf {
    PathBuf::from("makerscan_session")
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    800
}

fn default_base_url() -> String {
    "https://makerworld.com".to_string()
}

fn default_locale() -> String {
    "es".to_string()
}

fn default_search_timeout() -> u64 {
    8000
}

fn default_fallback_delay() -> u64 {
    2000
}

fn default_pacing_delay() -> u64 {
    1500
}

/// Defaults applied to scan requests that omit filters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// 0 (all time), 7 or 30.
    #[serde(default = "default_recency_window_days")]
    pub default_recency_window_days: u32,
    #[serde(default = "default_sort_key")]
    pub default_sort_key: Option<SortKey>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            default_recency_window_days: default_recency_window_days(),
            default_sort_key: default_sort_key(),
        }
    }
}

fn default_recency_window_days() -> u32 {
    7
}

fn default_sort_key() -> Option<SortKey> {
    Some(SortKey::LikeCount)
}

/// Config view returned over the API.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub browser: SanitizedBrowserConfig,
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedBrowserConfig {
    pub profile_dir: PathBuf,
    pub headless: bool,
    pub executable_configured: bool,
    pub base_url: String,
    pub locale: String,
    pub search_timeout_ms: u64,
    pub pacing_delay_ms: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            browser: SanitizedBrowserConfig {
                profile_dir: config.browser.profile_dir.clone(),
                headless: config.browser.headless,
                executable_configured: config.browser.executable.is_some(),
                base_url: config.browser.base_url.clone(),
                locale: config.browser.locale.clone(),
                search_timeout_ms: config.browser.search_timeout_ms,
                pacing_delay_ms: config.browser.pacing_delay_ms,
            },
            scan: config.scan.clone(),
        }
    }
}
