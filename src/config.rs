//! Gallery configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_LIST_URL: &str = "https://picsum.photos/v2/list";
pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_TOTAL_PAGES: u32 = 10;
pub const DEFAULT_DOWNLOAD_DIR: &str = ".";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but its value is not a valid number.
    #[error("invalid value for {key}: '{value}'")]
    InvalidNumber { key: String, value: String },

    /// A variable that must be positive was set to zero.
    #[error("{key} must be greater than zero")]
    Zero { key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    pub list_url: String,
    pub page_size: u32,
    pub total_pages: u32,
    pub download_dir: PathBuf,
    pub timeouts: Timeouts,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            list_url: DEFAULT_LIST_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: DEFAULT_TOTAL_PAGES,
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            timeouts: Timeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

impl GalleryConfig {
    /// Build typed gallery config from environment variables.
    ///
    /// Optional:
    /// - `GALLERY_LIST_URL`: listing endpoint (default picsum `v2/list`)
    /// - `GALLERY_PAGE_SIZE`: records per page, default 12
    /// - `GALLERY_TOTAL_PAGES`: pages offered by the pagination bar, default 10
    /// - `GALLERY_DOWNLOAD_DIR`: where downloads are saved, default `.`
    /// - `GALLERY_REQUEST_TIMEOUT_SECS`: default 30
    /// - `GALLERY_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a numeric variable is unparseable, or if
    /// the page size or page count is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let list_url = std::env::var("GALLERY_LIST_URL")
            .unwrap_or_else(|_| DEFAULT_LIST_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let page_size = positive(env_parse("GALLERY_PAGE_SIZE", DEFAULT_PAGE_SIZE)?, "GALLERY_PAGE_SIZE")?;
        let total_pages = positive(env_parse("GALLERY_TOTAL_PAGES", DEFAULT_TOTAL_PAGES)?, "GALLERY_TOTAL_PAGES")?;
        let download_dir = std::env::var_os("GALLERY_DOWNLOAD_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR), PathBuf::from);
        let timeouts = Timeouts {
            request_secs: env_parse("GALLERY_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse("GALLERY_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { list_url, page_size, total_pages, download_dir, timeouts })
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key: key.to_string(), value: raw }),
        Err(_) => Ok(default),
    }
}

fn positive(value: u32, key: &str) -> Result<u32, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Zero { key: key.to_string() });
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
