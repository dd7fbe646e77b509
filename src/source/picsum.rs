//! Picsum listing client.
//!
//! Thin HTTP wrapper for `GET <list_url>?page=N&limit=M` and plain byte
//! downloads. Pure parsing in `parse_page` for testability.

use std::time::Duration;

use tracing::debug;

use super::types::{ImageRecord, NetworkError};
use super::{ByteFetcher, PageDataSource};
use crate::config::GalleryConfig;

// =============================================================================
// CLIENT
// =============================================================================

pub struct PicsumClient {
    http: reqwest::Client,
    list_url: String,
}

impl PicsumClient {
    /// Build a client from the gallery configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &GalleryConfig) -> Result<Self, NetworkError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| NetworkError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, list_url: config.list_url.clone() })
    }

    async fn get(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, NetworkError> {
        let response = request
            .send()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status { status: status.as_u16(), url: response.url().to_string() });
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl PageDataSource for PicsumClient {
    async fn fetch_page(&self, page_number: u32, page_size: u32) -> Result<Vec<ImageRecord>, NetworkError> {
        let request = self
            .http
            .get(&self.list_url)
            .query(&[("page", page_number), ("limit", page_size)]);

        let text = self
            .get(request)
            .await?
            .text()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        parse_page(&text)
    }
}

#[async_trait::async_trait]
impl ByteFetcher for PicsumClient {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, NetworkError> {
        let bytes = self
            .get(self.http.get(url))
            .await?
            .bytes()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Deserialize)]
struct WireImage {
    id: String,
    author: String,
    download_url: String,
    width: u32,
    height: u32,
    #[serde(default)]
    url: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Decode a listing body into records.
///
/// The body must be a JSON array. Entries that fail to decode or carry a zero
/// dimension are skipped, so a partly malformed page yields the good subset.
fn parse_page(json: &str) -> Result<Vec<ImageRecord>, NetworkError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json).map_err(|e| NetworkError::Decode(e.to_string()))?;

    let records = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<WireImage>(entry) {
            Ok(wire) if wire.width > 0 && wire.height > 0 => Some(ImageRecord {
                id: wire.id,
                author: wire.author,
                source_url: wire.download_url,
                width: wire.width,
                height: wire.height,
                page_url: wire.url,
            }),
            Ok(wire) => {
                debug!(index, id = %wire.id, "listing: skipping entry with zero dimension");
                None
            }
            Err(e) => {
                debug!(index, error = %e, "listing: skipping malformed entry");
                None
            }
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
#[path = "picsum_test.rs"]
mod tests;
