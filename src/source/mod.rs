//! Source — the remote boundaries the gallery talks to.
//!
//! DESIGN
//! ======
//! Two request/response traits: `PageDataSource` lists one page of image
//! metadata, `ByteFetcher` retrieves the raw payload behind a URL. Neither
//! retries, caches, or holds state between calls; retry is a user action.
//! `PicsumClient` implements both over HTTP. Tests substitute mocks.

pub mod picsum;
pub mod types;

use types::{ImageRecord, NetworkError};

// =============================================================================
// TRAITS
// =============================================================================

/// Paged image-listing boundary.
#[async_trait::async_trait]
pub trait PageDataSource: Send + Sync {
    /// Fetch one page of image records.
    ///
    /// The result may hold fewer than `page_size` records (last page).
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] on transport or decoding failure.
    async fn fetch_page(&self, page_number: u32, page_size: u32) -> Result<Vec<ImageRecord>, NetworkError>;
}

/// Raw byte retrieval boundary.
#[async_trait::async_trait]
pub trait ByteFetcher: Send + Sync {
    /// Fetch the full payload behind `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] if the request fails or the status is not 2xx.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, NetworkError>;
}
