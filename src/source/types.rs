//! Source types — image records, page requests, and network errors.
//!
//! Shared by the listing client, the gallery state, and the inspector.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by listing and byte-fetch operations.
///
/// Every variant is treated as non-fatal by callers: the affected operation
/// resolves to an empty page or an unsaved download.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The remote returned a non-success HTTP status.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// IMAGE RECORD
// =============================================================================

/// Metadata for one remotely-hosted image.
///
/// Immutable once fetched. Owned by the gallery for the lifetime of the page
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: String,
    pub author: String,
    /// Address of the full-resolution bytes.
    pub source_url: String,
    pub width: u32,
    pub height: u32,
    /// Landing page of the photo, when the listing provides one.
    pub page_url: Option<String>,
}

impl ImageRecord {
    /// Width over height. Records always carry positive dimensions.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

// =============================================================================
// PAGE REQUEST
// =============================================================================

/// One page fetch, tagged with the generation it was issued under.
///
/// The generation travels with the completion so the gallery can tell the
/// latest request from a superseded one, even when both asked for the same
/// page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
    pub generation: u64,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
