//! Gallery state — current page, loaded records, and the stale-response guard.
//!
//! DESIGN
//! ======
//! `request_page` flips the state to loading synchronously and hands back a
//! `PageRequest`; the caller starts the fetch. When the fetch completes the
//! caller feeds the result to `apply_page`, which applies it only if the
//! request carries the latest generation. Every `request_page` bumps the
//! generation, so a slower earlier response can never overwrite a later
//! one, including a retry of the same page.
//!
//! ERROR HANDLING
//! ==============
//! Fetch failures resolve to an empty, non-loading page and a `warn` log.
//! Nothing is returned to the caller as an error; the grid shows no items.

use tracing::{debug, info, warn};

use crate::source::types::{ImageRecord, NetworkError, PageRequest};

/// What `apply_page` did with a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The records were applied; holds the record count.
    Loaded(usize),
    /// The fetch failed; the page is now empty and idle.
    Failed,
    /// The response belonged to a superseded page and was discarded.
    Stale,
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    current_page: u32,
    /// Bumped by every `request_page`; only the latest request may apply.
    generation: u64,
    items: Vec<ImageRecord>,
    loading: bool,
    page_size: u32,
    total_pages: u32,
}

impl GalleryState {
    /// Fresh gallery: page 1, no items, loading. The owner is expected to
    /// issue the page-1 fetch immediately.
    #[must_use]
    pub fn new(page_size: u32, total_pages: u32) -> Self {
        Self {
            current_page: 1,
            generation: 0,
            items: Vec::new(),
            loading: true,
            page_size,
            total_pages: total_pages.max(1),
        }
    }

    /// Switch to page `n` and return the fetch to start.
    ///
    /// `n` is clamped into `1..=total_pages`. Items are cleared so the view
    /// shows placeholders rather than the previous page.
    pub fn request_page(&mut self, n: u32) -> PageRequest {
        let page_number = n.clamp(1, self.total_pages);
        self.current_page = page_number;
        self.generation += 1;
        self.loading = true;
        self.items.clear();
        PageRequest { page_number, page_size: self.page_size, generation: self.generation }
    }

    /// Request the page after the current one, if there is one.
    pub fn next_page(&mut self) -> Option<PageRequest> {
        if self.current_page >= self.total_pages {
            return None;
        }
        let next = self.current_page + 1;
        Some(self.request_page(next))
    }

    /// Request the page before the current one, if there is one.
    pub fn prev_page(&mut self) -> Option<PageRequest> {
        if self.current_page <= 1 {
            return None;
        }
        let prev = self.current_page - 1;
        Some(self.request_page(prev))
    }

    /// Apply a completed fetch.
    pub fn apply_page(&mut self, request: PageRequest, result: Result<Vec<ImageRecord>, NetworkError>) -> PageOutcome {
        if request.generation != self.generation {
            debug!(
                page = request.page_number,
                generation = request.generation,
                current = self.generation,
                "gallery: discarding stale page response"
            );
            return PageOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                info!(page = request.page_number, count = records.len(), "gallery: page loaded");
                let count = records.len();
                self.items = records;
                PageOutcome::Loaded(count)
            }
            Err(e) => {
                warn!(page = request.page_number, error = %e, "gallery: page fetch failed");
                self.items.clear();
                PageOutcome::Failed
            }
        }
    }

    #[must_use]
    pub fn items(&self) -> &[ImageRecord] {
        &self.items
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// The record with `id` on the loaded page, if any.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&ImageRecord> {
        self.items.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
#[path = "gallery_test.rs"]
mod tests;
