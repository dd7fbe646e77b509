//! Session service — the event-driven coordinator.
//!
//! DESIGN
//! ======
//! The session owns the gallery and inspector state. User actions arrive
//! through `dispatch`; fetch and download tasks are spawned on the runtime
//! and report back as `SessionEvent`s over an unbounded channel, which the
//! owner feeds to `apply` in arrival order. All state transitions therefore
//! happen on the caller's task; spawned work never touches state directly.
//!
//! A page change force-closes the inspector, so a selection never outlives
//! the page that produced it.
//!
//! Download jobs are counted from spawn until their completion is applied.
//! An owner that is about to exit drains events until the count is zero,
//! otherwise dropping the runtime would cancel the writes.
//!
//! ERROR HANDLING
//! ==============
//! Network and persist failures become `Notice`s and log lines. Rejected
//! actions (wrong phase, unknown item) are logged at debug and returned to
//! the caller, who may ignore them.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::services::download::{DownloadError, Persist, run_download};
use crate::source::types::{ImageRecord, NetworkError, PageRequest};
use crate::source::{ByteFetcher, PageDataSource};
use crate::state::gallery::{GalleryState, PageOutcome};
use crate::state::inspector::{InspectorError, InspectorState};
use crate::state::zoom::{Magnifier, ZoomViewport};

// =============================================================================
// TYPES
// =============================================================================

/// The external boundaries a session talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub source: Arc<dyn PageDataSource>,
    pub fetcher: Arc<dyn ByteFetcher>,
    pub persist: Arc<dyn Persist>,
}

/// How the user refers to a grid item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    Id(String),
    /// 1-based position in the grid.
    Index(usize),
}

/// A discrete user event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    GoToPage(u32),
    NextPage,
    PrevPage,
    Open(ItemRef),
    Close,
    PointerEnter,
    PointerMove { x_percent: f64, y_percent: f64 },
    PointerLeave,
    Download,
}

/// Completion of spawned work, delivered back to the session owner.
#[derive(Debug)]
pub enum SessionEvent {
    PageLoaded { request: PageRequest, result: Result<Vec<ImageRecord>, NetworkError> },
    DownloadFinished { job: Uuid, filename: String, result: Result<PathBuf, DownloadError> },
}

/// What applying an event changed, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Page(PageOutcome),
    Saved(PathBuf),
    DownloadFailed { filename: String, reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(PageOutcome::Loaded(count)) => write!(f, "loaded {count} images"),
            Self::Page(PageOutcome::Failed) => write!(f, "could not load this page"),
            Self::Page(PageOutcome::Stale) => write!(f, "ignored an outdated page"),
            Self::Saved(path) => write!(f, "saved {}", path.display()),
            Self::DownloadFailed { filename, reason } => write!(f, "download of {filename} failed: {reason}"),
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

pub struct Session {
    collaborators: Collaborators,
    gallery: GalleryState,
    inspector: InspectorState,
    magnifier: Magnifier,
    pending_downloads: usize,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl Session {
    /// Create a session and immediately start fetching `initial_page`.
    ///
    /// Must be called within a tokio runtime. The returned receiver yields
    /// completions to pass to [`Session::apply`].
    pub fn start(
        collaborators: Collaborators,
        page_size: u32,
        total_pages: u32,
        initial_page: u32,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let mut session = Self {
            collaborators,
            gallery: GalleryState::new(page_size, total_pages),
            inspector: InspectorState::default(),
            magnifier: Magnifier::default(),
            pending_downloads: 0,
            events,
        };
        let request = session.gallery.request_page(initial_page);
        session.spawn_fetch(request);
        (session, rx)
    }

    #[must_use]
    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    #[must_use]
    pub fn inspector(&self) -> &InspectorState {
        &self.inspector
    }

    #[must_use]
    pub fn magnifier(&self) -> &Magnifier {
        &self.magnifier
    }

    /// Download jobs spawned whose completion has not been applied yet.
    #[must_use]
    pub fn pending_downloads(&self) -> usize {
        self.pending_downloads
    }

    /// Magnifier content for the current sample; `None` unless zooming.
    #[must_use]
    pub fn viewport(&self) -> Option<ZoomViewport> {
        let record = self.inspector.selection()?;
        let sample = self.inspector.zoom()?;
        self.magnifier.viewport(record, &sample)
    }

    /// Apply a user action.
    ///
    /// # Errors
    ///
    /// Returns an [`InspectorError`] if the action is not valid in the
    /// current state. State is unchanged in that case.
    pub fn dispatch(&mut self, action: Action) -> Result<(), InspectorError> {
        let result = match action {
            Action::GoToPage(n) => {
                let request = self.gallery.request_page(n);
                self.page_changed(request);
                Ok(())
            }
            Action::NextPage => {
                if let Some(request) = self.gallery.next_page() {
                    self.page_changed(request);
                }
                Ok(())
            }
            Action::PrevPage => {
                if let Some(request) = self.gallery.prev_page() {
                    self.page_changed(request);
                }
                Ok(())
            }
            Action::Open(item) => self.open(&item),
            Action::Close => {
                self.inspector.close();
                Ok(())
            }
            Action::PointerEnter => self.inspector.pointer_enter(),
            Action::PointerMove { x_percent, y_percent } => self.inspector.pointer_move(x_percent, y_percent),
            Action::PointerLeave => self.inspector.pointer_leave(),
            Action::Download => self.start_download(),
        };

        if let Err(e) = &result {
            debug!(error = %e, "session: action rejected");
        }
        result
    }

    /// Apply a completion produced by spawned work.
    pub fn apply(&mut self, event: SessionEvent) -> Notice {
        match event {
            SessionEvent::PageLoaded { request, result } => Notice::Page(self.gallery.apply_page(request, result)),
            SessionEvent::DownloadFinished { job, filename, result } => {
                self.pending_downloads = self.pending_downloads.saturating_sub(1);
                match result {
                    Ok(path) => Notice::Saved(path),
                    Err(e) => {
                        warn!(%job, %filename, error = %e, "download failed");
                        Notice::DownloadFailed { filename, reason: e.to_string() }
                    }
                }
            }
        }
    }

    fn page_changed(&mut self, request: PageRequest) {
        if self.inspector.selection().is_some() {
            debug!(page = request.page_number, "session: closing inspector on page change");
            self.inspector.close();
        }
        self.spawn_fetch(request);
    }

    fn open(&mut self, item: &ItemRef) -> Result<(), InspectorError> {
        let record = match item {
            ItemRef::Id(id) => self.gallery.find(id),
            ItemRef::Index(index) => index.checked_sub(1).and_then(|i| self.gallery.items().get(i)),
        };
        let record = record.cloned().ok_or_else(|| InspectorError::NotOnPage(describe(item)))?;
        self.inspector.open(record)
    }

    fn spawn_fetch(&self, request: PageRequest) {
        let source = Arc::clone(&self.collaborators.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(request.page_number, request.page_size).await;
            // A closed channel means the session is gone; nothing to update.
            let _ = events.send(SessionEvent::PageLoaded { request, result });
        });
    }

    fn start_download(&mut self) -> Result<(), InspectorError> {
        let request = self.inspector.download_request()?;
        let job = Uuid::new_v4();
        self.pending_downloads += 1;
        let fetcher = Arc::clone(&self.collaborators.fetcher);
        let persist = Arc::clone(&self.collaborators.persist);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = run_download(fetcher.as_ref(), persist.as_ref(), job, &request).await;
            let _ = events.send(SessionEvent::DownloadFinished { job, filename: request.filename, result });
        });
        Ok(())
    }
}

fn describe(item: &ItemRef) -> String {
    match item {
        ItemRef::Id(id) => id.clone(),
        ItemRef::Index(index) => format!("#{index}"),
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
