//! Inspector state — the selected image and the live zoom sample.
//!
//! DESIGN
//! ======
//! Three observable phases: `Closed`, `Idle` (open, pointer off the image),
//! `Zooming` (open, pointer over the image). The enum carries the selection
//! and sample only while open, so a closed inspector cannot hold either.
//! Invalid transitions are reported as `InspectorError` and leave the
//! state untouched; callers log and move on.

use crate::source::types::ImageRecord;

/// Extension given to every downloaded file.
pub const DOWNLOAD_EXTENSION: &str = "jpg";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InspectorError {
    /// The event is not accepted in the current phase.
    #[error("{event} is not valid while {phase:?}")]
    InvalidTransition { event: &'static str, phase: InspectorPhase },

    /// The record is not on the currently loaded page.
    #[error("image {0} is not on the current page")]
    NotOnPage(String),
}

// =============================================================================
// ZOOM SAMPLE
// =============================================================================

/// Pointer position within the displayed image, as percentages of its box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoomSample {
    pub x_percent: f64,
    pub y_percent: f64,
    pub active: bool,
}

impl ZoomSample {
    fn at(x_percent: f64, y_percent: f64) -> Self {
        Self { x_percent: clamp_percent(x_percent), y_percent: clamp_percent(y_percent), active: true }
    }
}

/// Clamp to `[0, 100]`. Fast pointer movement can report positions just
/// outside the box; NaN maps to 0.
fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) }
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectorPhase {
    Closed,
    Idle,
    Zooming,
}

/// What the session needs to start a download of the selected image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub source_url: String,
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InspectorState {
    #[default]
    Closed,
    Open { record: ImageRecord, zoom: ZoomSample },
}

impl InspectorState {
    #[must_use]
    pub fn phase(&self) -> InspectorPhase {
        match self {
            Self::Closed => InspectorPhase::Closed,
            Self::Open { zoom, .. } if zoom.active => InspectorPhase::Zooming,
            Self::Open { .. } => InspectorPhase::Idle,
        }
    }

    #[must_use]
    pub fn selection(&self) -> Option<&ImageRecord> {
        match self {
            Self::Closed => None,
            Self::Open { record, .. } => Some(record),
        }
    }

    #[must_use]
    pub fn zoom(&self) -> Option<ZoomSample> {
        match self {
            Self::Closed => None,
            Self::Open { zoom, .. } => Some(*zoom),
        }
    }

    /// Closed → Idle with `record` selected.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvalidTransition`] if already open.
    pub fn open(&mut self, record: ImageRecord) -> Result<(), InspectorError> {
        if !matches!(self, Self::Closed) {
            return Err(self.rejected("open"));
        }
        *self = Self::Open { record, zoom: ZoomSample::default() };
        Ok(())
    }

    /// Any phase → Closed. Clears selection and zoom sample.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Idle → Zooming. Entering again while zooming keeps the position.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvalidTransition`] if closed.
    pub fn pointer_enter(&mut self) -> Result<(), InspectorError> {
        self.zoom_mut("pointer_enter")?.active = true;
        Ok(())
    }

    /// Store a new pointer position, clamped to `[0, 100]` per axis.
    ///
    /// A move while idle implies the pointer is over the image, so it enters
    /// zooming first.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvalidTransition`] if closed.
    pub fn pointer_move(&mut self, x_percent: f64, y_percent: f64) -> Result<(), InspectorError> {
        *self.zoom_mut("pointer_move")? = ZoomSample::at(x_percent, y_percent);
        Ok(())
    }

    /// Zooming → Idle. Resets the sample to `(0, 0)`, inactive.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvalidTransition`] if closed.
    pub fn pointer_leave(&mut self) -> Result<(), InspectorError> {
        *self.zoom_mut("pointer_leave")? = ZoomSample::default();
        Ok(())
    }

    /// Describe the download for the selected record. Does not change state.
    ///
    /// # Errors
    ///
    /// Returns [`InspectorError::InvalidTransition`] if closed.
    pub fn download_request(&self) -> Result<DownloadRequest, InspectorError> {
        let record = self.selection().ok_or_else(|| self.rejected("download"))?;
        Ok(DownloadRequest { source_url: record.source_url.clone(), filename: download_filename(&record.author) })
    }

    fn zoom_mut(&mut self, event: &'static str) -> Result<&mut ZoomSample, InspectorError> {
        match self {
            Self::Open { zoom, .. } => Ok(zoom),
            Self::Closed => Err(InspectorError::InvalidTransition { event, phase: InspectorPhase::Closed }),
        }
    }

    fn rejected(&self, event: &'static str) -> InspectorError {
        InspectorError::InvalidTransition { event, phase: self.phase() }
    }
}

/// `Image_by_<author>.jpg`, with path separators and control characters
/// replaced so the name stays a single path component.
#[must_use]
pub fn download_filename(author: &str) -> String {
    let safe: String = author
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') || c.is_control() { '_' } else { c })
        .collect();
    format!("Image_by_{safe}.{DOWNLOAD_EXTENSION}")
}

#[cfg(test)]
#[path = "inspector_test.rs"]
mod tests;
