//! Magnifier geometry.
//!
//! The magnifier is a fixed window anchored on screen. Its content is the
//! selected image scaled by a constant factor and positioned by the zoom
//! sample, so the point under the pointer shows in the window. The window
//! does not follow the cursor.

use crate::source::types::ImageRecord;
use crate::state::inspector::ZoomSample;

pub const DEFAULT_WINDOW_WIDTH: f64 = 400.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 300.0;
pub const DEFAULT_ZOOM_FACTOR: f64 = 3.0;
pub const DEFAULT_ANCHOR_X_PERCENT: f64 = 80.0;
pub const DEFAULT_ANCHOR_Y_PERCENT: f64 = 39.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnifier {
    pub window_width: f64,
    pub window_height: f64,
    /// Background width as a multiple of the window width.
    pub zoom_factor: f64,
    /// Window center, as percentages of the screen.
    pub anchor_x_percent: f64,
    pub anchor_y_percent: f64,
}

impl Default for Magnifier {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            anchor_x_percent: DEFAULT_ANCHOR_X_PERCENT,
            anchor_y_percent: DEFAULT_ANCHOR_Y_PERCENT,
        }
    }
}

/// Everything a renderer needs to draw the magnifier for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomViewport {
    /// Background position, in percent per axis.
    pub position_percent: (f64, f64),
    /// Scaled background size in pixels.
    pub background_size: (f64, f64),
    /// Background top-left relative to the window top-left, in pixels.
    /// Always zero or negative when the background is larger than the window.
    pub offset: (f64, f64),
    /// Intrinsic pixel of the image under the pointer.
    pub source_pixel: (u32, u32),
}

impl Magnifier {
    /// Viewport for `sample` over `record`, or `None` when the sample is
    /// inactive (magnifier hidden).
    #[must_use]
    pub fn viewport(&self, record: &ImageRecord, sample: &ZoomSample) -> Option<ZoomViewport> {
        if !sample.active {
            return None;
        }

        let bg_width = self.window_width * self.zoom_factor;
        let bg_height = bg_width / record.aspect_ratio();

        // Percentage positioning aligns the p% point of the background with
        // the p% point of the window.
        let offset_x = (self.window_width - bg_width) * sample.x_percent / 100.0;
        let offset_y = (self.window_height - bg_height) * sample.y_percent / 100.0;

        Some(ZoomViewport {
            position_percent: (sample.x_percent, sample.y_percent),
            background_size: (bg_width, bg_height),
            offset: (offset_x, offset_y),
            source_pixel: (source_coord(record.width, sample.x_percent), source_coord(record.height, sample.y_percent)),
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn source_coord(extent: u32, percent: f64) -> u32 {
    let last = extent.saturating_sub(1);
    ((f64::from(last) * percent / 100.0).round() as u32).min(last)
}

/// Convert a raw pointer offset inside an element of `extent` pixels to a
/// percentage. A zero extent yields 0.
#[must_use]
pub fn percent_of(offset: f64, extent: f64) -> f64 {
    if extent <= 0.0 { 0.0 } else { offset / extent * 100.0 }
}

#[cfg(test)]
#[path = "zoom_test.rs"]
mod tests;
