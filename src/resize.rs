//!
//! Resize handling.
//!
//! Re-projects the stored percentage onto new container dimensions.
//!

use crate::geometry::{ContainerBounds, RawCoord};
use ratatui::layout::Rect;

/// Observed content box of the container.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ContentBox {
    pub width: f64,
    pub height: f64,
}

/// Remembers the last observed content box.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ResizeWatch {
    observed: Option<ContentBox>,
}

impl ContentBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<Rect> for ContentBox {
    fn from(area: Rect) -> Self {
        Self::new(area.width as f64, area.height as f64)
    }
}

/// Container relative coordinate for the position after a resize.
///
/// The position is scaled against the observed content box and then
/// mapped to the rendered bounds. Returns None if the content box
/// has a zero dimension.
pub fn reproject(position: f64, content: ContentBox, bounds: &ContainerBounds) -> Option<RawCoord> {
    if content.width == 0.0 || content.height == 0.0 {
        return None;
    }
    Some(RawCoord::new(
        content.width / 100.0 * position * bounds.width / content.width,
        content.height / 100.0 * position * bounds.height / content.height,
    ))
}

impl ResizeWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the content box.
    ///
    /// Returns true if it differs from a previous observation.
    /// The very first observation is not a resize.
    pub fn observe(&mut self, content: ContentBox) -> bool {
        let changed = matches!(self.observed, Some(v) if v != content);
        self.observed = Some(content);
        changed
    }

    /// Last observed content box.
    pub fn observed(&self) -> Option<ContentBox> {
        self.observed
    }

    /// Forget the observation.
    pub fn disconnect(&mut self) {
        self.observed = None;
    }
}
