//!
//! Geometry for the comparison slider.
//!
//! Converts a raw input coordinate into a pixel position clamped
//! to the container and the matching percentage along the
//! active axis.
//!

use ratatui::layout::{Direction, Rect};

/// Bounding box of the slider container.
///
/// This is read fresh from the surface for every position update.
/// `width`/`height` are the rendered sizes, `offset_width`/`offset_height`
/// the layout sizes before any scaling transform. The ratio
/// of both is the zoom scale.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub offset_width: f64,
    pub offset_height: f64,
}

/// Scroll offset of the viewport.
///
/// Page coordinates are translated by this offset.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Raw input coordinate.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RawCoord {
    pub x: f64,
    pub y: f64,
}

/// How a [RawCoord] must be interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordSpace {
    /// Already relative to the container.
    Container,
    /// Page absolute. Needs translation by the container origin
    /// and the scroll offset.
    Page(ScrollOffset),
}

/// Result of [resolve].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// Position along the active axis, zoom adjusted.
    pub pixel: f64,
    /// Extent of the active axis, zoom adjusted.
    pub extent: f64,
    /// Position as percentage 0..=100.
    pub percent: f64,
    /// Pixel position is exactly at 0.
    pub at_min: bool,
    /// Pixel position is exactly at the extent.
    pub at_max: bool,
}

impl ContainerBounds {
    /// Bounds without any scaling.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
            offset_width: width,
            offset_height: height,
        }
    }

    /// Layout size before scaling transforms.
    pub fn offset_size(mut self, offset_width: f64, offset_height: f64) -> Self {
        self.offset_width = offset_width;
        self.offset_height = offset_height;
        self
    }

    /// No geometry can be derived.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Extent along the axis.
    pub fn extent(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.width,
            Direction::Vertical => self.height,
        }
    }

    /// Ratio of rendered and layout size along the axis.
    pub fn zoom_scale(&self, direction: Direction) -> f64 {
        let offset = match direction {
            Direction::Horizontal => self.offset_width,
            Direction::Vertical => self.offset_height,
        };
        let offset = if offset == 0.0 { 1.0 } else { offset };
        self.extent(direction) / offset
    }
}

impl From<Rect> for ContainerBounds {
    fn from(area: Rect) -> Self {
        Self::new(
            area.x as f64,
            area.y as f64,
            area.width as f64,
            area.height as f64,
        )
    }
}

impl RawCoord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for RawCoord {
    fn from(value: (f64, f64)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Resolve a raw coordinate against the container bounds.
///
/// Returns None if the container has zero width or height.
pub fn resolve(
    bounds: &ContainerBounds,
    direction: Direction,
    raw: RawCoord,
    space: CoordSpace,
) -> Option<Resolved> {
    if bounds.is_empty() {
        return None;
    }

    let pos = match (direction, space) {
        (Direction::Horizontal, CoordSpace::Container) => raw.x,
        (Direction::Vertical, CoordSpace::Container) => raw.y,
        (Direction::Horizontal, CoordSpace::Page(scroll)) => raw.x - bounds.left - scroll.x,
        (Direction::Vertical, CoordSpace::Page(scroll)) => raw.y - bounds.top - scroll.y,
    };

    // clamped without any padding. padding is a visual thing only.
    let extent = bounds.extent(direction);
    let pixel = pos.max(0.0).min(extent);

    let zoom = bounds.zoom_scale(direction);
    let pixel = pixel / zoom;
    let extent = extent / zoom;

    Some(Resolved {
        pixel,
        extent,
        percent: pixel / extent * 100.0,
        at_min: pixel == 0.0,
        at_max: pixel == extent,
    })
}
