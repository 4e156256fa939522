//!
//! Position engine.
//!
//! Owns the current divider position as a percentage and pushes
//! the clip boundary and handle offset to a [SliderSurface].
//!

use crate::geometry::{ContainerBounds, Resolved, ScrollOffset};
use log::debug;
use ratatui::layout::Direction;
use std::fmt::{Debug, Formatter};

/// The rendering side of the slider.
///
/// Gives access to the container bounds and receives the values
/// for the clip wrapper and the handle wrapper.
pub trait SliderSurface {
    /// Current bounds of the container.
    fn bounds(&self) -> ContainerBounds;

    /// Scroll offset used for page coordinates.
    fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset::default()
    }

    /// Visible extent of the clipped item along the axis.
    fn set_clip(&mut self, direction: Direction, px: f64);

    /// Offset of the handle along the axis.
    fn set_handle_offset(&mut self, direction: Direction, px: f64);
}

/// Callback for position changes.
pub type PositionCallback = Box<dyn FnMut(f64)>;

/// Current position and the bounds synchronization flag.
pub struct PositionEngine {
    /// Position as percentage.
    position: f64,
    /// First update has been applied.
    synced: bool,
    /// Notification.
    on_change: Option<PositionCallback>,
}

impl Debug for PositionEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionEngine")
            .field("position", &self.position)
            .field("synced", &self.synced)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl Default for PositionEngine {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl PositionEngine {
    /// New engine with an initial position.
    ///
    /// Nothing is emitted until the first update.
    pub fn new(position: f64) -> Self {
        Self {
            position,
            synced: false,
            on_change: None,
        }
    }

    /// Current position as percentage.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Has the first update been applied.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Set the notification for position changes.
    pub fn set_on_change(&mut self, on_change: Option<PositionCallback>) {
        self.on_change = on_change;
    }

    /// The update would be a repetition at the min/max bounds.
    ///
    /// Never true before the first update.
    pub fn can_skip(&self, resolved: &Resolved) -> bool {
        self.synced
            && resolved.percent == self.position
            && (self.position == 0.0 || self.position == 100.0)
            && (resolved.at_min || resolved.at_max)
    }

    /// Apply a resolved position.
    ///
    /// Emits the padded pixel value to the surface and calls
    /// the notification with the new percentage.
    ///
    /// Returns false if the update has been skipped.
    pub fn update<S>(
        &mut self,
        resolved: &Resolved,
        direction: Direction,
        bounds_padding: f64,
        surface: &mut S,
    ) -> bool
    where
        S: SliderSurface + ?Sized,
    {
        if self.can_skip(resolved) {
            debug!("compare: skip update at bound {}", self.position);
            return false;
        }
        self.reapply(resolved, direction, bounds_padding, surface);
        true
    }

    /// Apply a resolved position without the skip rule.
    ///
    /// For changed geometry: resize, orientation or padding. The surface
    /// values must follow even if the percentage stays at a bound.
    pub fn reapply<S>(
        &mut self,
        resolved: &Resolved,
        direction: Direction,
        bounds_padding: f64,
        surface: &mut S,
    ) where
        S: SliderSurface + ?Sized,
    {
        self.synced = true;
        self.position = resolved.percent;

        let px = padded_pixel(resolved, bounds_padding);
        surface.set_clip(direction, px);
        surface.set_handle_offset(direction, px);

        if let Some(on_change) = self.on_change.as_mut() {
            on_change(self.position);
        }
    }
}

/// Pixel position clamped to [padding, extent - padding].
///
/// If the padding exceeds half the extent the upper limit wins.
pub fn padded_pixel(resolved: &Resolved, bounds_padding: f64) -> f64 {
    resolved
        .pixel
        .max(bounds_padding)
        .min(resolved.extent - bounds_padding)
}
