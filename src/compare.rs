//!
//! Framework neutral comparison slider.
//!
//! [CompareCore] ties geometry, position engine, drag session and
//! resize handling together. It works with any [SliderSurface] that
//! can report the container bounds and take the clip/handle values.
//!
//! ```rust
//! use rat_compare::compare::{CompareCore, CompareProps};
//! use rat_compare::css::CssSurface;
//! use rat_compare::drag::{PointerInput, PressTarget, TerminalScope};
//! use rat_compare::geometry::ContainerBounds;
//!
//! let surface = CssSurface::new(ContainerBounds::new(0.0, 0.0, 1024.0, 768.0));
//! let mut core = CompareCore::new(surface, TerminalScope, CompareProps::default());
//!
//! core.sync_props(CompareProps::default().position(25.0));
//! assert_eq!(core.position(), 25.0);
//!
//! core.press(&PointerInput::mouse(512.0, 10.0), PressTarget::Container);
//! assert_eq!(core.position(), 50.0);
//! assert_eq!(core.surface().clip.get("clip"), Some("rect(auto,512px,auto,auto)"));
//! core.release();
//! ```
//!

use crate::drag::{accepts_press, DragSession, InputScope, PointerInput, PressTarget, TerminalScope};
use crate::engine::{PositionCallback, PositionEngine, SliderSurface};
use crate::geometry::{resolve, CoordSpace, RawCoord};
use crate::resize::{reproject, ContentBox};
use ratatui::layout::Direction;

/// Configuration of the slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareProps {
    /// Vertical divider movement.
    pub portrait: bool,
    /// Position as percentage. Authoritative whenever it changes.
    pub position: f64,
    /// Only a press on the handle starts a drag.
    pub only_handle_draggable: bool,
    /// Inset for the clip and handle values at the extremes.
    pub bounds_padding: f64,
    /// Track the pointer without a press.
    pub change_position_on_hover: bool,
}

/// Result of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Not a press for the slider.
    Ignored,
    /// A drag has been started. The default action of
    /// the event should be prevented.
    Started {
        /// The position has been updated.
        changed: bool,
    },
}

/// Comparison slider state machine.
#[derive(Debug)]
pub struct CompareCore<S, I = TerminalScope> {
    surface: S,
    scope: I,
    props: CompareProps,
    /// Position supplied with the last applied props.
    prev_position: Option<f64>,
    /// Props relevant for the geometry at the last sync.
    synced: Option<(bool, f64, f64)>,
    engine: PositionEngine,
    drag: DragSession,
}

impl Default for CompareProps {
    fn default() -> Self {
        Self {
            portrait: false,
            position: 50.0,
            only_handle_draggable: false,
            bounds_padding: 0.0,
            change_position_on_hover: false,
        }
    }
}

impl CompareProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn portrait(mut self, portrait: bool) -> Self {
        self.portrait = portrait;
        self
    }

    pub fn position(mut self, position: f64) -> Self {
        self.position = position;
        self
    }

    pub fn only_handle_draggable(mut self, only_handle: bool) -> Self {
        self.only_handle_draggable = only_handle;
        self
    }

    pub fn bounds_padding(mut self, padding: f64) -> Self {
        self.bounds_padding = padding;
        self
    }

    pub fn change_position_on_hover(mut self, hover: bool) -> Self {
        self.change_position_on_hover = hover;
        self
    }

    /// Axis of the divider movement.
    pub fn direction(&self) -> Direction {
        if self.portrait {
            Direction::Vertical
        } else {
            Direction::Horizontal
        }
    }
}

impl<S, I> CompareCore<S, I>
where
    S: SliderSurface,
    I: InputScope,
{
    /// New slider.
    ///
    /// Nothing is emitted until the first [sync_props](Self::sync_props).
    pub fn new(surface: S, scope: I, props: CompareProps) -> Self {
        Self {
            surface,
            scope,
            props,
            prev_position: None,
            synced: None,
            engine: PositionEngine::new(props.position),
            drag: DragSession::new(),
        }
    }

    /// Notification for position changes.
    pub fn set_on_position_change(&mut self, on_change: Option<PositionCallback>) {
        self.engine.set_on_change(on_change);
    }

    /// Current position as percentage.
    pub fn position(&self) -> f64 {
        self.engine.position()
    }

    /// Current props.
    pub fn props(&self) -> &CompareProps {
        &self.props
    }

    /// Axis of the divider movement.
    pub fn direction(&self) -> Direction {
        self.props.direction()
    }

    /// Has the first update been applied.
    pub fn is_synced(&self) -> bool {
        self.engine.is_synced()
    }

    /// A drag is active.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Move/release listeners are bound.
    pub fn has_binding(&self) -> bool {
        self.drag.has_binding()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Apply changed props.
    ///
    /// If the position differs from the previously supplied one it
    /// replaces the current position, otherwise the current position is
    /// reapplied with the new orientation and padding. The surface is
    /// always written, even if the position stays at 0 or 100.
    ///
    /// Does nothing if position, orientation and padding are unchanged
    /// since the last successful sync. While the container has no area
    /// the sync is retried with the next call.
    pub fn sync_props(&mut self, props: CompareProps) -> bool {
        self.props = props;

        let key = (props.portrait, props.position, props.bounds_padding);
        if self.synced == Some(key) && self.engine.is_synced() {
            return false;
        }

        let bounds = self.surface.bounds();
        if bounds.is_empty() {
            return false;
        }

        let next = if self.prev_position == Some(props.position) {
            self.engine.position()
        } else {
            props.position
        };
        self.prev_position = Some(props.position);
        self.synced = Some(key);

        self.reapply(RawCoord::new(
            bounds.width / 100.0 * next,
            bounds.height / 100.0 * next,
        ))
    }

    /// Set the position from within, as with keyboard navigation.
    ///
    /// The value is limited to 0..=100.
    pub fn set_position(&mut self, position: f64) -> bool {
        let position = position.clamp(0.0, 100.0);
        let bounds = self.surface.bounds();
        self.update(
            RawCoord::new(
                bounds.width / 100.0 * position,
                bounds.height / 100.0 * position,
            ),
            CoordSpace::Container,
        )
    }

    /// Primary press on the container or the handle.
    pub fn press(&mut self, input: &PointerInput, target: PressTarget) -> PressOutcome {
        if !input.is_primary() || !accepts_press(self.props.only_handle_draggable, target) {
            return PressOutcome::Ignored;
        }
        if self.drag.is_active() {
            return PressOutcome::Ignored;
        }
        let Some(coord) = input.coord() else {
            return PressOutcome::Ignored;
        };

        let changed = self.update_page(coord);
        self.drag.begin(&mut self.scope);
        PressOutcome::Started { changed }
    }

    /// Pointer moved somewhere while dragging.
    pub fn pointer_move(&mut self, input: &PointerInput) -> bool {
        if !self.drag.is_active() {
            return false;
        }
        match input.coord() {
            Some(coord) => self.update_page(coord),
            None => false,
        }
    }

    /// Pointer moved over the container without a drag.
    ///
    /// Only with change_position_on_hover.
    pub fn hover_move(&mut self, input: &PointerInput) -> bool {
        if !self.props.change_position_on_hover || self.drag.is_active() {
            return false;
        }
        match input.coord() {
            Some(coord) => self.update_page(coord),
            None => false,
        }
    }

    /// Pointer released anywhere.
    ///
    /// Returns true if a drag ended.
    pub fn release(&mut self) -> bool {
        self.drag.end()
    }

    /// Pointer left the container.
    ///
    /// With change_position_on_hover and no button pressed this ends
    /// any tracking. The position stays as is.
    pub fn pointer_leave(&mut self, pressed: bool) -> bool {
        if self.props.change_position_on_hover && !pressed {
            self.drag.end()
        } else {
            false
        }
    }

    /// Container content box changed.
    ///
    /// Keeps the relative position of the divider. Nothing happens
    /// before the first sync.
    pub fn on_resize(&mut self, content: ContentBox) -> bool {
        if !self.engine.is_synced() {
            return false;
        }
        let bounds = self.surface.bounds();
        match reproject(self.engine.position(), content, &bounds) {
            Some(coord) => self.reapply(coord),
            None => false,
        }
    }

    /// End any drag and release the listener binding.
    pub fn teardown(&mut self) {
        self.drag.end();
    }

    fn update_page(&mut self, coord: RawCoord) -> bool {
        let space = CoordSpace::Page(self.surface.scroll_offset());
        self.update(coord, space)
    }

    fn update(&mut self, coord: RawCoord, space: CoordSpace) -> bool {
        let direction = self.props.direction();
        let bounds = self.surface.bounds();
        match resolve(&bounds, direction, coord, space) {
            Some(resolved) => self.engine.update(
                &resolved,
                direction,
                self.props.bounds_padding,
                &mut self.surface,
            ),
            None => false,
        }
    }

    // changed geometry, the surface is updated even at a bound.
    fn reapply(&mut self, coord: RawCoord) -> bool {
        let direction = self.props.direction();
        let bounds = self.surface.bounds();
        match resolve(&bounds, direction, coord, CoordSpace::Container) {
            Some(resolved) => {
                self.engine.reapply(
                    &resolved,
                    direction,
                    self.props.bounds_padding,
                    &mut self.surface,
                );
                true
            }
            None => false,
        }
    }
}
