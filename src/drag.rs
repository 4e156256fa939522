//!
//! Drag session.
//!
//! Tracks an active drag and holds the binding of the move/release
//! listeners at the topmost input scope for the duration of the drag.
//! The binding is a guard, dropping it unbinds the listeners.
//!

use crate::geometry::RawCoord;
use log::debug;
use std::fmt::{Debug, Formatter};

/// Binding of move/release listeners.
///
/// Dropping the binding releases it.
#[must_use]
pub struct ScopeBinding {
    release: Option<Box<dyn FnOnce()>>,
}

/// Input scope where the move/release listeners for a drag are bound.
///
/// For the browser this would be the window, so a drag can continue
/// outside the container.
pub trait InputScope {
    /// Bind move and release listeners.
    fn bind(&mut self) -> ScopeBinding;
}

/// Input scope of a terminal application.
///
/// With mouse capture enabled all mouse events are delivered to the
/// application anyway, there is nothing to bind.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalScope;

/// Mouse buttons relevant for the drag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Auxiliary,
}

/// Pointer or touch event payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Mouse with page coordinates.
    Mouse {
        page_x: f64,
        page_y: f64,
        button: PointerButton,
    },
    /// Touch points with page coordinates. Only the first one is used.
    Touch { touches: Vec<RawCoord> },
}

/// Where a press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// The handle. This is part of the container too.
    Handle,
    /// Somewhere else in the container.
    Container,
}

/// State of a single drag.
///
/// Idle -> Dragging -> Idle.
#[derive(Default)]
pub struct DragSession {
    active: bool,
    binding: Option<ScopeBinding>,
}

impl ScopeBinding {
    /// New binding. The closure is called once when the binding is dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Binding without anything to release.
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for ScopeBinding {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Debug for ScopeBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeBinding")
            .field("release", &self.release.is_some())
            .finish()
    }
}

impl InputScope for TerminalScope {
    fn bind(&mut self) -> ScopeBinding {
        ScopeBinding::noop()
    }
}

impl PointerInput {
    /// Primary mouse button.
    pub fn mouse(page_x: f64, page_y: f64) -> Self {
        PointerInput::Mouse {
            page_x,
            page_y,
            button: PointerButton::Primary,
        }
    }

    /// Single touch point.
    pub fn touch(page_x: f64, page_y: f64) -> Self {
        PointerInput::Touch {
            touches: vec![RawCoord::new(page_x, page_y)],
        }
    }

    /// Coordinate of the event. First touch point for touch events.
    pub fn coord(&self) -> Option<RawCoord> {
        match self {
            PointerInput::Mouse { page_x, page_y, .. } => Some(RawCoord::new(*page_x, *page_y)),
            PointerInput::Touch { touches } => touches.first().copied(),
        }
    }

    /// Can this start a drag.
    pub fn is_primary(&self) -> bool {
        match self {
            PointerInput::Mouse { button, .. } => *button == PointerButton::Primary,
            PointerInput::Touch { touches } => !touches.is_empty(),
        }
    }
}

/// Does the press target start a drag.
pub fn accepts_press(only_handle_draggable: bool, target: PressTarget) -> bool {
    !only_handle_draggable || target == PressTarget::Handle
}

impl Debug for DragSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragSession")
            .field("active", &self.active)
            .field("binding", &self.binding.is_some())
            .finish()
    }
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dragging.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Listeners are bound.
    pub fn has_binding(&self) -> bool {
        self.binding.is_some()
    }

    /// Idle -> Dragging.
    ///
    /// Returns false if a drag is already active.
    pub fn begin<I>(&mut self, scope: &mut I) -> bool
    where
        I: InputScope + ?Sized,
    {
        if self.active {
            return false;
        }
        self.active = true;
        if self.binding.is_none() {
            self.binding = Some(scope.bind());
        }
        debug!("compare: drag start");
        true
    }

    /// Dragging -> Idle.
    ///
    /// Releases the listener binding. Returns false if there
    /// was no drag.
    pub fn end(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        if self.binding.take().is_some() {
            debug!("compare: drag end");
        }
        was_active
    }
}
