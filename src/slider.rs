//!
//! Comparison slider widget.
//!
//! Renders two widgets on top of each other. The first one is visible
//! up to the divider, the second one fills the rest. The divider can be
//! dragged with the mouse or moved with the keyboard when focused.
//!
//! ```rust no_run
//! use rat_compare::slider::{CompareSlider, CompareSliderState};
//! # use ratatui::layout::Rect;
//! # use ratatui::prelude::*;
//! # use ratatui::widgets::Paragraph;
//! #
//! # let slider_area = Rect::ZERO;
//! # let mut buf = Buffer::default();
//!
//! let mut state = CompareSliderState::new();
//!
//! CompareSlider::new(Paragraph::new("before"), Paragraph::new("after"))
//!     .position(25.0)
//!     .render(slider_area, &mut buf, &mut state);
//!
//! ```
//!

use crate::_private::NonExhaustive;
use crate::compare::{CompareCore, CompareProps, PressOutcome};
use crate::drag::{PointerInput, PressTarget, TerminalScope};
use crate::engine::{PositionCallback, SliderSurface};
use crate::geometry::ContainerBounds;
use crate::handle::CompareHandle;
use crate::resize::{ContentBox, ResizeWatch};
use crate::util::{copy_buf_area, revert_style};
use crossterm::event::MouseEventKind;
use rat_event::util::MouseFlags;
use rat_event::{ct_event, HandleEvent, MouseOnly, Regular};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use rat_reloc::{relocate_area, RelocatableState};
use ratatui::buffer::Buffer;
use ratatui::layout::{Direction, Position, Rect};
use ratatui::prelude::{BlockExt, StatefulWidget};
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

pub use crate::slider::event::CompareOutcome;

/// Comparison slider.
///
/// `item_one` is clipped at the divider, `item_two` is the base.
/// The handle defaults to [CompareHandle].
#[derive(Debug, Clone)]
pub struct CompareSlider<'a, One, Two, H = CompareHandle<'a>> {
    item_one: One,
    item_two: Two,
    handle: Option<H>,

    props: CompareProps,

    style: Style,
    line_style: Option<Style>,
    button_style: Option<Style>,
    focus_style: Option<Style>,
    drag_style: Option<Style>,

    block: Option<Block<'a>>,
}

/// Combined styles.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompareSliderStyle {
    /// Base style.
    pub style: Style,
    /// Style for the handle line.
    pub line: Option<Style>,
    /// Style for the handle button.
    pub button: Option<Style>,
    /// Handle style when focused.
    pub focus: Option<Style>,
    /// Handle style while dragging.
    pub drag: Option<Style>,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub non_exhaustive: NonExhaustive,
}

/// Cell based surface.
///
/// Bounds are the inner area of the widget, one cell is one pixel.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CellSurface {
    /// Container area.
    pub area: Rect,
    /// Clip extent in cells.
    pub clip: f64,
    /// Handle offset in cells.
    pub handle: f64,
}

/// State.
#[derive(Debug)]
pub struct CompareSliderState {
    /// Complete area
    /// __read only__. renewed for each render.
    pub area: Rect,
    /// Area inside the block.
    /// __read only__. renewed for each render.
    pub inner: Rect,
    /// Visible part of the first item.
    /// __read only__. renewed for each render.
    pub clip: Rect,
    /// Handle area.
    /// __read only__. renewed for each render.
    pub handle: Rect,
    /// Column/row of the divider.
    /// __read only__. renewed for each render.
    pub divider: u16,
    /// Direction of the divider movement.
    /// __read only__. renewed for each render.
    pub direction: Direction,

    /// Keyboard step in percent.
    pub step: f64,
    /// Keyboard major step in percent.
    pub long_step: f64,

    /// Position engine and drag session.
    /// __read+write__
    pub core: CompareCore<CellSurface, TerminalScope>,
    /// Resize detection.
    pub resize: ResizeWatch,

    /// Current focus state.
    /// __read+write__
    pub focus: FocusFlag,
    /// Mouse helper
    /// __read+write__
    pub mouse: MouseFlags,

    pub non_exhaustive: NonExhaustive,
}

pub(crate) mod event {
    use rat_event::{ConsumedEvent, Outcome};

    /// Result value for event-handling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum CompareOutcome {
        /// The given event was not handled at all.
        Continue,
        /// The event was handled, no repaint necessary.
        Unchanged,
        /// The event was handled, repaint necessary.
        Changed,
        /// The divider has moved.
        Position,
    }

    impl ConsumedEvent for CompareOutcome {
        fn is_consumed(&self) -> bool {
            *self != CompareOutcome::Continue
        }
    }

    impl From<bool> for CompareOutcome {
        fn from(value: bool) -> Self {
            if value {
                CompareOutcome::Position
            } else {
                CompareOutcome::Unchanged
            }
        }
    }

    impl From<CompareOutcome> for Outcome {
        fn from(value: CompareOutcome) -> Self {
            match value {
                CompareOutcome::Continue => Outcome::Continue,
                CompareOutcome::Unchanged => Outcome::Unchanged,
                CompareOutcome::Changed => Outcome::Changed,
                CompareOutcome::Position => Outcome::Changed,
            }
        }
    }
}

impl Default for CompareSliderStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            line: None,
            button: None,
            focus: None,
            drag: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl SliderSurface for CellSurface {
    fn bounds(&self) -> ContainerBounds {
        ContainerBounds::from(self.area)
    }

    fn set_clip(&mut self, _direction: Direction, px: f64) {
        self.clip = px;
    }

    fn set_handle_offset(&mut self, _direction: Direction, px: f64) {
        self.handle = px;
    }
}

impl<'a, One, Two> CompareSlider<'a, One, Two, CompareHandle<'a>>
where
    One: Widget,
    Two: Widget,
{
    /// New slider with the default handle.
    pub fn new(item_one: One, item_two: Two) -> Self {
        Self {
            item_one,
            item_two,
            handle: None,
            props: CompareProps::default(),
            style: Default::default(),
            line_style: None,
            button_style: None,
            focus_style: None,
            drag_style: None,
            block: None,
        }
    }
}

impl<'a, One, Two, H> CompareSlider<'a, One, Two, H>
where
    One: Widget,
    Two: Widget,
    H: Widget,
{
    /// Replace the default handle.
    pub fn handle<H2>(self, handle: H2) -> CompareSlider<'a, One, Two, H2>
    where
        H2: Widget,
    {
        CompareSlider {
            item_one: self.item_one,
            item_two: self.item_two,
            handle: Some(handle),
            props: self.props,
            style: self.style,
            line_style: self.line_style,
            button_style: self.button_style,
            focus_style: self.focus_style,
            drag_style: self.drag_style,
            block: self.block,
        }
    }

    /// Vertical divider movement.
    pub fn portrait(mut self, portrait: bool) -> Self {
        self.props.portrait = portrait;
        self
    }

    /// Direction of the divider movement.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.props.portrait = direction == Direction::Vertical;
        self
    }

    /// Position in percent.
    ///
    /// This is applied whenever it differs from the value given
    /// with the last render. Otherwise, the position set by the
    /// user stays.
    pub fn position(mut self, position: f64) -> Self {
        self.props.position = position;
        self
    }

    /// Only dragging the handle moves the divider.
    pub fn only_handle_draggable(mut self, only_handle: bool) -> Self {
        self.props.only_handle_draggable = only_handle;
        self
    }

    /// Keeps the handle this many cells away from the edges.
    pub fn bounds_padding(mut self, padding: u16) -> Self {
        self.props.bounds_padding = padding as f64;
        self
    }

    /// Follow the mouse without pressing a button.
    pub fn change_position_on_hover(mut self, hover: bool) -> Self {
        self.props.change_position_on_hover = hover;
        self
    }

    /// Set all styles.
    pub fn styles(mut self, styles: CompareSliderStyle) -> Self {
        self.style = styles.style;
        if styles.line.is_some() {
            self.line_style = styles.line;
        }
        if styles.button.is_some() {
            self.button_style = styles.button;
        }
        if styles.focus.is_some() {
            self.focus_style = styles.focus;
        }
        if styles.drag.is_some() {
            self.drag_style = styles.drag;
        }
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Base style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self.block = self.block.map(|v| v.style(style));
        self
    }

    /// Style for the handle line.
    pub fn line_style(mut self, style: Style) -> Self {
        self.line_style = Some(style);
        self
    }

    /// Style for the handle button.
    pub fn button_style(mut self, style: Style) -> Self {
        self.button_style = Some(style);
        self
    }

    /// Handle style when focused.
    pub fn focus_style(mut self, style: Style) -> Self {
        self.focus_style = Some(style);
        self
    }

    /// Handle style while dragging.
    pub fn drag_style(mut self, style: Style) -> Self {
        self.drag_style = Some(style);
        self
    }

    /// Block for borders.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block.style(self.style));
        self
    }

    fn layout(&self, area: Rect, state: &mut CompareSliderState) {
        state.area = area;
        state.inner = self.block.inner_if_some(area);
        state.direction = self.props.direction();

        state.core.surface_mut().area = state.inner;

        let synced = state.core.sync_props(self.props);
        let content = ContentBox::from(state.inner);
        if state.resize.observe(content) && !synced {
            state.core.on_resize(content);
        }

        let inner = state.inner;
        let surface = *state.core.surface();
        match state.direction {
            Direction::Horizontal => {
                let clip = (surface.clip.max(0.0).floor() as u16).min(inner.width);
                state.clip = Rect::new(inner.x, inner.y, clip, inner.height);

                let pos = (surface.handle.max(0.0).floor() as u16)
                    .min(inner.width.saturating_sub(1));
                state.divider = inner.x + pos;
                let x = state.divider.saturating_sub(1);
                state.handle = Rect::new(x, inner.y, state.divider.saturating_add(2) - x, inner.height)
                    .intersection(inner);
            }
            Direction::Vertical => {
                let clip = (surface.clip.max(0.0).floor() as u16).min(inner.height);
                state.clip = Rect::new(inner.x, inner.y, inner.width, clip);

                let pos = (surface.handle.max(0.0).floor() as u16)
                    .min(inner.height.saturating_sub(1));
                state.divider = inner.y + pos;
                state.handle = Rect::new(inner.x, state.divider, inner.width, 1).intersection(inner);
            }
        }
    }
}

impl<One, Two, H> StatefulWidget for CompareSlider<'_, One, Two, H>
where
    One: Widget,
    Two: Widget,
    H: Widget,
{
    type State = CompareSliderState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        self.layout(area, state);

        if let Some(block) = self.block.as_ref() {
            block.render(area, buf);
        } else {
            buf.set_style(area, self.style);
        }

        let inner = state.inner;
        if inner.is_empty() {
            return;
        }

        self.item_two.render(inner, buf);

        let mut tmp = Buffer::empty(inner);
        self.item_one.render(inner, &mut tmp);
        copy_buf_area(&tmp, state.clip, buf);

        if let Some(handle) = self.handle {
            handle.render(state.handle, buf);
        } else {
            let handle_style = if state.core.is_dragging() {
                self.drag_style.or(self.line_style).unwrap_or(self.style)
            } else if state.is_focused() {
                self.focus_style.unwrap_or(revert_style(self.style))
            } else {
                self.line_style.unwrap_or(self.style)
            };
            let mut handle = CompareHandle::new()
                .portrait(state.direction == Direction::Vertical)
                .divider(state.divider)
                .style(self.style)
                .line_style(handle_style);
            if let Some(button_style) = self.button_style {
                handle = handle.button_style(button_style);
            }
            handle.render(state.handle, buf);
        }
    }
}

impl Default for CompareSliderState {
    fn default() -> Self {
        Self {
            area: Default::default(),
            inner: Default::default(),
            clip: Default::default(),
            handle: Default::default(),
            divider: Default::default(),
            direction: Default::default(),
            step: 1.0,
            long_step: 10.0,
            core: CompareCore::new(
                CellSurface::default(),
                TerminalScope,
                CompareProps::default(),
            ),
            resize: Default::default(),
            focus: Default::default(),
            mouse: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl HasFocus for CompareSliderState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}

impl RelocatableState for CompareSliderState {
    fn relocate(&mut self, shift: (i16, i16), clip: Rect) {
        self.area = relocate_area(self.area, shift, clip);
        self.inner = relocate_area(self.inner, shift, clip);
        self.clip = relocate_area(self.clip, shift, clip);
        self.handle = relocate_area(self.handle, shift, clip);
        let d = match self.direction {
            Direction::Horizontal => shift.0,
            Direction::Vertical => shift.1,
        };
        self.divider = self.divider.saturating_add_signed(d);
    }
}

impl CompareSliderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        Self {
            focus: FocusFlag::named(name),
            ..Default::default()
        }
    }

    /// Notification for position changes.
    pub fn set_on_position_change(&mut self, on_change: Option<PositionCallback>) {
        self.core.set_on_position_change(on_change);
    }

    /// Current position in percent.
    pub fn position(&self) -> f64 {
        self.core.position()
    }

    /// Move the divider. Needs a rendered widget.
    pub fn set_position(&mut self, position: f64) -> bool {
        self.core.set_position(position)
    }

    /// Move the divider by some percent.
    pub fn move_by(&mut self, delta: f64) -> bool {
        self.core.set_position(self.core.position() + delta)
    }

    /// Dragging the divider.
    pub fn is_dragging(&self) -> bool {
        self.core.is_dragging()
    }

    /// Ends any drag and forgets the observed size.
    ///
    /// The next render starts resize detection anew.
    pub fn teardown(&mut self) {
        self.core.teardown();
        self.resize.disconnect();
    }

    /// Keyboard step in percent.
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    /// Keyboard major step in percent.
    pub fn set_long_step(&mut self, step: f64) {
        self.long_step = step;
    }

    // Press target at the screen position.
    fn press_target(&self, pos: Position) -> Option<PressTarget> {
        if self.handle.contains(pos) {
            Some(PressTarget::Handle)
        } else if self.inner.contains(pos) {
            Some(PressTarget::Container)
        } else {
            None
        }
    }
}

impl HandleEvent<crossterm::event::Event, Regular, CompareOutcome> for CompareSliderState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> CompareOutcome {
        let r = if self.is_focused() {
            match event {
                ct_event!(keycode press CONTROL-Left)
                | ct_event!(keycode press CONTROL-Up)
                | ct_event!(keycode press Home) => self.set_position(0.0).into(),

                ct_event!(keycode press CONTROL-Right)
                | ct_event!(keycode press CONTROL-Down)
                | ct_event!(keycode press End) => self.set_position(100.0).into(),

                ct_event!(keycode press Up)
                | ct_event!(keycode press Left)
                | ct_event!(key press '-') => self.move_by(-self.step).into(),
                ct_event!(keycode press Down)
                | ct_event!(keycode press Right)
                | ct_event!(key press '+') => self.move_by(self.step).into(),

                ct_event!(keycode press PageUp)
                | ct_event!(keycode press ALT-Up)
                | ct_event!(keycode press ALT-Left) => self.move_by(-self.long_step).into(),
                ct_event!(keycode press PageDown)
                | ct_event!(keycode press ALT-Down)
                | ct_event!(keycode press ALT-Right) => self.move_by(self.long_step).into(),
                _ => CompareOutcome::Continue,
            }
        } else {
            CompareOutcome::Continue
        };

        if r == CompareOutcome::Continue {
            HandleEvent::handle(self, event, MouseOnly)
        } else {
            r
        }
    }
}

impl HandleEvent<crossterm::event::Event, MouseOnly, CompareOutcome> for CompareSliderState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: MouseOnly) -> CompareOutcome {
        match event {
            ct_event!(mouse down Left for x, y) => {
                let Some(target) = self.press_target(Position::new(*x, *y)) else {
                    return CompareOutcome::Continue;
                };
                let input = PointerInput::mouse(*x as f64, *y as f64);
                match self.core.press(&input, target) {
                    PressOutcome::Started { changed: true } => CompareOutcome::Position,
                    // repaint for the drag style
                    PressOutcome::Started { changed: false } => CompareOutcome::Changed,
                    PressOutcome::Ignored => CompareOutcome::Continue,
                }
            }
            ct_event!(mouse drag Left for x, y) => {
                if self.core.is_dragging() {
                    let input = PointerInput::mouse(*x as f64, *y as f64);
                    self.core.pointer_move(&input).into()
                } else {
                    CompareOutcome::Continue
                }
            }
            ct_event!(mouse up Left for _x, _y) => {
                if self.core.release() {
                    CompareOutcome::Changed
                } else {
                    CompareOutcome::Continue
                }
            }
            ct_event!(mouse any for m) if m.kind == MouseEventKind::Moved => {
                // no button is down. a lost mouse-up ends the drag here.
                let ended = self.core.is_dragging() && self.core.release();

                let hover_changed = self.mouse.hover(self.inner, m);
                let r = if self.mouse.hover.get() {
                    let input = PointerInput::mouse(m.column as f64, m.row as f64);
                    if self.core.hover_move(&input) {
                        CompareOutcome::Position
                    } else if self.core.props().change_position_on_hover {
                        CompareOutcome::Unchanged
                    } else {
                        CompareOutcome::Continue
                    }
                } else if hover_changed && self.core.pointer_leave(false) {
                    CompareOutcome::Changed
                } else {
                    CompareOutcome::Continue
                };

                if ended && !matches!(r, CompareOutcome::Position) {
                    CompareOutcome::Changed
                } else {
                    r
                }
            }
            _ => CompareOutcome::Continue,
        }
    }
}

/// Handle all events.
/// Key events are only processed if focus is true.
/// Mouse events are processed if they are in range.
pub fn handle_events(
    state: &mut CompareSliderState,
    focus: bool,
    event: &crossterm::event::Event,
) -> CompareOutcome {
    state.focus.set(focus);
    HandleEvent::handle(state, event, Regular)
}

/// Handle only mouse-events.
pub fn handle_mouse_events(
    state: &mut CompareSliderState,
    event: &crossterm::event::Event,
) -> CompareOutcome {
    HandleEvent::handle(state, event, MouseOnly)
}
