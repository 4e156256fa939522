use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rat_compare::event::{CompareOutcome, HandleEvent, MouseOnly, Outcome};
use rat_compare::focus::HasFocus;
use rat_compare::reloc::RelocatableState;
use rat_compare::slider::{handle_events, handle_mouse_events, CompareSlider, CompareSliderState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use std::cell::RefCell;
use std::rc::Rc;

struct Fill(&'static str);

impl Widget for Fill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                buf[(x, y)].set_symbol(self.0);
            }
        }
    }
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn row(buf: &Buffer, y: u16) -> String {
    (buf.area.left()..buf.area.right())
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect()
}

#[test]
fn test_render() {
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::new();

    CompareSlider::new(Fill("A"), Fill("B")).render(area, &mut buf, &mut state);

    assert_eq!(state.position(), 50.0);
    assert_eq!(state.clip, Rect::new(0, 0, 10, 3));
    assert_eq!(state.handle, Rect::new(9, 0, 3, 3));

    assert_eq!(row(&buf, 0), "AAAAAAAAAA│BBBBBBBBB");
    assert_eq!(row(&buf, 1), "AAAAAAAAA◀│▶BBBBBBBB");
    assert_eq!(row(&buf, 2), "AAAAAAAAAA│BBBBBBBBB");
}

#[test]
fn test_render_block() {
    let area = Rect::new(0, 0, 22, 5);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::new();

    CompareSlider::new(Fill("A"), Fill("B"))
        .block(Block::bordered())
        .position(25.0)
        .render(area, &mut buf, &mut state);

    assert_eq!(state.inner, Rect::new(1, 1, 20, 3));
    assert_eq!(state.clip, Rect::new(1, 1, 5, 3));
    assert_eq!(buf[(1, 1)].symbol(), "A");
    assert_eq!(buf[(20, 1)].symbol(), "B");
    assert_eq!(buf[(0, 0)].symbol(), "┌");
}

#[test]
fn test_portrait() {
    let area = Rect::new(0, 0, 10, 10);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::new();

    CompareSlider::new(Fill("A"), Fill("B"))
        .portrait(true)
        .render(area, &mut buf, &mut state);

    assert_eq!(state.clip, Rect::new(0, 0, 10, 5));
    assert_eq!(state.handle, Rect::new(0, 5, 10, 1));
    assert_eq!(row(&buf, 4), "AAAAAAAAAA");
    assert_eq!(row(&buf, 5), "────▲▼────");
    assert_eq!(row(&buf, 9), "BBBBBBBBBB");
}

#[test]
fn test_mouse_drag() {
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::new();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen2 = seen.clone();
    state.set_on_position_change(Some(Box::new(move |v: f64| seen2.borrow_mut().push(v))));

    CompareSlider::new(Fill("A"), Fill("B")).render(area, &mut buf, &mut state);

    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Down(MouseButton::Left), 5, 0));
    assert_eq!(r, CompareOutcome::Position);
    assert_eq!(state.position(), 25.0);
    assert!(state.is_dragging());

    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Drag(MouseButton::Left), 15, 7));
    assert_eq!(r, CompareOutcome::Position);
    assert_eq!(state.position(), 75.0);

    // past the edge, only once
    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Drag(MouseButton::Left), 30, 0));
    assert_eq!(r, CompareOutcome::Position);
    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Drag(MouseButton::Left), 40, 0));
    assert_eq!(r, CompareOutcome::Unchanged);

    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Up(MouseButton::Left), 40, 0));
    assert_eq!(r, CompareOutcome::Changed);
    assert!(!state.is_dragging());

    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Drag(MouseButton::Left), 5, 0));
    assert_eq!(r, CompareOutcome::Continue);

    assert_eq!(*seen.borrow(), vec![50.0, 25.0, 75.0, 100.0]);

    // outside
    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Down(MouseButton::Left), 5, 10));
    assert_eq!(r, CompareOutcome::Continue);
    assert!(!state.is_dragging());
}

#[test]
fn test_only_handle() {
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::new();

    CompareSlider::new(Fill("A"), Fill("B"))
        .only_handle_draggable(true)
        .render(area, &mut buf, &mut state);

    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
    assert_eq!(r, CompareOutcome::Continue);
    assert!(!state.is_dragging());
    assert_eq!(state.position(), 50.0);

    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Down(MouseButton::Left), 11, 1));
    assert_eq!(r, CompareOutcome::Position);
    assert!(state.is_dragging());
    assert_eq!(state.position(), 55.0);
}

#[test]
fn test_hover() {
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::new();

    CompareSlider::new(Fill("A"), Fill("B"))
        .change_position_on_hover(true)
        .render(area, &mut buf, &mut state);

    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Moved, 15, 1));
    assert_eq!(r, CompareOutcome::Position);
    assert_eq!(state.position(), 75.0);

    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Moved, 30, 10));
    assert_eq!(r, CompareOutcome::Continue);
    assert_eq!(state.position(), 75.0);
}

#[test]
fn test_lost_mouse_up() {
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::new();

    CompareSlider::new(Fill("A"), Fill("B")).render(area, &mut buf, &mut state);

    handle_mouse_events(&mut state, &mouse(MouseEventKind::Down(MouseButton::Left), 5, 0));
    assert!(state.is_dragging());

    let r = handle_mouse_events(&mut state, &mouse(MouseEventKind::Moved, 8, 0));
    assert_eq!(r, CompareOutcome::Changed);
    assert!(!state.is_dragging());
    assert_eq!(state.position(), 25.0);
}

#[test]
fn test_keys() {
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::new();

    CompareSlider::new(Fill("A"), Fill("B")).render(area, &mut buf, &mut state);

    // no focus
    let r = handle_events(&mut state, false, &key(KeyCode::Right));
    assert_eq!(r, CompareOutcome::Continue);
    assert_eq!(state.position(), 50.0);

    let r = handle_events(&mut state, true, &key(KeyCode::Right));
    assert_eq!(r, CompareOutcome::Position);
    assert!((state.position() - 51.0).abs() < 1e-9);

    let r = handle_events(&mut state, true, &key(KeyCode::PageDown));
    assert_eq!(r, CompareOutcome::Position);
    assert!((state.position() - 61.0).abs() < 1e-9);

    let r = handle_events(&mut state, true, &key(KeyCode::Home));
    assert_eq!(r, CompareOutcome::Position);
    assert_eq!(state.position(), 0.0);

    let r = handle_events(&mut state, true, &key(KeyCode::Home));
    assert_eq!(r, CompareOutcome::Unchanged);

    let r = handle_events(&mut state, true, &key(KeyCode::Left));
    assert_eq!(r, CompareOutcome::Unchanged);
    assert_eq!(state.position(), 0.0);

    let r = handle_events(&mut state, true, &key(KeyCode::End));
    assert_eq!(r, CompareOutcome::Position);
    assert_eq!(state.position(), 100.0);

    let r: Outcome = HandleEvent::handle(&mut state, &key(KeyCode::End), MouseOnly).into();
    assert_eq!(r, Outcome::Continue);
}

#[test]
fn test_resize_keeps_position() {
    let mut state = CompareSliderState::new();

    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    CompareSlider::new(Fill("A"), Fill("B")).render(area, &mut buf, &mut state);

    handle_mouse_events(&mut state, &mouse(MouseEventKind::Down(MouseButton::Left), 5, 0));
    handle_mouse_events(&mut state, &mouse(MouseEventKind::Up(MouseButton::Left), 5, 0));
    assert_eq!(state.position(), 25.0);

    let area = Rect::new(0, 0, 40, 3);
    let mut buf = Buffer::empty(area);
    CompareSlider::new(Fill("A"), Fill("B")).render(area, &mut buf, &mut state);

    assert!((state.position() - 25.0).abs() < 1e-9);
    assert_eq!(state.clip, Rect::new(0, 0, 10, 3));

    // changed position overrides
    CompareSlider::new(Fill("A"), Fill("B"))
        .position(80.0)
        .render(area, &mut buf, &mut state);
    assert_eq!(state.position(), 80.0);
    assert_eq!(state.clip, Rect::new(0, 0, 32, 3));
}

#[test]
fn test_focus_reloc() {
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::named("compare");

    CompareSlider::new(Fill("A"), Fill("B")).render(area, &mut buf, &mut state);

    assert_eq!(HasFocus::area(&state), area);
    assert!(!state.is_focused());

    state.relocate((2, 1), Rect::new(0, 0, 40, 10));
    assert_eq!(state.area, Rect::new(2, 1, 20, 3));
    assert_eq!(state.handle, Rect::new(11, 1, 3, 3));
}

#[test]
fn test_render_at_zero() {
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::new();

    CompareSlider::new(Fill("A"), Fill("B"))
        .position(0.0)
        .render(area, &mut buf, &mut state);

    assert_eq!(state.clip.width, 0);
    assert_eq!(state.divider, 0);
    assert_eq!(state.handle, Rect::new(0, 0, 2, 3));
    assert_eq!(row(&buf, 0), "│BBBBBBBBBBBBBBBBBBB");
    assert_eq!(row(&buf, 1), "│▶BBBBBBBBBBBBBBBBBB");
}

#[test]
fn test_geometry_change_at_bound() {
    let mut state = CompareSliderState::new();

    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    CompareSlider::new(Fill("A"), Fill("B")).render(area, &mut buf, &mut state);

    handle_mouse_events(&mut state, &mouse(MouseEventKind::Down(MouseButton::Left), 19, 0));
    handle_mouse_events(&mut state, &mouse(MouseEventKind::Drag(MouseButton::Left), 30, 0));
    handle_mouse_events(&mut state, &mouse(MouseEventKind::Up(MouseButton::Left), 30, 0));
    assert_eq!(state.position(), 100.0);

    // resize
    let area = Rect::new(0, 0, 40, 3);
    let mut buf = Buffer::empty(area);
    CompareSlider::new(Fill("A"), Fill("B")).render(area, &mut buf, &mut state);
    assert_eq!(state.position(), 100.0);
    assert_eq!(state.clip, Rect::new(0, 0, 40, 3));
    assert_eq!(state.divider, 39);
    assert_eq!(row(&buf, 0), "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA│");

    // portrait
    let area = Rect::new(0, 0, 40, 10);
    let mut buf = Buffer::empty(area);
    CompareSlider::new(Fill("A"), Fill("B"))
        .portrait(true)
        .render(area, &mut buf, &mut state);
    assert_eq!(state.position(), 100.0);
    assert_eq!(state.clip, Rect::new(0, 0, 40, 10));
    assert_eq!(state.handle, Rect::new(0, 9, 40, 1));

    // padding
    CompareSlider::new(Fill("A"), Fill("B"))
        .portrait(true)
        .bounds_padding(2)
        .render(area, &mut buf, &mut state);
    assert_eq!(state.position(), 100.0);
    assert_eq!(state.clip, Rect::new(0, 0, 40, 8));
    assert_eq!(state.handle, Rect::new(0, 8, 40, 1));
}

#[test]
fn test_teardown() {
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    let mut state = CompareSliderState::new();

    CompareSlider::new(Fill("A"), Fill("B")).render(area, &mut buf, &mut state);
    handle_mouse_events(&mut state, &mouse(MouseEventKind::Down(MouseButton::Left), 5, 0));
    assert!(state.is_dragging());
    assert!(state.resize.observed().is_some());

    state.teardown();
    assert!(!state.is_dragging());
    assert_eq!(state.resize.observed(), None);
    assert_eq!(state.position(), 25.0);
}
