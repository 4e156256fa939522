//!
//! Default handle for the comparison slider.
//!
//! A line along the divider with a button in the middle.
//!

use crate::util::revert_style;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Widget;
use std::borrow::Cow;

/// Default handle.
#[derive(Debug, Default, Clone)]
pub struct CompareHandle<'a> {
    portrait: bool,
    divider: Option<u16>,
    style: Style,
    line_style: Option<Style>,
    button_style: Option<Style>,
    line_symbol: Option<Cow<'a, str>>,
    button_symbol: Option<Cow<'a, str>>,
}

impl<'a> CompareHandle<'a> {
    /// New
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for a vertical divider movement.
    /// The line is drawn horizontally then.
    pub fn portrait(mut self, portrait: bool) -> Self {
        self.portrait = portrait;
        self
    }

    /// Column (row for portrait) of the divider.
    ///
    /// The line is drawn there and the button is centered on it.
    /// Defaults to the middle of the area.
    pub fn divider(mut self, divider: u16) -> Self {
        self.divider = Some(divider);
        self
    }

    /// Base style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style for the line.
    pub fn line_style(mut self, style: Style) -> Self {
        self.line_style = Some(style);
        self
    }

    /// Style for the button.
    pub fn button_style(mut self, style: Style) -> Self {
        self.button_style = Some(style);
        self
    }

    /// Symbol for the line.
    pub fn line_symbol(mut self, symbol: impl Into<Cow<'a, str>>) -> Self {
        self.line_symbol = Some(symbol.into());
        self
    }

    /// Text for the button. Centered across the handle area.
    pub fn button_symbol(mut self, symbol: impl Into<Cow<'a, str>>) -> Self {
        self.button_symbol = Some(symbol.into());
        self
    }
}

impl Widget for CompareHandle<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_handle(&self, area, buf);
    }
}

impl Widget for &CompareHandle<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_handle(self, area, buf);
    }
}

fn render_handle(widget: &CompareHandle<'_>, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }

    let line_style = widget.line_style.unwrap_or(widget.style);
    let button_style = widget.button_style.unwrap_or(revert_style(widget.style));

    if widget.portrait {
        let line = widget.line_symbol.as_deref().unwrap_or("─");
        let y = match widget.divider {
            Some(d) => d.clamp(area.top(), area.bottom() - 1),
            None => area.y + area.height / 2,
        };
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(line);
                cell.set_style(line_style);
            }
        }

        let button = widget.button_symbol.as_deref().unwrap_or("▲▼");
        Line::from(button)
            .style(button_style)
            .alignment(Alignment::Center)
            .render(Rect::new(area.x, y, area.width, 1), buf);
    } else {
        let line = widget.line_symbol.as_deref().unwrap_or("│");
        let x = match widget.divider {
            Some(d) => d.clamp(area.left(), area.right() - 1),
            None => area.x + area.width / 2,
        };
        for y in area.top()..area.bottom() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(line);
                cell.set_style(line_style);
            }
        }

        let button = widget.button_symbol.as_deref().unwrap_or("◀│▶");
        let y = area.y + area.height / 2;
        render_centered(Line::from(button).style(button_style), x, y, area, buf);
    }
}

// Renders the line centered on column x. Cells outside the area are cut.
fn render_centered(line: Line<'_>, x: u16, y: u16, area: Rect, buf: &mut Buffer) {
    let width = line.width() as u16;
    let mut tmp = Buffer::empty(Rect::new(0, 0, width, 1));
    line.render(tmp.area, &mut tmp);

    let start = x as i32 - (width / 2) as i32;
    for i in 0..width {
        let tx = start + i as i32;
        if tx < area.left() as i32 || tx >= area.right() as i32 {
            continue;
        }
        if let (Some(src), Some(tgt)) = (tmp.cell((i, 0)), buf.cell_mut((tx as u16, y))) {
            *tgt = src.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_centered() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 3));
        CompareHandle::new().render(Rect::new(1, 0, 3, 3), &mut buf);
        assert_eq!(row(&buf, 0), "  │  ");
        assert_eq!(row(&buf, 1), " ◀│▶ ");
    }

    #[test]
    fn test_divider_at_edge() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 3));
        CompareHandle::new()
            .divider(0)
            .render(Rect::new(0, 0, 2, 3), &mut buf);
        assert_eq!(row(&buf, 0), "│    ");
        assert_eq!(row(&buf, 1), "│▶   ");

        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 3));
        CompareHandle::new()
            .divider(4)
            .render(Rect::new(3, 0, 2, 3), &mut buf);
        assert_eq!(row(&buf, 0), "    │");
        assert_eq!(row(&buf, 1), "   ◀│");
    }
}
