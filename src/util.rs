//!
//! Small helpers.
//!
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use std::mem;

/// Returns a new style with fg and bg swapped.
///
/// This is not the same as setting Style::reversed().
/// The latter sends special controls to the terminal,
/// the former just swaps.
pub fn revert_style(mut style: Style) -> Style {
    if style.fg.is_some() || style.bg.is_some() {
        mem::swap(&mut style.fg, &mut style.bg);
        style
    } else {
        style.black().on_white()
    }
}

/// Copy the cells of the area from src to buf.
///
/// Cells outside either buffer are ignored.
pub fn copy_buf_area(src: &Buffer, area: Rect, buf: &mut Buffer) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(src_cell), Some(tgt_cell)) = (src.cell((x, y)), buf.cell_mut((x, y))) {
                *tgt_cell = src_cell.clone();
            }
        }
    }
}
