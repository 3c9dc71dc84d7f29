//! Mouse interaction with the table header: drag-to-reorder and
//! drag-to-resize.
//!
//! The renderer reports where each visible header cell landed on screen as a
//! `HeaderLayout`; this module turns raw mouse events against that layout
//! into `Intent`s. A press on a cell's right edge starts a resize, a press
//! anywhere else on the cell starts a drag. Drops resolve to the left or
//! right of the hovered cell depending on which half the pointer is over.

use crate::intent::Intent;
use ordex_core::DropSide;

/// Narrowest a column can be resized to, in terminal cells.
pub const MIN_COLUMN_WIDTH: u16 = 5;

/// How close to a cell's right edge a press counts as grabbing the resize
/// handle.
const RESIZE_GRIP: u16 = 1;

/// Screen placement of one visible header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderCell {
    /// Index into the visible column sequence.
    pub visible_index: usize,
    pub x: u16,
    pub width: u16,
}

/// Screen placement of the whole header row, rebuilt on every draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLayout {
    pub y: u16,
    pub cells: Vec<HeaderCell>,
}

impl HeaderLayout {
    pub fn hit(&self, x: u16, y: u16) -> Option<&HeaderCell> {
        if y != self.y {
            return None;
        }
        self.cells
            .iter()
            .find(|cell| x >= cell.x && x < cell.x + cell.width)
    }

    /// The cell whose right edge is under the pointer, if any.
    fn resize_handle(&self, x: u16, y: u16) -> Option<&HeaderCell> {
        let cell = self.hit(x, y)?;
        let edge = cell.x + cell.width - 1;
        if x + RESIZE_GRIP >= edge {
            Some(cell)
        } else {
            None
        }
    }
}

/// Which half of a cell the pointer is over.
pub fn drop_side(cell: &HeaderCell, x: u16) -> DropSide {
    if x < cell.x + cell.width / 2 {
        DropSide::Left
    } else {
        DropSide::Right
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Resizing {
        visible_index: usize,
        origin_x: u16,
    },
    Dragging {
        from: usize,
        hover: Option<(usize, DropSide)>,
    },
}

/// The header interaction state machine. Press starts a gesture, drag
/// updates it, release resolves it. Release always returns to `Idle`, even
/// when the pointer ends up somewhere useless.
#[derive(Debug, Clone, Default)]
pub struct HeaderInteraction {
    state: DragState,
}

impl HeaderInteraction {
    pub fn state(&self) -> DragState {
        self.state
    }

    /// The in-flight drag, for the renderer's drop indicator.
    pub fn drag_hover(&self) -> Option<(usize, Option<(usize, DropSide)>)> {
        match self.state {
            DragState::Dragging { from, hover } => Some((from, hover)),
            _ => None,
        }
    }

    pub fn on_mouse_down(&mut self, layout: &HeaderLayout, x: u16, y: u16) {
        if let Some(cell) = layout.resize_handle(x, y) {
            self.state = DragState::Resizing {
                visible_index: cell.visible_index,
                origin_x: cell.x,
            };
        } else if let Some(cell) = layout.hit(x, y) {
            self.state = DragState::Dragging {
                from: cell.visible_index,
                hover: None,
            };
        }
    }

    pub fn on_mouse_drag(&mut self, layout: &HeaderLayout, x: u16, y: u16) -> Option<Intent> {
        match &mut self.state {
            DragState::Resizing {
                visible_index,
                origin_x,
            } => {
                let width = x
                    .saturating_sub(*origin_x)
                    .saturating_add(1)
                    .max(MIN_COLUMN_WIDTH);
                Some(Intent::ResizeColumn {
                    visible_index: *visible_index,
                    width,
                })
            }
            DragState::Dragging { hover, .. } => {
                *hover = layout.hit(x, y).map(|cell| (cell.visible_index, drop_side(cell, x)));
                None
            }
            DragState::Idle => None,
        }
    }

    pub fn on_mouse_up(&mut self, layout: &HeaderLayout, x: u16, y: u16) -> Option<Intent> {
        let state = std::mem::take(&mut self.state);
        match state {
            DragState::Dragging { from, .. } => {
                let cell = layout.hit(x, y)?;
                Some(Intent::ReorderColumn {
                    from,
                    to: cell.visible_index,
                    side: drop_side(cell, x),
                })
            }
            DragState::Resizing { .. } | DragState::Idle => None,
        }
    }
}
