// Drag gesture bookkeeping.
// The session owns the provisional position while the pointer moves;
// the registry only sees the final position, once, when the gesture ends.

use super::window::{Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub app_id: String,
    /// Pointer offset inside the window frame, captured at pointer-down
    pub grab_offset: Point,
    pub size: Size,
    /// Where the window is drawn right now
    pub provisional: Point,
}

impl DragSession {
    pub fn begin(app_id: &str, pointer: Point, position: Point, size: Size) -> Self {
        Self {
            app_id: app_id.to_string(),
            grab_offset: pointer.offset_from(position),
            size,
            provisional: position,
        }
    }

    pub fn is_for(&self, app_id: &str) -> bool {
        self.app_id == app_id
    }

    pub fn frame(&self) -> Rect {
        Rect::from_parts(self.provisional, self.size)
    }
}
