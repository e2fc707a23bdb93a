use serde::{Deserialize, Serialize};

/// A point in canvas coordinates (pixels from the top-left corner)
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_from(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Absolute frame a window is drawn into
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_parts(position: Point, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }
}

/// Dimensions of the browser viewport hosting the desktop.
/// The taskbar occupies the bottom `taskbar_height` pixels.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub id: String,              // App id, one window per app
    pub title: String,           // Title bar text
    pub icon: String,            // Icon name understood by the frontend
    pub content_key: String,     // What to render inside the frame (opaque to us)
    pub is_open: bool,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub z_order: u32,            // Higher draws on top
    pub position: Point,         // Committed position, ignored while maximized
    pub size: Size,
}

impl WindowRecord {
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }

    pub fn is_draggable(&self) -> bool {
        self.is_visible() && !self.is_maximized
    }
}

/// One frame for the renderer, in ascending z-order
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderEntry {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub content_key: String,
    pub is_active: bool,
    pub is_maximized: bool,
    pub z_order: u32,
    pub position: Point,
    pub size: Size,
    /// Where the frame actually goes this render: the canvas when maximized,
    /// the provisional drag position while dragging, the record otherwise.
    pub frame: Rect,
}

/// One open window as the taskbar shows it (minimized ones included)
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskbarEntry {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub is_minimized: bool,
    pub is_active: bool,
    pub pinned: bool,
}

/// A pinned launcher button and the state of the app behind it
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PinnedEntry {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub is_open: bool,
    pub is_active: bool,
}

/// Everything the frontend needs after a state change, computed once
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesktopSnapshot {
    pub windows: Vec<RenderEntry>,
    pub taskbar: Vec<TaskbarEntry>,
    pub pinned: Vec<PinnedEntry>,
    pub active_window_id: Option<String>,
    pub open_apps: Vec<String>,
    pub viewport: Viewport,
}
