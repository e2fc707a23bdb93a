// Event surface of the window frame (title bar and controls).
// The frame holds no authoritative state; it reports gestures here.

use serde::{Deserialize, Serialize};

use super::window::Point;
use super::WindowManager;
use crate::error::WmError;

/// A gesture reported by a window's chrome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChromeEvent {
    /// Mouse-down anywhere inside the frame
    #[serde(rename_all = "camelCase")]
    FocusRequest { app_id: String },
    /// Mouse-down on the title bar
    #[serde(rename_all = "camelCase")]
    DragStart { app_id: String, point: Point },
    #[serde(rename_all = "camelCase")]
    DragMove { app_id: String, point: Point },
    /// Mouse-up; the frontend may omit the final pointer position
    #[serde(rename_all = "camelCase")]
    DragEnd {
        app_id: String,
        point: Option<Point>,
    },
    #[serde(rename_all = "camelCase")]
    Minimize { app_id: String },
    #[serde(rename_all = "camelCase")]
    ToggleMaximize { app_id: String },
    #[serde(rename_all = "camelCase")]
    Close { app_id: String },
}

impl ChromeEvent {
    pub fn app_id(&self) -> &str {
        match self {
            ChromeEvent::FocusRequest { app_id }
            | ChromeEvent::DragStart { app_id, .. }
            | ChromeEvent::DragMove { app_id, .. }
            | ChromeEvent::DragEnd { app_id, .. }
            | ChromeEvent::Minimize { app_id }
            | ChromeEvent::ToggleMaximize { app_id }
            | ChromeEvent::Close { app_id } => app_id,
        }
    }

    /// Pointer moves fire constantly; callers skip logging and re-emitting
    /// the full snapshot for these
    pub fn is_high_frequency(&self) -> bool {
        matches!(self, ChromeEvent::DragMove { .. })
    }
}

impl WindowManager {
    /// Apply a chrome gesture. Returns whether window state changed.
    pub fn dispatch(&mut self, event: &ChromeEvent) -> Result<bool, WmError> {
        match event {
            ChromeEvent::FocusRequest { app_id } => self.focus(app_id),
            ChromeEvent::DragStart { app_id, point } => {
                // Focus happens even when no drag starts (maximized window)
                let before = self.active_window_id().map(str::to_string);
                let started = self.begin_drag(app_id, *point)?;
                Ok(started || before.as_deref() != self.active_window_id())
            }
            ChromeEvent::DragMove { app_id, point } => {
                Ok(self.drag_move(app_id, *point)?.is_some())
            }
            ChromeEvent::DragEnd { app_id, point } => Ok(self.end_drag(app_id, *point)?.is_some()),
            ChromeEvent::Minimize { app_id } => self.minimize(app_id),
            ChromeEvent::ToggleMaximize { app_id } => self.toggle_maximize(app_id),
            ChromeEvent::Close { app_id } => Ok(self.close(app_id)?.is_some()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_wire_format() {
        let event: ChromeEvent = serde_json::from_value(json!({
            "type": "dragStart",
            "appId": "about",
            "point": { "x": 12.0, "y": 40.5 }
        }))
        .unwrap();

        assert_eq!(
            event,
            ChromeEvent::DragStart {
                app_id: "about".to_string(),
                point: Point::new(12.0, 40.5),
            }
        );
        assert_eq!(event.app_id(), "about");

        let end: ChromeEvent =
            serde_json::from_value(json!({ "type": "dragEnd", "appId": "about" })).unwrap();
        assert_eq!(
            end,
            ChromeEvent::DragEnd {
                app_id: "about".to_string(),
                point: None
            }
        );
    }

    #[test]
    fn test_dispatch_full_gesture() {
        let mut wm = WindowManager::default();
        wm.open_app("about").unwrap();
        wm.open_app("resume").unwrap();

        let id = "about".to_string();
        assert!(wm
            .dispatch(&ChromeEvent::DragStart {
                app_id: id.clone(),
                point: Point::new(110.0, 70.0),
            })
            .unwrap());
        assert_eq!(wm.active_window_id(), Some("about"));

        assert!(wm
            .dispatch(&ChromeEvent::DragMove {
                app_id: id.clone(),
                point: Point::new(310.0, 270.0),
            })
            .unwrap());
        assert!(wm
            .dispatch(&ChromeEvent::DragEnd {
                app_id: id.clone(),
                point: None,
            })
            .unwrap());

        assert_eq!(wm.get("about").unwrap().position, Point::new(300.0, 260.0));
    }

    #[test]
    fn test_dispatch_controls() {
        let mut wm = WindowManager::default();
        wm.open_app("terminal").unwrap();
        let id = "terminal".to_string();

        assert!(wm
            .dispatch(&ChromeEvent::ToggleMaximize { app_id: id.clone() })
            .unwrap());
        assert!(wm.get("terminal").unwrap().is_maximized);

        assert!(wm.dispatch(&ChromeEvent::Minimize { app_id: id.clone() }).unwrap());
        assert_eq!(wm.active_window_id(), None);

        assert!(wm.dispatch(&ChromeEvent::Close { app_id: id.clone() }).unwrap());
        assert!(!wm.dispatch(&ChromeEvent::Close { app_id: id.clone() }).unwrap());
        assert!(!wm.dispatch(&ChromeEvent::FocusRequest { app_id: id }).unwrap());
    }

    #[test]
    fn test_drag_start_on_maximized_still_reports_focus_change() {
        let mut wm = WindowManager::default();
        wm.open_app("about").unwrap();
        wm.toggle_maximize("about").unwrap();
        wm.open_app("resume").unwrap();

        let changed = wm
            .dispatch(&ChromeEvent::DragStart {
                app_id: "about".to_string(),
                point: Point::new(5.0, 5.0),
            })
            .unwrap();

        assert!(changed);
        assert!(!wm.is_dragging("about"));
        assert_eq!(wm.active_window_id(), Some("about"));
    }
}
