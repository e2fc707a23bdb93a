use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};

use self::apps::AppDescriptor;
use self::drag::DragSession;
use self::window::{
    DesktopSnapshot, PinnedEntry, Point, Rect, RenderEntry, TaskbarEntry, Viewport, WindowRecord,
};
use crate::config::DesktopConfig;
use crate::error::WmError;

pub mod apps;
pub mod chrome;
pub mod drag;
pub mod placement;
pub mod window;

/// First z-order handed out; leaves room below for desktop-level layers
const Z_BASE: u32 = 10;

/// What an `open` call ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum OpenOutcome {
    /// No window existed; one was created
    Created,
    /// The window was minimized and has been brought back
    Restored,
    /// The window was already visible and has been raised
    Focused,
}

/// Sole owner of window state. Launchers, the taskbar and window chrome
/// all go through these methods; nothing else mutates a record.
pub struct WindowManager {
    windows: HashMap<String, WindowRecord>,
    order: Vec<String>, // Registry order (opening order), used by the taskbar
    active_id: Option<String>,
    next_z: u32,
    drag: Option<DragSession>,
    viewport: Viewport,
    config: DesktopConfig,
    opened_this_session: BTreeSet<String>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl WindowManager {
    pub fn new(config: DesktopConfig) -> Self {
        Self {
            windows: HashMap::new(),
            order: Vec::new(),
            active_id: None,
            next_z: Z_BASE,
            drag: None,
            viewport: config.initial_viewport,
            config,
            opened_this_session: BTreeSet::new(),
        }
    }

    // ===== Registry & lifecycle =====

    /// Open the app from the catalog. Launchers call this.
    pub fn open_app(&mut self, app_id: &str) -> Result<OpenOutcome, WmError> {
        validate_id(app_id)?;
        let descriptor =
            apps::lookup(app_id).ok_or_else(|| WmError::UnknownApp(app_id.to_string()))?;
        self.open(app_id, descriptor)
    }

    /// Create the window if absent, otherwise unminimize and/or raise it.
    /// `descriptor` is only consulted on first creation.
    pub fn open(
        &mut self,
        app_id: &str,
        descriptor: &AppDescriptor,
    ) -> Result<OpenOutcome, WmError> {
        validate_id(app_id)?;
        self.opened_this_session.insert(app_id.to_string());

        if let Some(existing) = self.windows.get(app_id) {
            let outcome = if existing.is_minimized {
                OpenOutcome::Restored
            } else {
                OpenOutcome::Focused
            };
            self.restore(app_id)?;
            info!(app_id, ?outcome, "reopened window");
            return Ok(outcome);
        }

        let position = placement::cascade_position(
            self.open_count(),
            self.config.cascade_base,
            self.config.cascade_step,
        );

        let record = WindowRecord {
            id: app_id.to_string(),
            title: descriptor.title.to_string(),
            icon: descriptor.icon.to_string(),
            content_key: descriptor.content_key.to_string(),
            is_open: true,
            is_minimized: false,
            is_maximized: false,
            z_order: 0, // Assigned by focus below
            position,
            size: descriptor.default_size,
        };

        self.windows.insert(app_id.to_string(), record);
        self.order.push(app_id.to_string());
        self.focus(app_id)?;

        info!(app_id, x = position.x, y = position.y, "created window");
        Ok(OpenOutcome::Created)
    }

    /// Remove a window outright. Returns the record that was dropped so the
    /// caller can release whatever its content held.
    pub fn close(&mut self, app_id: &str) -> Result<Option<WindowRecord>, WmError> {
        validate_id(app_id)?;

        let Some(removed) = self.windows.remove(app_id) else {
            return Ok(None);
        };
        self.order.retain(|id| id != app_id);
        self.clear_active_if(app_id);
        self.cancel_drag_for(app_id);

        info!(app_id, "closed window");
        Ok(Some(removed))
    }

    /// Hide a window, keeping its state. Returns whether anything changed.
    pub fn minimize(&mut self, app_id: &str) -> Result<bool, WmError> {
        validate_id(app_id)?;

        let Some(win) = self.windows.get_mut(app_id) else {
            return Ok(false);
        };
        if win.is_minimized {
            return Ok(false);
        }
        win.is_minimized = true;
        self.clear_active_if(app_id);
        self.cancel_drag_for(app_id);

        info!(app_id, "minimized window");
        Ok(true)
    }

    /// Flip between the full canvas and the window's own geometry, then raise it.
    pub fn toggle_maximize(&mut self, app_id: &str) -> Result<bool, WmError> {
        validate_id(app_id)?;

        let Some(win) = self.windows.get_mut(app_id) else {
            return Ok(false);
        };
        win.is_maximized = !win.is_maximized;
        let maximized = win.is_maximized;
        self.cancel_drag_for(app_id);

        // A minimized window has nothing to raise; its flag still flips
        self.focus(app_id)?;
        info!(app_id, maximized, "toggled maximize");
        Ok(true)
    }

    /// Taskbar click: bring a window back if minimized, then raise it
    pub fn restore(&mut self, app_id: &str) -> Result<bool, WmError> {
        validate_id(app_id)?;

        let Some(win) = self.windows.get_mut(app_id) else {
            return Ok(false);
        };
        win.is_minimized = false;
        self.focus(app_id)
    }

    // ===== Focus / z-order =====

    /// Raise a window and make it the active one.
    /// Never creates a window; absent or minimized targets are a no-op.
    pub fn focus(&mut self, app_id: &str) -> Result<bool, WmError> {
        validate_id(app_id)?;

        match self.windows.get(app_id) {
            Some(win) if win.is_visible() => {}
            _ => return Ok(false),
        }

        if self.next_z == u32::MAX {
            self.compact_z_order();
        }

        let z = self.next_z;
        self.next_z += 1;
        if let Some(win) = self.windows.get_mut(app_id) {
            win.z_order = z;
        }
        self.active_id = Some(app_id.to_string());

        debug!(app_id, z, "focused window");
        Ok(true)
    }

    /// Renumber z-orders to dense ranks without changing their relative order
    fn compact_z_order(&mut self) {
        let mut ids: Vec<String> = self.windows.keys().cloned().collect();
        ids.sort_by_key(|id| self.windows[id].z_order);

        for (rank, id) in ids.iter().enumerate() {
            if let Some(win) = self.windows.get_mut(id) {
                win.z_order = (rank as u32) + 1;
            }
        }
        self.next_z = (ids.len() as u32) + 1;
        info!(next_z = self.next_z, "compacted z-order");
    }

    fn clear_active_if(&mut self, app_id: &str) {
        if self.active_id.as_deref() == Some(app_id) {
            self.active_id = None;
        }
    }

    // ===== Dragging =====

    /// Pointer-down on a title bar. Always focuses; starts a drag session
    /// unless the window is maximized.
    pub fn begin_drag(&mut self, app_id: &str, pointer: Point) -> Result<bool, WmError> {
        validate_id(app_id)?;

        if !self.focus(app_id)? {
            return Ok(false);
        }

        let Some(win) = self.windows.get(app_id) else {
            return Ok(false);
        };
        if !win.is_draggable() {
            return Ok(false);
        }

        if let Some(previous) = &self.drag {
            debug!(app_id = %previous.app_id, "dropping unfinished drag");
        }
        self.drag = Some(DragSession::begin(app_id, pointer, win.position, win.size));
        debug!(app_id, "drag started");
        Ok(true)
    }

    /// Pointer-move while dragging. Returns the new provisional position, or
    /// `None` if there is no live drag for this window.
    pub fn drag_move(&mut self, app_id: &str, pointer: Point) -> Result<Option<Point>, WmError> {
        validate_id(app_id)?;

        if !self.drag_is_live(app_id) {
            return Ok(None);
        }
        let viewport = self.viewport;
        let config = &self.config;
        let Some(session) = self.drag.as_mut() else {
            return Ok(None);
        };

        session.provisional = placement::drag_position(
            pointer,
            session.grab_offset,
            session.size,
            viewport,
            config,
        );
        Ok(Some(session.provisional))
    }

    /// Pointer-up. Commits the final position exactly once, provided the
    /// window is still there and still draggable.
    pub fn end_drag(
        &mut self,
        app_id: &str,
        pointer: Option<Point>,
    ) -> Result<Option<Point>, WmError> {
        validate_id(app_id)?;

        if let Some(pointer) = pointer {
            self.drag_move(app_id, pointer)?;
        }

        let session = match self.drag.take() {
            Some(session) if session.is_for(app_id) => session,
            other => {
                // Not ours; leave any other session alone
                self.drag = other;
                return Ok(None);
            }
        };

        match self.windows.get_mut(app_id) {
            Some(win) if win.is_draggable() => {
                win.position = session.provisional;
                debug!(app_id, x = win.position.x, y = win.position.y, "drag committed");
                Ok(Some(win.position))
            }
            _ => Ok(None),
        }
    }

    fn drag_is_live(&self, app_id: &str) -> bool {
        let Some(session) = &self.drag else {
            return false;
        };
        session.is_for(app_id)
            && self
                .windows
                .get(app_id)
                .is_some_and(WindowRecord::is_draggable)
    }

    fn cancel_drag_for(&mut self, app_id: &str) {
        if self.drag.as_ref().is_some_and(|s| s.is_for(app_id)) {
            self.drag = None;
            debug!(app_id, "drag cancelled");
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // ===== Queries =====

    pub fn get(&self, app_id: &str) -> Option<&WindowRecord> {
        self.windows.get(app_id)
    }

    pub fn is_open(&self, app_id: &str) -> bool {
        self.windows.contains_key(app_id)
    }

    pub fn active_window_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn is_dragging(&self, app_id: &str) -> bool {
        self.drag.as_ref().is_some_and(|s| s.is_for(app_id))
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// Open windows, minimized ones included
    pub fn open_count(&self) -> usize {
        self.windows.values().filter(|w| w.is_open).count()
    }

    /// Every launcher-reachable app has been opened at least once
    pub fn has_explored_all(&self) -> bool {
        apps::discoverable_apps().all(|app| self.opened_this_session.contains(app.id))
    }

    /// Records in registry order
    pub fn records(&self) -> impl Iterator<Item = &WindowRecord> {
        self.order.iter().filter_map(|id| self.windows.get(id))
    }

    /// Visible windows, bottom to top
    pub fn render_list(&self) -> Vec<RenderEntry> {
        let canvas = placement::canvas(self.viewport, self.config.taskbar_height);

        let mut entries: Vec<RenderEntry> = self
            .records()
            .filter(|w| w.is_visible())
            .map(|w| {
                let frame = if w.is_maximized {
                    canvas
                } else {
                    match &self.drag {
                        Some(session) if session.is_for(&w.id) => session.frame(),
                        _ => Rect::from_parts(w.position, w.size),
                    }
                };
                RenderEntry {
                    id: w.id.clone(),
                    title: w.title.clone(),
                    icon: w.icon.clone(),
                    content_key: w.content_key.clone(),
                    is_active: self.active_id.as_deref() == Some(w.id.as_str()),
                    is_maximized: w.is_maximized,
                    z_order: w.z_order,
                    position: w.position,
                    size: w.size,
                    frame,
                }
            })
            .collect();

        entries.sort_by_key(|entry| entry.z_order);
        entries
    }

    pub fn taskbar(&self) -> Vec<TaskbarEntry> {
        self.records()
            .filter(|w| w.is_open)
            .map(|w| TaskbarEntry {
                id: w.id.clone(),
                title: w.title.clone(),
                icon: w.icon.clone(),
                is_minimized: w.is_minimized,
                is_active: self.active_id.as_deref() == Some(w.id.as_str()),
                pinned: apps::lookup(&w.id).is_some_and(|app| app.pinned),
            })
            .collect()
    }

    pub fn pinned(&self) -> Vec<PinnedEntry> {
        apps::pinned_apps()
            .map(|app| PinnedEntry {
                id: app.id.to_string(),
                label: app.label.to_string(),
                icon: app.icon.to_string(),
                is_open: self.is_open(app.id),
                is_active: self.active_id.as_deref() == Some(app.id),
            })
            .collect()
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        let mut open_apps: Vec<String> = self.windows.keys().cloned().collect();
        open_apps.sort();

        DesktopSnapshot {
            windows: self.render_list(),
            taskbar: self.taskbar(),
            pinned: self.pinned(),
            active_window_id: self.active_id.clone(),
            open_apps,
            viewport: self.viewport,
        }
    }
}

fn validate_id(app_id: &str) -> Result<(), WmError> {
    if app_id.trim().is_empty() {
        return Err(WmError::EmptyId);
    }
    Ok(())
}
