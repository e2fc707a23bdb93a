// Placement rules: where new windows appear and where dragged ones land

use super::window::{Point, Rect, Size, Viewport};
use crate::config::DesktopConfig;

/// Default position for a new window given how many windows are open.
///
/// Only the count matters. Closing and reopening windows can land two
/// windows on the same offset.
pub fn cascade_position(open_count: usize, base: Point, step: Point) -> Point {
    let n = open_count as f64;
    Point::new(base.x + n * step.x, base.y + n * step.y)
}

/// Area windows live in: the viewport minus the taskbar strip
pub fn canvas(viewport: Viewport, taskbar_height: f64) -> Rect {
    Rect {
        x: 0.0,
        y: 0.0,
        width: viewport.width,
        height: (viewport.height - taskbar_height).max(0.0),
    }
}

/// Clamp a candidate position onto a canvas edge when it is within `threshold`.
/// Each axis snaps on its own; the near edge (left/top) wins over the far one.
pub fn snap_to_edges(candidate: Point, size: Size, canvas: Rect, threshold: f64) -> Point {
    Point::new(
        snap_axis(candidate.x, size.width, canvas.x, canvas.width, threshold),
        snap_axis(candidate.y, size.height, canvas.y, canvas.height, threshold),
    )
}

fn snap_axis(value: f64, extent: f64, origin: f64, span: f64, threshold: f64) -> f64 {
    // Anything left of / above the near edge is pulled back onto it
    if value - origin <= threshold {
        return origin;
    }

    let far_edge = origin + span;
    if (value + extent - far_edge).abs() <= threshold {
        return far_edge - extent;
    }

    value
}

/// Where the pointer puts the window during a drag, before snapping
pub fn drag_candidate(pointer: Point, grab_offset: Point) -> Point {
    pointer.offset_from(grab_offset)
}

/// Full drag-move computation: follow the pointer, then snap to the canvas
pub fn drag_position(
    pointer: Point,
    grab_offset: Point,
    size: Size,
    viewport: Viewport,
    config: &DesktopConfig,
) -> Point {
    let candidate = drag_candidate(pointer, grab_offset);
    snap_to_edges(
        candidate,
        size,
        canvas(viewport, config.taskbar_height),
        config.snap_threshold,
    )
}
