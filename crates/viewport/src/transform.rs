//! Pure world↔screen mapping for the 2D viewport.
//!
//! Convention:
//! - World space is the fixed logical extent (origin top-left).
//! - Screen space is device pixels of the current render surface, whose size
//!   is taken per call and never cached: the surface may resize between
//!   events.
//! - Pan is divided by zoom, so one pixel of drag moves the world one pixel
//!   on screen at the current zoom.

use foundation::bounds::Rect;
use foundation::math::Vec2;

use crate::config::WorldExtent;
use crate::view::ViewState;

/// The logical-space rectangle currently on screen.
///
/// Center-anchored: shrinking the rect on zoom-in holds the viewport center
/// fixed rather than the world origin, so zooming feels stable.
pub fn visible_world_rect(view: ViewState, extent: WorldExtent) -> Rect {
    let width = extent.width / view.zoom;
    let height = extent.height / view.zoom;
    Rect::new(
        (extent.width - width) / 2.0 - view.pan.x / view.zoom,
        (extent.height - height) / 2.0 - view.pan.y / view.zoom,
        width,
        height,
    )
}

/// Projects a world-space point into device pixels.
pub fn world_to_screen(
    p: Vec2,
    view: ViewState,
    extent: WorldExtent,
    screen_px: [f64; 2],
) -> [f64; 2] {
    let rect = visible_world_rect(view, extent);
    [
        (p.x - rect.x) / rect.width * screen_px[0],
        (p.y - rect.y) / rect.height * screen_px[1],
    ]
}

/// Exact inverse of [`world_to_screen`].
pub fn screen_to_world(
    p: [f64; 2],
    view: ViewState,
    extent: WorldExtent,
    screen_px: [f64; 2],
) -> Vec2 {
    let rect = visible_world_rect(view, extent);
    Vec2::new(
        p[0] / screen_px[0] * rect.width + rect.x,
        p[1] / screen_px[1] * rect.height + rect.y,
    )
}
