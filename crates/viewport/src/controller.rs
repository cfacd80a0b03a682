//! Pointer and wheel interaction for the 2D viewport.
//!
//! Two sequential interaction channels: drag-to-pan and wheel-to-zoom. They
//! mutate disjoint fields of `ViewState`, so a wheel tick during an active
//! drag commutes with the drag's pan updates. No inertia: releasing the
//! pointer ends the gesture and the last applied pan stands.

use foundation::math::Vec2;

use crate::config::ViewportConfig;
use crate::view::ViewState;

/// Drag gesture state.
///
/// `Panning` keeps the gesture anchor (pointer position and pan at
/// pointer-down). Each move recomputes pan from the anchor instead of
/// accumulating deltas, so gaps in event delivery cannot cause drift.
#[derive(Debug, Copy, Clone, PartialEq)]
enum DragState {
    Idle,
    Panning {
        anchor_px: [f64; 2],
        anchor_pan: Vec2,
        /// Latched once the pointer travels beyond the click threshold.
        moved: bool,
    },
}

/// Outcome of a pointer-up or cancel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureEnd {
    /// The pointer stayed within the click threshold: resolve a click at the
    /// released position instead of committing a pan.
    Click { pos_px: [f64; 2] },
    /// A drag ended (or was cancelled); the applied pan stands.
    Pan,
    /// No gesture was active (out-of-order event delivery).
    Ignored,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerController {
    drag: DragState,
}

impl PointerController {
    pub fn new() -> Self {
        Self {
            drag: DragState::Idle,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.drag, DragState::Panning { .. })
    }

    /// Begins a gesture anchored at the pointer position and current pan.
    pub fn pointer_down(&mut self, pos_px: [f64; 2], view: &ViewState) {
        self.drag = DragState::Panning {
            anchor_px: pos_px,
            anchor_pan: view.pan,
            moved: false,
        };
    }

    /// Applies a move to the active gesture.
    ///
    /// Moves arriving in `Idle` (delivered after the matching pointer-up)
    /// are ignored. Until the pointer leaves the click threshold the view is
    /// untouched, so a jittery click does not nudge the map.
    pub fn pointer_move(&mut self, pos_px: [f64; 2], view: &mut ViewState, config: &ViewportConfig) {
        let DragState::Panning {
            anchor_px,
            anchor_pan,
            moved,
        } = self.drag
        else {
            return;
        };

        let delta = Vec2::new(pos_px[0] - anchor_px[0], pos_px[1] - anchor_px[1]);
        let moved = moved || delta.length() > config.click_threshold_px;
        if moved {
            view.pan = anchor_pan + delta;
        }
        self.drag = DragState::Panning {
            anchor_px,
            anchor_pan,
            moved,
        };
    }

    /// Ends the gesture, distinguishing a click from a committed drag.
    pub fn pointer_up(
        &mut self,
        pos_px: [f64; 2],
        view: &mut ViewState,
        config: &ViewportConfig,
    ) -> GestureEnd {
        let DragState::Panning {
            anchor_px,
            anchor_pan,
            moved,
        } = self.drag
        else {
            return GestureEnd::Ignored;
        };
        self.drag = DragState::Idle;

        let delta = Vec2::new(pos_px[0] - anchor_px[0], pos_px[1] - anchor_px[1]);
        if moved || delta.length() > config.click_threshold_px {
            view.pan = anchor_pan + delta;
            GestureEnd::Pan
        } else {
            GestureEnd::Click { pos_px }
        }
    }

    /// Cancels the gesture (pointer leave / pointer cancel).
    ///
    /// Pan already applied stands; there is no rollback and no click.
    pub fn pointer_cancel(&mut self) -> GestureEnd {
        match std::mem::replace(&mut self.drag, DragState::Idle) {
            DragState::Panning { .. } => GestureEnd::Pan,
            DragState::Idle => GestureEnd::Ignored,
        }
    }

    /// Applies one wheel tick; positive delta zooms out.
    ///
    /// Zoom is multiplicative so repeated ticks feel even at both ends of
    /// the range, and every application clamps to the configured bounds.
    /// Works in any drag state: zoom and pan touch disjoint view fields.
    pub fn wheel(&mut self, delta_y: f64, view: &mut ViewState, config: &ViewportConfig) {
        if delta_y == 0.0 {
            return;
        }
        let factor = if delta_y > 0.0 {
            config.zoom_out_factor
        } else {
            config.zoom_in_factor
        };
        view.zoom = (view.zoom * factor).clamp(config.zoom_min, config.zoom_max);
    }
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new()
    }
}
