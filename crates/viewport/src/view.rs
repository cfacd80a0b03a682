use foundation::math::Vec2;

/// Camera state for a 2D map: zoom factor plus pan offset in screen pixels.
///
/// Mutated only by the interaction controller, which clamps `zoom` on every
/// write; reads never re-clamp because stored state is always valid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    /// Strictly positive magnification. 1.0 shows the whole world extent.
    pub zoom: f64,
    /// Drag offset. Positive x shifts the world right on screen.
    pub pan: Vec2,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}
