use scene::picking::PickRadii;
use serde::Deserialize;

/// Logical world extent, authored once for the whole map.
///
/// All entity and layer geometry lives in this space; viewport changes never
/// mutate it.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldExtent {
    pub width: f64,
    pub height: f64,
}

impl Default for WorldExtent {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Engine construction options.
///
/// The source dashboards ran several map instances with drifting constants;
/// a single engine parametrized here replaces them. Every field has a
/// default and may be overridden per mounted map, in code or from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Lower zoom clamp.
    pub zoom_min: f64,
    /// Upper zoom clamp.
    pub zoom_max: f64,
    /// Multiplier applied per wheel tick toward the map.
    pub zoom_in_factor: f64,
    /// Multiplier applied per wheel tick away from the map.
    pub zoom_out_factor: f64,
    /// Maximum pointer travel in pixels for a down/up pair to count as a
    /// click rather than a drag.
    pub click_threshold_px: f64,
    pub extent: WorldExtent,
    pub pick_radii: PickRadii,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.5,
            zoom_max: 10.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            click_threshold_px: 3.0,
            extent: WorldExtent::default(),
            pick_radii: PickRadii::default(),
        }
    }
}
