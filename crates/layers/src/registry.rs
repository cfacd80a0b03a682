use std::collections::HashMap;

/// The closed set of base-map layers, composited back to front.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BaseLayer {
    Land,
    Countries,
    Roads,
    Cities,
    Traffic,
    Transit,
    Bicycling,
}

impl BaseLayer {
    /// Draw order, back to front.
    pub const DRAW_ORDER: [BaseLayer; 7] = [
        BaseLayer::Land,
        BaseLayer::Countries,
        BaseLayer::Roads,
        BaseLayer::Cities,
        BaseLayer::Traffic,
        BaseLayer::Transit,
        BaseLayer::Bicycling,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BaseLayer::Land => "land",
            BaseLayer::Countries => "countries",
            BaseLayer::Roads => "roads",
            BaseLayer::Cities => "cities",
            BaseLayer::Traffic => "traffic",
            BaseLayer::Transit => "transit",
            BaseLayer::Bicycling => "bicycling",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::DRAW_ORDER.into_iter().find(|l| l.name() == name)
    }

    /// Whether the layer renders on a freshly created registry.
    ///
    /// The structural layers are on by default; the live overlays are
    /// opt-in.
    pub fn default_visible(self) -> bool {
        match self {
            BaseLayer::Land | BaseLayer::Countries | BaseLayer::Roads | BaseLayer::Cities => true,
            BaseLayer::Traffic | BaseLayer::Transit | BaseLayer::Bicycling => false,
        }
    }
}

/// Boolean visibility registry over the base layers.
///
/// Toggles are keyed by name so the host UI can wire controls without
/// enumerating the layer set. Unknown names are tolerated: they toggle into
/// the map harmlessly but are never part of `render_order`, so they cannot
/// render.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRegistry {
    visibility: HashMap<String, bool>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        let visibility = BaseLayer::DRAW_ORDER
            .into_iter()
            .map(|layer| (layer.name().to_string(), layer.default_visible()))
            .collect();
        Self { visibility }
    }

    /// Flips exactly the named key, leaving every other layer untouched.
    pub fn toggle(&mut self, name: &str) -> bool {
        let flag = self.visibility.entry(name.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) {
        self.visibility.insert(name.to_string(), visible);
    }

    /// Visibility of the named layer, `false` for names never toggled on.
    pub fn is_visible(&self, name: &str) -> bool {
        self.visibility.get(name).copied().unwrap_or(false)
    }

    /// Visible base layers in draw order. The render set for a frame.
    pub fn render_order(&self) -> Vec<BaseLayer> {
        BaseLayer::DRAW_ORDER
            .into_iter()
            .filter(|layer| self.is_visible(layer.name()))
            .collect()
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
