//! Engine facade for one mounted map.

use foundation::bounds::Rect;
use foundation::math::Vec2;
use layers::LayerRegistry;
use scene::entity::{Entity, EntityId};
use scene::model::FleetModel;
use scene::picking;
use scene::selection::Selection;

use crate::config::ViewportConfig;
use crate::controller::{GestureEnd, PointerController};
use crate::events::{EngineEvent, EventQueue};
use crate::transform;
use crate::view::ViewState;

/// One interactive map instance.
///
/// The engine owns `ViewState`, the layer registry, and the selection
/// exclusively; hosts read them and issue intent calls. The fleet model is
/// owned by the data layer and passed in per call, so wholesale replacement
/// never leaves the engine holding dangling references.
#[derive(Debug, Clone)]
pub struct MapEngine {
    config: ViewportConfig,
    view: ViewState,
    controller: PointerController,
    layers: LayerRegistry,
    selection: Selection,
    events: EventQueue,
}

impl MapEngine {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            view: ViewState::new(),
            controller: PointerController::new(),
            layers: LayerRegistry::new(),
            selection: Selection::new(),
            events: EventQueue::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ViewportConfig::default())
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_panning(&self) -> bool {
        self.controller.is_panning()
    }

    /// The selected entity, resolved against the live model.
    pub fn selected<'m>(&self, model: &'m FleetModel) -> Option<&'m Entity> {
        self.selection.current(model)
    }

    pub fn visible_world_rect(&self) -> Rect {
        transform::visible_world_rect(self.view, self.config.extent)
    }

    pub fn world_to_screen(&self, p: Vec2, screen_px: [f64; 2]) -> [f64; 2] {
        transform::world_to_screen(p, self.view, self.config.extent, screen_px)
    }

    pub fn screen_to_world(&self, p: [f64; 2], screen_px: [f64; 2]) -> Vec2 {
        transform::screen_to_world(p, self.view, self.config.extent, screen_px)
    }

    pub fn pointer_down(&mut self, pos_px: [f64; 2]) {
        self.controller.pointer_down(pos_px, &self.view);
    }

    pub fn pointer_move(&mut self, pos_px: [f64; 2]) {
        let before = self.view;
        self.controller
            .pointer_move(pos_px, &mut self.view, &self.config);
        self.emit_view_change(before);
    }

    /// Ends the gesture. A click resolves to a selection update by
    /// hit-testing against `model` at the current zoom.
    pub fn pointer_up(&mut self, pos_px: [f64; 2], model: &FleetModel, screen_px: [f64; 2]) {
        let before = self.view;
        let end = self
            .controller
            .pointer_up(pos_px, &mut self.view, &self.config);
        self.emit_view_change(before);

        if let GestureEnd::Click { pos_px } = end {
            let world =
                transform::screen_to_world(pos_px, self.view, self.config.extent, screen_px);
            match picking::pick_entity(model, world, self.view.zoom, &self.config.pick_radii) {
                Some(id) => self.select(&id, model),
                None => self.clear_selection(),
            }
        }
    }

    /// Pointer leave / pointer cancel: the gesture ends, applied pan stands.
    pub fn pointer_cancel(&mut self) {
        self.controller.pointer_cancel();
    }

    pub fn wheel(&mut self, delta_y: f64) {
        let before = self.view;
        self.controller.wheel(delta_y, &mut self.view, &self.config);
        self.emit_view_change(before);
    }

    pub fn toggle_layer(&mut self, name: &str) {
        let visible = self.layers.toggle(name);
        self.events.push(EngineEvent::LayerToggled {
            name: name.to_string(),
            visible,
        });
    }

    /// Programmatic selection, e.g. from a roster list beside the map.
    ///
    /// A stale id leaves the previous selection in place and emits nothing.
    pub fn select(&mut self, id: &EntityId, model: &FleetModel) {
        let before = self.selection.id().cloned();
        if self.selection.select(id, model) && before.as_ref() != Some(id) {
            self.emit_selection();
        }
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.emit_selection();
        }
    }

    /// Call after the host replaces the fleet model wholesale; a selection
    /// whose entity vanished is dropped.
    pub fn model_refreshed(&mut self, model: &FleetModel) {
        if self.selection.reconcile(model) {
            self.emit_selection();
        }
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain()
    }

    fn emit_view_change(&mut self, before: ViewState) {
        if self.view != before {
            self.events.push(EngineEvent::ViewChanged { view: self.view });
        }
    }

    fn emit_selection(&mut self) {
        self.events.push(EngineEvent::SelectionChanged {
            selected: self.selection.id().cloned(),
        });
    }
}

impl Default for MapEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::MapEngine;
    use crate::events::EngineEvent;
    use foundation::math::Vec2;
    use scene::entity::{Asset, AssetCategory, AssetStatus, Entity, EntityId, Site, SiteCategory};
    use scene::model::FleetModel;

    const SCREEN: [f64; 2] = [800.0, 600.0];

    fn site(id: &str, x: f64, y: f64) -> Site {
        Site {
            id: EntityId::new(id),
            label: id.to_string(),
            category: SiteCategory::CollectionHub,
            position: Vec2::new(x, y),
        }
    }

    fn asset(id: &str, x: f64, y: f64) -> Asset {
        Asset {
            id: EntityId::new(id),
            name: id.to_string(),
            category: AssetCategory::Drone,
            position: Vec2::new(x, y),
            status: AssetStatus::Active,
            battery_pct: 45.0,
            signal_pct: 98.0,
            route: None,
        }
    }

    fn model() -> FleetModel {
        FleetModel::from_parts(
            vec![site("C1", 150.0, 150.0), site("D1", 400.0, 300.0)],
            vec![asset("DR-4420", 500.0, 200.0)],
            Vec::new(),
        )
        .expect("valid model")
    }

    fn click(engine: &mut MapEngine, pos: [f64; 2], model: &FleetModel) {
        engine.pointer_down(pos);
        engine.pointer_up(pos, model, SCREEN);
    }

    #[test]
    fn drag_gesture_updates_pan_and_emits_once_per_change() {
        let mut engine = MapEngine::with_defaults();
        let m = model();

        engine.pointer_down([100.0, 100.0]);
        engine.pointer_move([150.0, 130.0]);
        engine.pointer_up([150.0, 130.0], &m, SCREEN);

        assert_eq!(engine.view().pan, Vec2::new(50.0, 30.0));
        let events = engine.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], EngineEvent::ViewChanged { .. }));
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn click_on_a_marker_selects_it() {
        let mut engine = MapEngine::with_defaults();
        let m = model();

        click(&mut engine, [150.0, 150.0], &m);

        assert_eq!(engine.selection().id(), Some(&EntityId::new("C1")));
        let events = engine.drain_events();
        assert_eq!(
            events,
            vec![EngineEvent::SelectionChanged {
                selected: Some(EntityId::new("C1"))
            }]
        );
    }

    #[test]
    fn click_at_the_projected_marker_selects_across_zoom_levels() {
        let m = model();
        let target = Vec2::new(400.0, 300.0);

        // Reach both clamp extremes through the wheel, as a host would.
        for ticks in [0, 8, 30] {
            let mut engine = MapEngine::with_defaults();
            for _ in 0..ticks {
                engine.wheel(if ticks == 8 { 1.0 } else { -1.0 });
            }
            let zoom = engine.view().zoom;
            let pos = engine.world_to_screen(target, SCREEN);
            click(&mut engine, pos, &m);
            assert_eq!(
                engine.selection().id(),
                Some(&EntityId::new("D1")),
                "zoom {zoom}"
            );
        }
    }

    #[test]
    fn miss_click_clears_the_selection() {
        let mut engine = MapEngine::with_defaults();
        let m = model();

        click(&mut engine, [150.0, 150.0], &m);
        engine.drain_events();

        click(&mut engine, [700.0, 550.0], &m);
        assert!(engine.selection().is_empty());
        assert_eq!(
            engine.drain_events(),
            vec![EngineEvent::SelectionChanged { selected: None }]
        );
    }

    #[test]
    fn miss_click_with_nothing_selected_emits_nothing() {
        let mut engine = MapEngine::with_defaults();
        let m = model();

        click(&mut engine, [700.0, 550.0], &m);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn wheel_emits_view_change_until_the_clamp_stops_it() {
        let mut engine = MapEngine::with_defaults();

        engine.wheel(-1.0);
        assert_eq!(engine.drain_events().len(), 1);

        // Pin the zoom at the ceiling; further ticks change nothing.
        for _ in 0..50 {
            engine.wheel(-1.0);
        }
        engine.drain_events();
        engine.wheel(-1.0);
        assert!(engine.drain_events().is_empty());
        assert_eq!(engine.view().zoom, engine.config().zoom_max);
    }

    #[test]
    fn selected_resolves_live_telemetry() {
        let mut engine = MapEngine::with_defaults();
        let mut m = model();
        let id = EntityId::new("DR-4420");

        engine.select(&id, &m);
        m.set_asset_position(&id, Vec2::new(510.0, 240.0));

        let Some(Entity::Asset(a)) = engine.selected(&m) else {
            panic!("selection did not resolve");
        };
        assert_eq!(a.position, Vec2::new(510.0, 240.0));
    }

    #[test]
    fn model_refresh_drops_a_vanished_selection() {
        let mut engine = MapEngine::with_defaults();
        let m = model();
        engine.select(&EntityId::new("DR-4420"), &m);
        engine.drain_events();

        let refreshed = FleetModel::from_parts(
            vec![site("C1", 150.0, 150.0)],
            Vec::new(),
            Vec::new(),
        )
        .expect("valid model");
        engine.model_refreshed(&refreshed);

        assert!(engine.selection().is_empty());
        assert_eq!(
            engine.drain_events(),
            vec![EngineEvent::SelectionChanged { selected: None }]
        );

        // A refresh that keeps the entity leaves the selection alone.
        engine.select(&EntityId::new("C1"), &refreshed);
        engine.drain_events();
        engine.model_refreshed(&refreshed);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn stale_programmatic_select_keeps_previous_selection() {
        let mut engine = MapEngine::with_defaults();
        let m = model();
        engine.select(&EntityId::new("C1"), &m);
        engine.drain_events();

        engine.select(&EntityId::new("ghost"), &m);
        assert_eq!(engine.selection().id(), Some(&EntityId::new("C1")));
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn layer_toggle_emits_the_new_visibility() {
        let mut engine = MapEngine::with_defaults();

        engine.toggle_layer("traffic");
        assert!(engine.layers().is_visible("traffic"));
        assert_eq!(
            engine.drain_events(),
            vec![EngineEvent::LayerToggled {
                name: "traffic".to_string(),
                visible: true
            }]
        );
    }
}
