//! Renderer input contract.
//!
//! Everything the drawing side needs for one frame, projected to device
//! pixels and culled to the visible world. The drawing technology is a host
//! choice; this module has no opinion beyond the data.

use foundation::bounds::Rect;
use foundation::math::Vec2;
use scene::entity::Entity;
use scene::model::FleetModel;
use serde::Serialize;

use crate::engine::MapEngine;
use crate::transform;

/// A marker ready to draw, in device pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub label: String,
    /// `"site"` or `"asset"`.
    pub kind: &'static str,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_pct: Option<f64>,
    pub pos_px: [f64; 2],
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLine {
    pub id: String,
    pub from_px: [f64; 2],
    pub to_px: [f64; 2],
    pub color_tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub zoom: f64,
    pub pan: [f64; 2],
    /// Visible world rectangle as `[x, y, width, height]`.
    pub visible_world: [f64; 4],
    /// Visible base layers, back to front.
    pub layers: Vec<&'static str>,
    /// Route connectors drawn under the markers, in supply order.
    pub routes: Vec<RouteLine>,
    /// Markers in draw order (sites below assets). Matches the picking
    /// contract: what draws on top picks first.
    pub markers: Vec<Marker>,
}

impl RenderSnapshot {
    /// Composes one frame's renderer input.
    ///
    /// Markers are culled against the visible world rect padded by the
    /// largest pick radius at the current zoom, so partially visible markers
    /// still draw. Routes are kept when their segment's bounding box touches
    /// the padded rect.
    pub fn compose(engine: &MapEngine, model: &FleetModel, screen_px: [f64; 2]) -> Self {
        let view = engine.view();
        let config = engine.config();
        let rect = engine.visible_world_rect();
        let padded = rect.inflate(config.pick_radii.max() / view.zoom);

        let project =
            |p: Vec2| transform::world_to_screen(p, view, config.extent, screen_px);

        let layers = engine
            .layers()
            .render_order()
            .into_iter()
            .map(|layer| layer.name())
            .collect();

        let mut routes = Vec::new();
        for route in model.routes() {
            if padded.intersects(&segment_bounds(route.from, route.to)) {
                routes.push(RouteLine {
                    id: route.id.to_string(),
                    from_px: project(route.from),
                    to_px: project(route.to),
                    color_tag: route.color_tag.clone(),
                });
            }
        }

        let mut markers = Vec::new();
        for entity in model.entities() {
            if !padded.contains(entity.position()) {
                continue;
            }
            let selected = engine
                .selection()
                .id()
                .is_some_and(|id| id == entity.id());
            let pos_px = project(entity.position());
            markers.push(match entity {
                Entity::Site(site) => Marker {
                    id: site.id.to_string(),
                    label: site.label.clone(),
                    kind: "site",
                    category: site.category.name(),
                    status: None,
                    battery_pct: None,
                    signal_pct: None,
                    pos_px,
                    selected,
                },
                Entity::Asset(asset) => Marker {
                    id: asset.id.to_string(),
                    label: asset.name.clone(),
                    kind: "asset",
                    category: asset.category.name(),
                    status: Some(asset.status.name()),
                    battery_pct: Some(asset.battery_pct),
                    signal_pct: Some(asset.signal_pct),
                    pos_px,
                    selected,
                },
            });
        }

        Self {
            zoom: view.zoom,
            pan: [view.pan.x, view.pan.y],
            visible_world: [rect.x, rect.y, rect.width, rect.height],
            layers,
            routes,
            markers,
        }
    }
}

fn segment_bounds(a: Vec2, b: Vec2) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    Rect::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
}

#[cfg(test)]
mod tests {
    use super::RenderSnapshot;
    use crate::engine::MapEngine;
    use foundation::math::Vec2;
    use scene::entity::{Asset, AssetCategory, AssetStatus, EntityId, Site, SiteCategory};
    use scene::model::FleetModel;
    use scene::route::{Route, RouteId};

    const SCREEN: [f64; 2] = [800.0, 600.0];

    fn model() -> FleetModel {
        FleetModel::from_parts(
            vec![
                Site {
                    id: EntityId::new("C1"),
                    label: "Collection Hub A".to_string(),
                    category: SiteCategory::CollectionHub,
                    position: Vec2::new(400.0, 300.0),
                },
                Site {
                    id: EntityId::new("C2"),
                    label: "Collection Hub B".to_string(),
                    category: SiteCategory::CollectionHub,
                    position: Vec2::new(40.0, 40.0),
                },
            ],
            vec![Asset {
                id: EntityId::new("DR-1"),
                name: "Survey Drone".to_string(),
                category: AssetCategory::Drone,
                position: Vec2::new(420.0, 280.0),
                status: AssetStatus::EnRoute,
                battery_pct: 98.0,
                signal_pct: 88.0,
                route: Some(RouteId::new("R1")),
            }],
            vec![
                Route {
                    id: RouteId::new("R1"),
                    from: Vec2::new(400.0, 300.0),
                    to: Vec2::new(40.0, 40.0),
                    color_tag: "emerald".to_string(),
                },
                Route {
                    id: RouteId::new("R2"),
                    from: Vec2::new(10.0, 10.0),
                    to: Vec2::new(60.0, 80.0),
                    color_tag: "amber".to_string(),
                },
            ],
        )
        .expect("valid model")
    }

    #[test]
    fn full_extent_view_includes_everything_in_draw_order() {
        let engine = MapEngine::with_defaults();
        let snap = RenderSnapshot::compose(&engine, &model(), SCREEN);

        assert_eq!(snap.zoom, 1.0);
        assert_eq!(snap.visible_world, [0.0, 0.0, 800.0, 600.0]);
        assert_eq!(snap.layers, vec!["land", "countries", "roads", "cities"]);

        let ids: Vec<&str> = snap.markers.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C2", "DR-1"]);
        assert_eq!(snap.routes.len(), 2);

        // Identity surface: world coordinates carry through as pixels.
        assert_eq!(snap.markers[0].pos_px, [400.0, 300.0]);
    }

    #[test]
    fn zoomed_view_culls_offscreen_markers_and_routes() {
        let mut engine = MapEngine::with_defaults();
        for _ in 0..8 {
            engine.wheel(-1.0);
        }
        // zoom 1.1^8 ~ 2.14: visible world is roughly (213,160)..(587,440).
        let snap = RenderSnapshot::compose(&engine, &model(), SCREEN);

        let ids: Vec<&str> = snap.markers.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "DR-1"]);

        let route_ids: Vec<&str> = snap.routes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(route_ids, vec!["R1"]);
    }

    #[test]
    fn selection_is_flagged_on_the_matching_marker() {
        let mut engine = MapEngine::with_defaults();
        let m = model();
        engine.select(&EntityId::new("DR-1"), &m);

        let snap = RenderSnapshot::compose(&engine, &m, SCREEN);
        let flags: Vec<(&str, bool)> = snap
            .markers
            .iter()
            .map(|marker| (marker.id.as_str(), marker.selected))
            .collect();
        assert_eq!(flags, vec![("C1", false), ("C2", false), ("DR-1", true)]);
    }

    #[test]
    fn asset_markers_carry_telemetry_and_sites_do_not() {
        let engine = MapEngine::with_defaults();
        let snap = RenderSnapshot::compose(&engine, &model(), SCREEN);

        let site = &snap.markers[0];
        assert_eq!(site.kind, "site");
        assert_eq!(site.status, None);
        assert_eq!(site.battery_pct, None);

        let asset = snap.markers.last().expect("asset marker");
        assert_eq!(asset.kind, "asset");
        assert_eq!(asset.status, Some("en_route"));
        assert_eq!(asset.battery_pct, Some(98.0));
        assert_eq!(asset.signal_pct, Some(88.0));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let engine = MapEngine::with_defaults();
        let snap = RenderSnapshot::compose(&engine, &model(), SCREEN);
        let json = serde_json::to_string(&snap).expect("serialize snapshot");
        assert!(json.contains("\"visible_world\""));
        assert!(json.contains("\"Collection Hub A\""));
    }
}
