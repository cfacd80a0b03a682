//! Deterministic point picking over the flat entity list.

use foundation::math::Vec2;
use serde::Deserialize;

use crate::entity::{AssetCategory, Entity, EntityId, SiteCategory};
use crate::model::FleetModel;

/// Per-category pick radii in screen pixels.
///
/// Radii match the visual footprint of each marker class; small markers get a
/// radius larger than their drawn size so they stay clickable.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickRadii {
    pub collection_hub: f64,
    pub delivery_hub: f64,
    pub city: f64,
    pub vehicle: f64,
    pub drone: f64,
    pub vessel: f64,
}

impl Default for PickRadii {
    fn default() -> Self {
        Self {
            collection_hub: 22.0,
            delivery_hub: 22.0,
            city: 18.0,
            vehicle: 16.0,
            drone: 14.0,
            vessel: 16.0,
        }
    }
}

impl PickRadii {
    pub fn for_entity(&self, entity: &Entity) -> f64 {
        match entity {
            Entity::Site(site) => match site.category {
                SiteCategory::CollectionHub => self.collection_hub,
                SiteCategory::DeliveryHub => self.delivery_hub,
                SiteCategory::City => self.city,
            },
            Entity::Asset(asset) => match asset.category {
                AssetCategory::Vehicle => self.vehicle,
                AssetCategory::Drone => self.drone,
                AssetCategory::Vessel => self.vessel,
            },
        }
    }

    /// The largest configured radius, used to pad culling bounds.
    pub fn max(&self) -> f64 {
        [
            self.collection_hub,
            self.delivery_hub,
            self.city,
            self.vehicle,
            self.drone,
            self.vessel,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

/// Resolves a world-space point to the entity under it.
///
/// The per-category radius is authored in screen pixels and divided by `zoom`
/// (a strictly positive multiplier), so the effective screen-space hit area
/// is constant across zoom levels.
///
/// Ordering contract:
/// - Entities are tested in descending render order, so the topmost marker
///   wins on overlap.
/// - The first hit encountered in that order wins; two markers at the same
///   distance resolve deterministically by entity list position.
///
/// An empty model yields `None`.
pub fn pick_entity(
    model: &FleetModel,
    world: Vec2,
    zoom: f64,
    radii: &PickRadii,
) -> Option<EntityId> {
    for entity in model.entities().iter().rev() {
        let radius = radii.for_entity(entity) / zoom;
        if entity.position().distance(world) <= radius {
            return Some(entity.id().clone());
        }
    }
    None
}
