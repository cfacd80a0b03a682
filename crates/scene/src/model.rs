use foundation::math::Vec2;

use crate::entity::{Asset, AssetStatus, Entity, EntityId, Site};
use crate::route::{Route, RouteId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    DuplicateEntityId(EntityId),
    DuplicateRouteId(RouteId),
    DanglingRoute { asset: EntityId, route: RouteId },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::DuplicateEntityId(id) => write!(f, "duplicate entity id: {id}"),
            ModelError::DuplicateRouteId(id) => write!(f, "duplicate route id: {id}"),
            ModelError::DanglingRoute { asset, route } => {
                write!(f, "asset {asset} references unknown route {route}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// Flat entity store for one map, sized for tens to low hundreds of entries.
///
/// Ordering contract:
/// - `entities()` yields render order: sites first, then assets, each in the
///   order supplied by the data source. Later entries draw above earlier ones.
///
/// The model is owned by the external data layer. The engine reads it per
/// call and never retains references into it, so the host may replace it
/// wholesale between renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetModel {
    entities: Vec<Entity>,
    routes: Vec<Route>,
}

impl FleetModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model from source data, enforcing id uniqueness across all
    /// entities and resolvability of asset route references.
    pub fn from_parts(
        sites: Vec<Site>,
        assets: Vec<Asset>,
        routes: Vec<Route>,
    ) -> Result<Self, ModelError> {
        let mut route_ids: Vec<&RouteId> = Vec::with_capacity(routes.len());
        for route in &routes {
            if route_ids.contains(&&route.id) {
                return Err(ModelError::DuplicateRouteId(route.id.clone()));
            }
            route_ids.push(&route.id);
        }

        let mut seen: Vec<&EntityId> = Vec::with_capacity(sites.len() + assets.len());
        for id in sites.iter().map(|s| &s.id).chain(assets.iter().map(|a| &a.id)) {
            if seen.contains(&id) {
                return Err(ModelError::DuplicateEntityId(id.clone()));
            }
            seen.push(id);
        }

        for asset in &assets {
            if let Some(route) = &asset.route
                && !route_ids.contains(&route)
            {
                return Err(ModelError::DanglingRoute {
                    asset: asset.id.clone(),
                    route: route.clone(),
                });
            }
        }

        let mut entities: Vec<Entity> = Vec::with_capacity(sites.len() + assets.len());
        entities.extend(sites.into_iter().map(Entity::Site));
        entities.extend(assets.into_iter().map(Entity::Asset));

        Ok(Self { entities, routes })
    }

    /// Entities in render order (back to front).
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| &r.id == id)
    }

    /// Moves an asset; returns `false` if `id` is absent or names a site.
    pub fn set_asset_position(&mut self, id: &EntityId, position: Vec2) -> bool {
        self.with_asset(id, |asset| asset.position = position)
    }

    pub fn set_asset_status(&mut self, id: &EntityId, status: AssetStatus) -> bool {
        self.with_asset(id, |asset| asset.status = status)
    }

    pub fn set_asset_telemetry(&mut self, id: &EntityId, battery_pct: f64, signal_pct: f64) -> bool {
        self.with_asset(id, |asset| {
            asset.battery_pct = battery_pct;
            asset.signal_pct = signal_pct;
        })
    }

    fn with_asset(&mut self, id: &EntityId, apply: impl FnOnce(&mut Asset)) -> bool {
        for entity in &mut self.entities {
            if let Entity::Asset(asset) = entity
                && &asset.id == id
            {
                apply(asset);
                return true;
            }
        }
        false
    }
}
