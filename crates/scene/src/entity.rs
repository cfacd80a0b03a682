use foundation::math::Vec2;

use crate::route::RouteId;

/// Stable entity identifier supplied by the external data source.
///
/// Ids survive wholesale model replacement, which is what makes a stored
/// selection resolvable against a refreshed model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed point-of-interest categories.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SiteCategory {
    CollectionHub,
    DeliveryHub,
    City,
}

impl SiteCategory {
    pub fn name(self) -> &'static str {
        match self {
            SiteCategory::CollectionHub => "collection_hub",
            SiteCategory::DeliveryHub => "delivery_hub",
            SiteCategory::City => "city",
        }
    }
}

/// Mobile asset categories.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Vehicle,
    Drone,
    Vessel,
}

impl AssetCategory {
    pub fn name(self) -> &'static str {
        match self {
            AssetCategory::Vehicle => "vehicle",
            AssetCategory::Drone => "drone",
            AssetCategory::Vessel => "vessel",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AssetStatus {
    Active,
    EnRoute,
    Idle,
    Offline,
}

impl AssetStatus {
    pub fn name(self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::EnRoute => "en_route",
            AssetStatus::Idle => "idle",
            AssetStatus::Offline => "offline",
        }
    }
}

/// Static point of interest: a hub or a labeled city marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub id: EntityId,
    pub label: String,
    pub category: SiteCategory,
    pub position: Vec2,
}

/// Mobile asset with live telemetry.
///
/// Position and telemetry may change over the session; the id never does.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub id: EntityId,
    pub name: String,
    pub category: AssetCategory,
    pub position: Vec2,
    pub status: AssetStatus,
    /// Battery or fuel charge, 0–100.
    pub battery_pct: f64,
    /// Link quality, 0–100.
    pub signal_pct: f64,
    pub route: Option<RouteId>,
}

/// Anything placeable and selectable on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Site(Site),
    Asset(Asset),
}

impl Entity {
    pub fn id(&self) -> &EntityId {
        match self {
            Entity::Site(s) => &s.id,
            Entity::Asset(a) => &a.id,
        }
    }

    pub fn position(&self) -> Vec2 {
        match self {
            Entity::Site(s) => s.position,
            Entity::Asset(a) => a.position,
        }
    }

    /// Human-readable label (site label or asset name).
    pub fn label(&self) -> &str {
        match self {
            Entity::Site(s) => &s.label,
            Entity::Asset(a) => &a.name,
        }
    }
}
