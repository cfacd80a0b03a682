//! Validated ingestion of fleet manifests into a `FleetModel`.
//!
//! Every entity-validity rule is enforced here, at the boundary with the
//! external data layer. Picking and rendering downstream assume a valid
//! model and never re-validate.

use std::fs;
use std::path::{Path, PathBuf};

use foundation::math::Vec2;
use scene::entity::{Asset, AssetCategory, AssetStatus, EntityId, Site, SiteCategory};
use scene::model::{FleetModel, ModelError};
use scene::route::{Route, RouteId};

use crate::fleet_manifest::{AssetRecord, FleetManifest, ManifestError, RouteRecord, SiteRecord};

#[derive(Debug)]
pub enum IngestError {
    UnknownSiteCategory { id: String, category: String },
    UnknownAssetCategory { id: String, category: String },
    UnknownStatus { id: String, status: String },
    NonFiniteCoordinate { id: String },
    TelemetryOutOfRange {
        id: String,
        field: &'static str,
        value: f64,
    },
    Model(ModelError),
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::UnknownSiteCategory { id, category } => {
                write!(f, "site {id}: unknown category {category:?}")
            }
            IngestError::UnknownAssetCategory { id, category } => {
                write!(f, "asset {id}: unknown category {category:?}")
            }
            IngestError::UnknownStatus { id, status } => {
                write!(f, "asset {id}: unknown status {status:?}")
            }
            IngestError::NonFiniteCoordinate { id } => {
                write!(f, "{id}: coordinates must be finite")
            }
            IngestError::TelemetryOutOfRange { id, field, value } => {
                write!(f, "asset {id}: {field} {value} outside 0-100")
            }
            IngestError::Model(e) => write!(f, "model error: {e}"),
        }
    }
}

impl std::error::Error for IngestError {}

#[derive(Debug)]
pub enum FleetLoadError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(ManifestError),
    Ingest(IngestError),
}

impl std::fmt::Display for FleetLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FleetLoadError::Io { path, source } => {
                write!(f, "failed to read manifest {}: {source}", path.display())
            }
            FleetLoadError::Parse(e) => write!(f, "failed to parse manifest: {e}"),
            FleetLoadError::Ingest(e) => write!(f, "invalid manifest: {e}"),
        }
    }
}

impl std::error::Error for FleetLoadError {}

/// Converts a parsed manifest into a validated model.
pub fn ingest_manifest(manifest: &FleetManifest) -> Result<FleetModel, IngestError> {
    let sites = manifest
        .sites
        .iter()
        .map(ingest_site)
        .collect::<Result<Vec<_>, _>>()?;
    let assets = manifest
        .assets
        .iter()
        .map(ingest_asset)
        .collect::<Result<Vec<_>, _>>()?;
    let routes = manifest
        .routes
        .iter()
        .map(ingest_route)
        .collect::<Result<Vec<_>, _>>()?;

    FleetModel::from_parts(sites, assets, routes).map_err(IngestError::Model)
}

pub fn load_model_from_str(payload: &str) -> Result<FleetModel, FleetLoadError> {
    let manifest = FleetManifest::from_json_str(payload).map_err(FleetLoadError::Parse)?;
    ingest_manifest(&manifest).map_err(FleetLoadError::Ingest)
}

pub fn load_model_from_path(path: impl AsRef<Path>) -> Result<FleetModel, FleetLoadError> {
    let path = path.as_ref();
    let payload = fs::read_to_string(path).map_err(|e| FleetLoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_model_from_str(&payload)
}

fn ingest_site(record: &SiteRecord) -> Result<Site, IngestError> {
    let position = finite_point(&record.id, record.x, record.y)?;
    let category = match record.category.as_str() {
        "collection_hub" => SiteCategory::CollectionHub,
        "delivery_hub" => SiteCategory::DeliveryHub,
        "city" => SiteCategory::City,
        other => {
            return Err(IngestError::UnknownSiteCategory {
                id: record.id.clone(),
                category: other.to_string(),
            });
        }
    };

    Ok(Site {
        id: EntityId::new(&record.id),
        label: record.label.clone(),
        category,
        position,
    })
}

fn ingest_asset(record: &AssetRecord) -> Result<Asset, IngestError> {
    let position = finite_point(&record.id, record.x, record.y)?;
    let category = match record.category.as_str() {
        "vehicle" => AssetCategory::Vehicle,
        "drone" => AssetCategory::Drone,
        "vessel" => AssetCategory::Vessel,
        other => {
            return Err(IngestError::UnknownAssetCategory {
                id: record.id.clone(),
                category: other.to_string(),
            });
        }
    };
    let status = match record.status.as_str() {
        "active" => AssetStatus::Active,
        "en_route" => AssetStatus::EnRoute,
        "idle" => AssetStatus::Idle,
        "offline" => AssetStatus::Offline,
        other => {
            return Err(IngestError::UnknownStatus {
                id: record.id.clone(),
                status: other.to_string(),
            });
        }
    };
    let battery_pct = pct_in_range(&record.id, "battery_pct", record.battery_pct)?;
    let signal_pct = pct_in_range(&record.id, "signal_pct", record.signal_pct)?;

    Ok(Asset {
        id: EntityId::new(&record.id),
        name: record.name.clone(),
        category,
        position,
        status,
        battery_pct,
        signal_pct,
        route: record.route.as_deref().map(RouteId::new),
    })
}

fn ingest_route(record: &RouteRecord) -> Result<Route, IngestError> {
    let from = finite_point(&record.id, record.from[0], record.from[1])?;
    let to = finite_point(&record.id, record.to[0], record.to[1])?;
    Ok(Route {
        id: RouteId::new(&record.id),
        from,
        to,
        color_tag: record.color.clone(),
    })
}

fn finite_point(id: &str, x: f64, y: f64) -> Result<Vec2, IngestError> {
    let p = Vec2::new(x, y);
    if !p.is_finite() {
        return Err(IngestError::NonFiniteCoordinate { id: id.to_string() });
    }
    Ok(p)
}

fn pct_in_range(id: &str, field: &'static str, value: f64) -> Result<f64, IngestError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(IngestError::TelemetryOutOfRange {
            id: id.to_string(),
            field,
            value,
        });
    }
    Ok(value)
}
