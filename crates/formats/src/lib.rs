pub mod fleet_manifest;
pub mod ingest;

pub use fleet_manifest::{AssetRecord, FleetManifest, ManifestError, RouteRecord, SiteRecord};
pub use ingest::{
    FleetLoadError, IngestError, ingest_manifest, load_model_from_path, load_model_from_str,
};
