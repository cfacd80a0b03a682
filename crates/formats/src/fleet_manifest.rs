//! Fleet manifest wire format.
//!
//! The manifest is the document shape the external data layer hands over:
//! static sites, mobile assets, and route connectors, all authored in world
//! coordinates. Parsing is lenient where a default is safe (telemetry,
//! status, colors) and strict everywhere else; semantic validation happens
//! in [`crate::ingest`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub id: String,
    pub label: String,
    /// `collection_hub`, `delivery_hub`, or `city`.
    pub category: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    pub name: String,
    /// `vehicle`, `drone`, or `vessel`.
    pub category: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_pct")]
    pub battery_pct: f64,
    #[serde(default = "default_pct")]
    pub signal_pct: f64,
    #[serde(default)]
    pub route: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: String,
    pub from: [f64; 2],
    pub to: [f64; 2],
    #[serde(default = "default_color")]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sites: Vec<SiteRecord>,
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
}

fn default_status() -> String {
    "idle".to_string()
}

fn default_pct() -> f64 {
    100.0
}

fn default_color() -> String {
    "neutral".to_string()
}

#[derive(Debug)]
pub enum ManifestError {
    Json(serde_json::Error),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::Json(e) => write!(f, "manifest json error: {e}"),
        }
    }
}

impl std::error::Error for ManifestError {}

impl FleetManifest {
    pub fn from_json_str(payload: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(payload).map_err(ManifestError::Json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ManifestError> {
        serde_json::to_string_pretty(self).map_err(ManifestError::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::FleetManifest;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_minimal_manifest_with_defaults() {
        let manifest = FleetManifest::from_json_str(
            r#"{
                "sites": [
                    { "id": "C1", "label": "Collection Hub A", "category": "collection_hub", "x": 150, "y": 150 }
                ],
                "assets": [
                    { "id": "DR-4420", "name": "Precision Drone", "category": "drone", "x": 500, "y": 200 }
                ]
            }"#,
        )
        .expect("parse manifest");

        assert_eq!(manifest.name, None);
        assert_eq!(manifest.sites.len(), 1);
        assert_eq!(manifest.routes.len(), 0);

        let asset = &manifest.assets[0];
        assert_eq!(asset.status, "idle");
        assert_eq!(asset.battery_pct, 100.0);
        assert_eq!(asset.signal_pct, 100.0);
        assert_eq!(asset.route, None);
    }

    #[test]
    fn missing_required_fields_fail_to_parse() {
        let result = FleetManifest::from_json_str(
            r#"{ "sites": [ { "id": "C1", "x": 0, "y": 0 } ] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let payload = r#"{
            "name": "demo",
            "sites": [
                { "id": "D1", "label": "Processing Plant", "category": "delivery_hub", "x": 400, "y": 300 }
            ],
            "assets": [],
            "routes": [
                { "id": "R1", "from": [150, 150], "to": [400, 300], "color": "emerald" }
            ]
        }"#;
        let manifest = FleetManifest::from_json_str(payload).expect("parse manifest");
        let encoded = manifest.to_json_pretty().expect("encode manifest");
        let decoded = FleetManifest::from_json_str(&encoded).expect("reparse manifest");
        assert_eq!(manifest, decoded);
    }
}
