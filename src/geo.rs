//! Boundary dataset - GeoJSON fetch and region extraction.
//!
//! The region map is backed by a remote GeoJSON FeatureCollection of
//! administrative boundaries. Only the per-feature display name survives
//! into this layer; geometry drawing is the host renderer's business.
//! Display names resolve through a property fallback chain, since the
//! datasets in the wild disagree on the key: `NOMBDEP`, then `NAME_1`,
//! then `name`, then [`UNKNOWN_REGION`]. Empty or whitespace-only values
//! fall through the chain the same as missing keys.

use serde::Deserialize;

use crate::error::MapError;

/// Display name for a feature whose properties carry no usable name.
pub const UNKNOWN_REGION: &str = "Unknown region";

// =============================================================================
// GeoJSON Wire Format
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: RegionProperties,
}

/// The subset of feature properties this layer reads. Unknown keys and
/// the geometry are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RegionProperties {
    #[serde(rename = "NOMBDEP")]
    pub nombdep: Option<String>,
    #[serde(rename = "NAME_1")]
    pub name_1: Option<String>,
    pub name: Option<String>,
}

impl RegionProperties {
    /// Resolve the display name through the fallback chain.
    pub fn display_name(&self) -> String {
        pick(&self.nombdep)
            .or_else(|| pick(&self.name_1))
            .or_else(|| pick(&self.name))
            .unwrap_or(UNKNOWN_REGION)
            .to_string()
    }
}

fn pick(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|name| !name.trim().is_empty())
}

// =============================================================================
// Regions
// =============================================================================

/// One selectable region of the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
}

/// Extract the region list from a raw GeoJSON document.
pub fn parse_boundaries(raw: &str) -> Result<Vec<Region>, MapError> {
    let collection: FeatureCollection = serde_json::from_str(raw)?;
    Ok(collection
        .features
        .iter()
        .map(|feature| Region {
            name: feature.properties.display_name(),
        })
        .collect())
}

/// Fetch and parse the boundary dataset. Blocking; called once at map
/// mount.
pub fn fetch_boundaries(url: &str) -> Result<Vec<Region>, MapError> {
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    parse_boundaries(&body)
}

// =============================================================================
// TESTS
// =============================================================================
