use serde::{Deserialize, Serialize};

use super::node::{Asn, NodeRecord};

/// Properties carried by every node feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub ip: String,
    pub asn: Asn,
}

/// GeoJSON point geometry, coordinates are `[longitude, latitude]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Point")]
pub struct Point {
    pub coordinates: [f64; 2],
}

/// A node as a GeoJSON point feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct GeoFeature {
    pub properties: FeatureProperties,
    pub geometry: Point,
}

impl GeoFeature {
    pub fn ip(&self) -> &str {
        &self.properties.ip
    }

    pub fn asn(&self) -> &Asn {
        &self.properties.asn
    }

    pub fn longitude(&self) -> f64 {
        self.geometry.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.geometry.coordinates[1]
    }
}

impl From<NodeRecord> for GeoFeature {
    fn from(record: NodeRecord) -> Self {
        // Records store latitude first, map consumers want longitude first.
        let coordinates = [record.location.longitude, record.location.latitude];
        GeoFeature {
            properties: FeatureProperties {
                ip: record.ip,
                asn: record.asn,
            },
            geometry: Point { coordinates },
        }
    }
}

/// GeoJSON feature collection over a borrowed feature slice
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection<'a> {
    pub features: &'a [GeoFeature],
}

impl<'a> FeatureCollection<'a> {
    pub fn new(features: &'a [GeoFeature]) -> Self {
        Self { features }
    }
}
