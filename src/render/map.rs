//! Map scene
//!
//! Describes the basemap, the node source and the marker layer in the
//! MapLibre style vocabulary. The page script hands the scene to the map
//! widget unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::model::{Asn, GeoFeature, Point};
use crate::render::hover::{tooltip_text, Cursor};

pub const BASEMAP_SOURCE_ID: &str = "raster-tiles";
pub const BASEMAP_LAYER_ID: &str = "simple-tiles";
pub const NODE_SOURCE_ID: &str = "nodes";
pub const NODE_LAYER_ID: &str = "nodes";

/// Circle marker paint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub color: String,
    pub radius: f64,
    pub stroke_width: f64,
    pub stroke_color: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: "#552cb7".to_string(),
            radius: 6.0,
            stroke_width: 1.0,
            stroke_color: "#ffffff".to_string(),
        }
    }
}

/// Basemap and viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Id of the element the map is mounted in
    pub container: String,
    /// Raster tile URL templates with `{z}/{x}/{y}` placeholders
    pub tiles: Vec<String>,
    pub tile_size: u32,
    pub attribution: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Initial center as `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub marker: MarkerStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container: "map".to_string(),
            tiles: vec!["https://tile.openstreetmap.de/{z}/{x}/{y}.png".to_string()],
            tile_size: 256,
            attribution: "OSM".to_string(),
            min_zoom: 0,
            max_zoom: 22,
            center: [13.526712926907999, 52.45714286038891],
            zoom: 7.0,
            marker: MarkerStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RasterSource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub tiles: Vec<String>,
    #[serde(rename = "tileSize")]
    pub tile_size: u32,
    pub attribution: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RasterLayer {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub source: &'static str,
    pub minzoom: u8,
    pub maxzoom: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct BasemapStyle {
    pub version: u8,
    pub sources: BTreeMap<&'static str, RasterSource>,
    pub layers: Vec<RasterLayer>,
}

/// Marker properties; `tooltip` is the text shown while hovering
#[derive(Debug, Serialize)]
pub struct MarkerProperties<'a> {
    pub ip: &'a str,
    pub asn: &'a Asn,
    pub tooltip: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Marker<'a> {
    pub properties: MarkerProperties<'a>,
    pub geometry: &'a Point,
}

impl<'a> From<&'a GeoFeature> for Marker<'a> {
    fn from(feature: &'a GeoFeature) -> Self {
        Marker {
            properties: MarkerProperties {
                ip: feature.ip(),
                asn: feature.asn(),
                tooltip: tooltip_text(feature),
            },
            geometry: &feature.geometry,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct MarkerCollection<'a> {
    pub features: Vec<Marker<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GeoJsonSource<'a> {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: MarkerCollection<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CirclePaint {
    #[serde(rename = "circle-color")]
    pub color: String,
    #[serde(rename = "circle-radius")]
    pub radius: f64,
    #[serde(rename = "circle-stroke-width")]
    pub stroke_width: f64,
    #[serde(rename = "circle-stroke-color")]
    pub stroke_color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CircleLayer {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub source: &'static str,
    pub paint: CirclePaint,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupOptions {
    pub close_button: bool,
    pub close_on_click: bool,
}

/// Canvas cursor while hovering a marker and while idle
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CursorStyle {
    pub hover: &'static str,
    pub idle: &'static str,
}

/// Everything the map widget needs to draw the nodes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapScene<'a> {
    pub container: String,
    pub style: BasemapStyle,
    pub center: [f64; 2],
    pub zoom: f64,
    pub node_source: GeoJsonSource<'a>,
    pub node_layer: CircleLayer,
    pub popup: PopupOptions,
    pub cursor: CursorStyle,
}

/// Build the map scene for `features`
pub fn render_map<'a>(features: &'a [GeoFeature], config: &MapConfig) -> MapScene<'a> {
    debug!("Building map scene with {} markers", features.len());

    let mut sources = BTreeMap::new();
    sources.insert(
        BASEMAP_SOURCE_ID,
        RasterSource {
            kind: "raster",
            tiles: config.tiles.clone(),
            tile_size: config.tile_size,
            attribution: config.attribution.clone(),
        },
    );

    MapScene {
        container: config.container.clone(),
        style: BasemapStyle {
            version: 8,
            sources,
            layers: vec![RasterLayer {
                id: BASEMAP_LAYER_ID,
                kind: "raster",
                source: BASEMAP_SOURCE_ID,
                minzoom: config.min_zoom,
                maxzoom: config.max_zoom,
            }],
        },
        center: config.center,
        zoom: config.zoom,
        node_source: GeoJsonSource {
            id: NODE_SOURCE_ID,
            kind: "geojson",
            data: MarkerCollection {
                features: features.iter().map(Marker::from).collect(),
            },
        },
        node_layer: CircleLayer {
            id: NODE_LAYER_ID,
            kind: "circle",
            source: NODE_SOURCE_ID,
            paint: CirclePaint {
                color: config.marker.color.clone(),
                radius: config.marker.radius,
                stroke_width: config.marker.stroke_width,
                stroke_color: config.marker.stroke_color.clone(),
            },
        },
        popup: PopupOptions {
            close_button: false,
            close_on_click: false,
        },
        cursor: CursorStyle {
            hover: Cursor::Pointer.css(),
            idle: Cursor::Default.css(),
        },
    }
}
