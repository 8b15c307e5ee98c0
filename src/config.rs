//! TOML configuration
//!
//! Every section and field is optional; missing values fall back to the
//! defaults below and command-line flags override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::render::page::check_element_id;
use crate::render::{ChartConfig, MapConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path or http(s) URL of `nodes.json`
    pub nodes: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            nodes: "html/nodes.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub crawler_db: String,
    pub city_db: String,
    pub asn_db: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            crawler_db: "crawler.db".to_string(),
            city_db: "GeoLite2-City.mmdb".to_string(),
            asn_db: "GeoLite2-ASN.mmdb".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub out_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: "html".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Extra directory served under `/static`
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    pub export: ExportConfig,
    pub build: BuildConfig,
    pub server: ServerConfig,
    pub map: MapConfig,
    pub chart: ChartConfig,
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Container ids are written into the page markup and script as-is.
    pub fn validate(&self) -> Result<()> {
        check_element_id("map.container", &self.map.container)?;
        check_element_id("chart.container", &self.chart.container)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AtlasError;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.map.zoom, 7.0);
        assert_eq!(config.chart.bar_height, 25.0);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r##"
            [dataset]
            nodes = "https://example.org/nodes.json"

            [server]
            port = 9000
            static_dir = "public"

            [map]
            zoom = 3.5
            center = [0.0, 20.0]

            [map.marker]
            color = "#ff0000"

            [chart]
            width = 800.0
            thousands_separator = ","
            "##,
        )
        .unwrap();

        assert_eq!(config.dataset.nodes, "https://example.org/nodes.json");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.static_dir.as_deref(), Some("public"));
        assert_eq!(config.map.zoom, 3.5);
        assert_eq!(config.map.center, [0.0, 20.0]);
        assert_eq!(config.map.marker.color, "#ff0000");
        assert_eq!(config.map.marker.radius, 6.0);
        assert_eq!(config.chart.width, 800.0);
        assert_eq!(config.chart.thousands_separator, ',');
        assert_eq!(config.chart.bar_height, 25.0);
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml("[server]\nport = \"many\"").unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));
    }

    #[test]
    fn test_rejects_unsafe_container_ids() {
        let err = AppConfig::from_toml("[map]\ncontainer = \"it's\"").unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));

        let err = AppConfig::from_toml("[chart]\ncontainer = \"\"").unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));

        let config = AppConfig::from_toml("[chart]\ncontainer = \"asn-chart\"").unwrap();
        assert_eq!(config.chart.container, "asn-chart");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.toml");
        std::fs::write(&path, "[build]\nout_dir = \"site\"\n").unwrap();
        assert_eq!(AppConfig::load(&path).unwrap().build.out_dir, "site");
    }
}
