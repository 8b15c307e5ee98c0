use crate::error::{AtlasError, Result};
use crate::render::chart::ChartConfig;
use crate::render::format::{escape_xml, js_string};
use crate::render::map::MapConfig;

const PAGE_TEMPLATE: &str = include_str!("../../static/index.html");

/// Where the page script fetches the map scene and the chart fragment from
#[derive(Debug, Clone, PartialEq)]
pub struct PageUrls {
    pub scene: String,
    pub chart: String,
}

impl PageUrls {
    /// Endpoints of the running server
    pub fn api() -> Self {
        Self {
            scene: "/api/v1/map".to_string(),
            chart: "/api/v1/chart.html".to_string(),
        }
    }

    /// Sibling files written by a static build
    pub fn static_files() -> Self {
        Self {
            scene: "map.json".to_string(),
            chart: "chart.html".to_string(),
        }
    }
}

/// Reject element ids that are empty, start with a non-letter or contain
/// anything besides ASCII letters, digits, `-` and `_`.
pub fn check_element_id(name: &str, id: &str) -> Result<()> {
    let mut chars = id.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AtlasError::Config(format!(
            "{} must be a plain element id (letters, digits, '-', '_'), got {:?}",
            name, id
        )))
    }
}

/// HTML page hosting the map and the chart
pub fn render_page(map: &MapConfig, chart: &ChartConfig, urls: &PageUrls) -> String {
    PAGE_TEMPLATE
        .replace("{{title}}", "Node Atlas")
        .replace("{{map_container}}", &escape_xml(&map.container))
        .replace("{{chart_container}}", &escape_xml(&chart.container))
        .replace("{{chart_container_js}}", &js_string(&chart.container))
        .replace("{{scene_url}}", &js_string(&urls.scene))
        .replace("{{chart_url}}", &js_string(&urls.chart))
}
