//! Presentation layer: map scene, hover interaction, ASN chart and page

pub mod aggregate;
pub mod chart;
pub mod format;
pub mod hover;
pub mod map;
pub mod page;
pub mod scale;

pub use chart::{render_chart, Chart, ChartConfig};
pub use hover::{HoverController, HoverState, Tooltip};
pub use map::{render_map, MapConfig, MapScene, MarkerStyle};
pub use page::{render_page, PageUrls};
