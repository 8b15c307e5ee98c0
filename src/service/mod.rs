pub mod exporter;
pub mod geo_service;
pub mod loader;
pub mod site;

pub use exporter::export_nodes;
pub use geo_service::{GeoLookup, GeoService};
pub use loader::{load_nodes, DatasetSource};
pub use site::write_site;
