mod feature;
mod geo;
mod node;

pub use feature::{FeatureCollection, FeatureProperties, GeoFeature, Point};
pub use geo::GeoRecord;
pub use node::{Asn, Location, NodeRecord};
