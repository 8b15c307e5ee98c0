use serde::{Deserialize, Serialize};

use super::node::Location;

/// Result of looking an address up in the MaxMind City and ASN databases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    pub country_iso: Option<String>,
    pub location: Location,
    pub asn_org: Option<String>,
}

impl GeoRecord {
    pub fn has_location(&self) -> bool {
        self.location.latitude != 0.0 || self.location.longitude != 0.0
    }
}
