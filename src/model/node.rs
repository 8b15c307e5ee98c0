use serde::{Deserialize, Serialize};
use std::fmt;

/// Autonomous system identifier as it appears in the dataset.
///
/// Producers have written both the numeric ASN and the operator name, so
/// either JSON kind is accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Asn {
    Number(i64),
    Text(String),
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asn::Number(n) => write!(f, "{}", n),
            Asn::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Asn {
    fn from(s: &str) -> Self {
        Asn::Text(s.to_string())
    }
}

impl From<i64> for Asn {
    fn from(n: i64) -> Self {
        Asn::Number(n)
    }
}

/// Geolocation block of a node record; field names are capitalized on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    #[serde(default)]
    pub accuracy_radius: u16,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub time_zone: String,
}

/// One line of `nodes.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub ip: String,
    pub asn: Asn,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asn_accepts_string_and_number() {
        let records: Vec<NodeRecord> = serde_json::from_str(
            r#"[
                {"ip":"1.1.1.1","asn":"Cloudflare","location":{"Latitude":1.5,"Longitude":2.5}},
                {"ip":"8.8.8.8","asn":15169,"country":"US","location":{"AccuracyRadius":1000,"Latitude":37.75,"Longitude":-97.82,"TimeZone":"America/Chicago"}}
            ]"#,
        )
        .unwrap();

        assert_eq!(records[0].asn, Asn::Text("Cloudflare".to_string()));
        assert_eq!(records[0].location.accuracy_radius, 0);
        assert_eq!(records[1].asn, Asn::Number(15169));
        assert_eq!(records[1].country.as_deref(), Some("US"));
        assert_eq!(records[1].location.time_zone, "America/Chicago");
    }

    #[test]
    fn test_numeric_string_stays_text() {
        let asn: Asn = serde_json::from_str(r#""3320""#).unwrap();
        assert_eq!(asn, Asn::Text("3320".to_string()));
        assert_ne!(asn, Asn::Number(3320));
        assert_eq!(asn.to_string(), "3320");
    }

    #[test]
    fn test_location_serializes_pascal_case() {
        let location = Location {
            accuracy_radius: 20,
            latitude: 52.5,
            longitude: 13.4,
            time_zone: "Europe/Berlin".to_string(),
        };
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["AccuracyRadius"], 20);
        assert_eq!(json["Latitude"], 52.5);
        assert_eq!(json["Longitude"], 13.4);
        assert_eq!(json["TimeZone"], "Europe/Berlin");
    }
}
