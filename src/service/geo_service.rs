use maxminddb::{geoip2, MaxMindDBError};
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::model::{GeoRecord, Location};

/// Resolves an address to its location and autonomous system
pub trait GeoLookup {
    fn lookup(&self, ip: IpAddr) -> Result<GeoRecord>;
}

/// Lookups backed by local MaxMind City and ASN databases
#[derive(Clone)]
pub struct GeoService {
    city: Arc<maxminddb::Reader<Vec<u8>>>,
    asn: Arc<maxminddb::Reader<Vec<u8>>>,
}

impl GeoService {
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(city_db: P, asn_db: Q) -> Result<Self> {
        let city = maxminddb::Reader::open_readfile(city_db.as_ref())?;
        info!(
            "Opened GeoIP city database {} ({})",
            city_db.as_ref().display(),
            city.metadata.database_type
        );
        let asn = maxminddb::Reader::open_readfile(asn_db.as_ref())?;
        info!(
            "Opened GeoIP ASN database {} ({})",
            asn_db.as_ref().display(),
            asn.metadata.database_type
        );

        Ok(Self {
            city: Arc::new(city),
            asn: Arc::new(asn),
        })
    }
}

impl GeoLookup for GeoService {
    /// Addresses missing from a database yield empty fields, not errors
    fn lookup(&self, ip: IpAddr) -> Result<GeoRecord> {
        let mut record = GeoRecord::default();

        match self.city.lookup::<geoip2::City>(ip) {
            Ok(city) => {
                record.country_iso = city
                    .country
                    .and_then(|c| c.iso_code)
                    .map(|s| s.to_string());
                if let Some(location) = city.location {
                    record.location = Location {
                        accuracy_radius: location.accuracy_radius.unwrap_or(0),
                        latitude: location.latitude.unwrap_or(0.0),
                        longitude: location.longitude.unwrap_or(0.0),
                        time_zone: location.time_zone.unwrap_or_default().to_string(),
                    };
                }
            }
            Err(MaxMindDBError::AddressNotFoundError(_)) => {}
            Err(e) => return Err(e.into()),
        }

        match self.asn.lookup::<geoip2::Asn>(ip) {
            Ok(asn) => {
                record.asn_org = asn
                    .autonomous_system_organization
                    .map(|s| s.to_string());
            }
            Err(MaxMindDBError::AddressNotFoundError(_)) => {}
            Err(e) => return Err(e.into()),
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AtlasError;

    #[test]
    fn test_open_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let result = GeoService::open(dir.path().join("city.mmdb"), dir.path().join("asn.mmdb"));
        assert!(matches!(result.err(), Some(AtlasError::GeoIp(_))));
    }

    #[test]
    fn test_open_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("city.mmdb");
        std::fs::write(&path, b"not a maxmind database").unwrap();
        assert!(GeoService::open(&path, &path).is_err());
    }
}
