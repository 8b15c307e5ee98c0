//! Dataset export
//!
//! Joins the crawler's node list with GeoIP lookups and writes the
//! `nodes.json` array the map and chart are drawn from.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::net::IpAddr;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::dao::{CrawledNode, CrawlerDb};
use crate::metrics::ExportMetrics;
use crate::model::{Asn, NodeRecord};
use crate::service::geo_service::GeoLookup;

/// Turn crawled nodes into dataset records.
///
/// Nodes with an unparseable address or without an ASN entry are skipped.
pub fn build_records<G: GeoLookup>(
    nodes: &[CrawledNode],
    geo: &G,
    metrics: &ExportMetrics,
) -> Result<Vec<NodeRecord>> {
    let mut records = Vec::with_capacity(nodes.len());

    for node in nodes {
        metrics.increment_read();

        let ip: IpAddr = match node.ip.trim().parse() {
            Ok(ip) => ip,
            Err(_) => {
                warn!("Skipping node {}: invalid IP {:?}", node.id, node.ip);
                metrics.increment_invalid_ip();
                continue;
            }
        };

        let geo_record = geo
            .lookup(ip)
            .with_context(|| format!("GeoIP lookup failed for {}", ip))?;

        let Some(asn_org) = geo_record.asn_org.clone() else {
            warn!("Skipping node {}: no ASN record for {}", node.id, ip);
            metrics.increment_missing_asn();
            continue;
        };

        if !geo_record.has_location() {
            debug!("No location for {}", ip);
            metrics.increment_missing_location();
        }

        records.push(NodeRecord {
            ip: node.ip.trim().to_string(),
            asn: Asn::Text(asn_org),
            country: geo_record.country_iso,
            location: geo_record.location,
        });
        metrics.increment_exported();
    }

    Ok(records)
}

/// Write records as a JSON array followed by a newline
pub fn write_records(records: &[NodeRecord], out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = File::create(out_path)
        .with_context(|| format!("Failed to create {}", out_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Export every crawled node to `out_path`, returning the number written
pub fn export_nodes<G: GeoLookup>(
    db: &CrawlerDb,
    geo: &G,
    out_path: &Path,
    metrics: &ExportMetrics,
) -> Result<usize> {
    let total = db.count_nodes().context("Failed to count crawled nodes")?;
    if total == 0 {
        warn!("Crawler database has no nodes, writing an empty dataset");
    }
    let nodes = db.get_nodes().context("Failed to read crawled nodes")?;
    info!("Read {} of {} crawled nodes", nodes.len(), total);

    let records = build_records(&nodes, geo, metrics)?;
    write_records(&records, out_path)?;
    info!("Wrote {} nodes to {}", records.len(), out_path.display());

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::tests::{create_nodes_table, insert_node};
    use crate::error::AtlasError;
    use crate::model::{GeoRecord, Location};
    use crate::service::loader::parse_nodes;
    use rusqlite::Connection;

    /// Fixed answers keyed by the first octet / segment of the address
    struct StubGeo;

    impl GeoLookup for StubGeo {
        fn lookup(&self, ip: IpAddr) -> crate::error::Result<GeoRecord> {
            match ip.to_string().as_str() {
                "1.1.1.1" => Ok(GeoRecord {
                    country_iso: Some("AU".to_string()),
                    location: Location {
                        accuracy_radius: 1000,
                        latitude: -33.494,
                        longitude: 143.2104,
                        time_zone: "Australia/Sydney".to_string(),
                    },
                    asn_org: Some("CLOUDFLARENET".to_string()),
                }),
                "2001:db8::1" => Ok(GeoRecord {
                    asn_org: Some("DOC-NET".to_string()),
                    ..Default::default()
                }),
                "6.6.6.6" => Err(AtlasError::GeoIp("corrupt search tree".to_string())),
                _ => Ok(GeoRecord::default()),
            }
        }
    }

    fn node(id: &str, ip: &str) -> CrawledNode {
        CrawledNode {
            id: id.to_string(),
            ip: ip.to_string(),
            client_type: None,
            network_id: None,
            country: None,
            city: None,
            first_seen: None,
            last_seen: None,
        }
    }

    #[test]
    fn test_build_records_skips_unusable_nodes() {
        let metrics = ExportMetrics::new();
        let nodes = vec![
            node("a", "1.1.1.1"),
            node("b", "not-an-ip"),
            node("c", "192.0.2.1"),
            node("d", "2001:db8::1"),
        ];

        let records = build_records(&nodes, &StubGeo, &metrics).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].asn, Asn::Text("CLOUDFLARENET".to_string()));
        assert_eq!(records[0].country.as_deref(), Some("AU"));
        assert_eq!(records[1].ip, "2001:db8::1");

        assert_eq!(metrics.get_read(), 4);
        assert_eq!(metrics.get_exported(), 2);
        assert_eq!(metrics.get_invalid_ip(), 1);
        assert_eq!(metrics.get_missing_asn(), 1);
        assert_eq!(metrics.get_missing_location(), 1);
        assert_eq!(metrics.get_skipped(), 2);
    }

    #[test]
    fn test_lookup_failure_aborts() {
        let metrics = ExportMetrics::new();
        let err = build_records(&[node("x", "6.6.6.6")], &StubGeo, &metrics).unwrap_err();
        assert!(err.to_string().contains("6.6.6.6"));
    }

    #[test]
    fn test_export_round_trips_through_loader() {
        let conn = Connection::open_in_memory().unwrap();
        create_nodes_table(&conn);
        insert_node(&conn, "a", "1.1.1.1");
        insert_node(&conn, "b", "2001:db8::1");
        let db = CrawlerDb::from_connection(conn);

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("html").join("nodes.json");
        let metrics = ExportMetrics::new();

        let written = export_nodes(&db, &StubGeo, &out, &metrics).unwrap();
        assert_eq!(written, 2);

        let body = std::fs::read(&out).unwrap();
        assert_eq!(body.last(), Some(&b'\n'));

        let raw: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(raw[0]["location"]["Latitude"], -33.494);
        assert_eq!(raw[0]["location"]["TimeZone"], "Australia/Sydney");

        let features = parse_nodes(&body).unwrap();
        assert_eq!(features[0].geometry.coordinates, [143.2104, -33.494]);
        assert_eq!(features[1].asn().to_string(), "DOC-NET");
    }

    #[test]
    fn test_export_empty_database() {
        let conn = Connection::open_in_memory().unwrap();
        create_nodes_table(&conn);
        let db = CrawlerDb::from_connection(conn);

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nodes.json");
        let metrics = ExportMetrics::new();

        assert_eq!(export_nodes(&db, &StubGeo, &out, &metrics).unwrap(), 0);
        assert!(parse_nodes(&std::fs::read(&out).unwrap()).unwrap().is_empty());
        assert_eq!(metrics.get_read(), 0);
    }
}
