//! API data models
//!
//! This module defines the data structures used in API requests and responses.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::model::GeoFeature;
use crate::render::{ChartConfig, MapConfig};

/// Dataset and rendering settings shared by all workers
pub struct AppState {
    pub features: Arc<Vec<GeoFeature>>,
    pub map: MapConfig,
    pub chart: ChartConfig,
    /// Where the dataset was loaded from
    pub source: String,
    /// RFC 3339 time the dataset was loaded
    pub loaded_at: String,
}

impl AppState {
    pub fn new(features: Vec<GeoFeature>, map: MapConfig, chart: ChartConfig, source: String) -> Self {
        Self {
            features: Arc::new(features),
            map,
            chart,
            source,
            loaded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok"
    pub status: String,

    /// Number of nodes loaded
    pub nodes: usize,
}

/// Node count for one ASN
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AsnCount {
    /// ASN as it appears in the dataset
    pub asn: String,

    /// Number of nodes in this ASN
    pub count: usize,

    /// Share of all nodes, in percent
    pub percentage: f64,
}

/// Dataset statistics
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    /// Total number of nodes
    pub total_nodes: usize,

    /// Number of distinct ASNs
    pub total_asns: usize,

    /// Largest ASNs by node count
    pub top_asns: Vec<AsnCount>,

    /// Dataset path or URL
    pub source: String,

    /// When the dataset was loaded
    pub loaded_at: String,

    /// When this response was generated
    pub generated_at: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Error code (optional)
    pub code: Option<String>,
}

/// Query parameters for statistics
///
/// `limit` is kept as raw text so that malformed values are reported through
/// `ErrorResponse` like out-of-range ones.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// Number of top ASNs to return (default: 10, max: 100)
    #[serde(default)]
    #[param(value_type = Option<usize>)]
    #[schema(value_type = Option<usize>)]
    pub limit: Option<String>,
}

impl StatsQuery {
    /// Validated limit
    pub fn limit(&self) -> Result<usize, String> {
        let limit = match self.limit.as_deref() {
            None => 10,
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("Limit must be a number between 1 and 100, got {:?}", raw))?,
        };
        if limit == 0 || limit > 100 {
            return Err("Limit must be between 1 and 100".to_string());
        }
        Ok(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>) -> StatsQuery {
        StatsQuery {
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_stats_limit() {
        assert_eq!(query(None).limit(), Ok(10));
        assert_eq!(query(Some("1")).limit(), Ok(1));
        assert_eq!(query(Some("100")).limit(), Ok(100));
        assert!(query(Some("0")).limit().is_err());
        assert!(query(Some("101")).limit().is_err());
        assert!(query(Some("abc")).limit().unwrap_err().contains("\"abc\""));
        assert!(query(Some("")).limit().is_err());
    }
}
