//! Dataset loader
//!
//! Reads `nodes.json` from disk or over HTTP and turns every record into a
//! point feature. The dataset is read exactly once; callers share the result.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::{AtlasError, Result};
use crate::model::{GeoFeature, NodeRecord};

/// Where the dataset lives
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    Path(PathBuf),
    Url(String),
}

impl FromStr for DatasetSource {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AtlasError::Config("dataset source is empty".to_string()));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DatasetSource::Url(s.to_string()))
        } else {
            Ok(DatasetSource::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Path(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => f.write_str(url),
        }
    }
}

/// Load the dataset and map each record into a feature, preserving order
pub async fn load_nodes(source: &DatasetSource) -> Result<Vec<GeoFeature>> {
    info!("Loading nodes from {}", source);

    let body = match source {
        DatasetSource::Path(path) => tokio::fs::read(path).await?,
        DatasetSource::Url(url) => fetch(url).await?,
    };

    let features = parse_nodes(&body)?;
    info!("Loaded {} nodes", features.len());
    Ok(features)
}

async fn fetch(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::get(url).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(AtlasError::Fetch(format!("{} returned HTTP {}", url, status)));
    }
    let bytes = resp.bytes().await?;
    debug!("Fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}

/// Parse a `nodes.json` body into features
pub fn parse_nodes(body: &[u8]) -> Result<Vec<GeoFeature>> {
    let records: Vec<NodeRecord> = serde_json::from_slice(body)?;
    Ok(records.into_iter().map(GeoFeature::from).collect())
}
