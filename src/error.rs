use std::fmt;

/// Error type shared by the loader, the dataset exporter and the server
#[derive(Debug)]
pub enum AtlasError {
    /// Dataset could not be fetched (network failure or non-2xx status)
    Fetch(String),
    /// Dataset body is not the expected JSON shape
    Parse(String),
    /// Crawler database error
    Database(String),
    /// MaxMind database error
    GeoIp(String),
    /// Configuration error
    Config(String),
    /// IO error
    Io(std::io::Error),
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::Fetch(msg) => write!(f, "Fetch error: {}", msg),
            AtlasError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AtlasError::Database(msg) => write!(f, "Database error: {}", msg),
            AtlasError::GeoIp(msg) => write!(f, "GeoIP error: {}", msg),
            AtlasError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AtlasError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for AtlasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AtlasError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AtlasError {
    fn from(err: std::io::Error) -> Self {
        AtlasError::Io(err)
    }
}

impl From<serde_json::Error> for AtlasError {
    fn from(err: serde_json::Error) -> Self {
        AtlasError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for AtlasError {
    fn from(err: reqwest::Error) -> Self {
        AtlasError::Fetch(err.to_string())
    }
}

impl From<rusqlite::Error> for AtlasError {
    fn from(err: rusqlite::Error) -> Self {
        AtlasError::Database(err.to_string())
    }
}

impl From<maxminddb::MaxMindDBError> for AtlasError {
    fn from(err: maxminddb::MaxMindDBError) -> Self {
        AtlasError::GeoIp(err.to_string())
    }
}

impl From<toml::de::Error> for AtlasError {
    fn from(err: toml::de::Error) -> Self {
        AtlasError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
