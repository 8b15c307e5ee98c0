use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{AtlasError, Result};

/// Row of the crawler's `nodes` table
#[derive(Debug, Clone, PartialEq)]
pub struct CrawledNode {
    pub id: String,
    pub ip: String,
    pub client_type: Option<String>,
    pub network_id: Option<i64>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
}

/// Read access to the node crawler's SQLite database
#[derive(Clone)]
pub struct CrawlerDb {
    conn: Arc<Mutex<Connection>>,
}

impl CrawlerDb {
    /// Open an existing crawler database read-only
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        CrawlerDb {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AtlasError::Database("crawler connection poisoned".to_string()))
    }

    pub fn count_nodes(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All crawled nodes in table order
    pub fn get_nodes(&self) -> Result<Vec<CrawledNode>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT ID, IP, ClientType, NetworkID, Country, City, FirstSeen, LastSeen
             FROM nodes
             ORDER BY rowid",
        )?;

        let nodes = stmt
            .query_map([], |row| {
                Ok(CrawledNode {
                    id: row.get(0)?,
                    ip: row.get(1)?,
                    client_type: row.get(2)?,
                    network_id: row.get(3)?,
                    country: row.get(4)?,
                    city: row.get(5)?,
                    first_seen: row.get(6)?,
                    last_seen: row.get(7)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(nodes)
    }
}
