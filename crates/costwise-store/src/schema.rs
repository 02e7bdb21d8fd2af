// Storage schema and database management

use crate::error::Result;
use rusqlite::Connection;
use rusqlite_migration::{Migrations, M};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// SQL for the resources table. Statements are idempotent so the direct
/// creation path and the migration path can run against the same file.
const RESOURCES_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS resources (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    resource_type TEXT NOT NULL,
    provider TEXT NOT NULL,
    instance_type TEXT NOT NULL,
    cpu_utilization REAL,
    memory_utilization REAL,
    storage_gb REAL,
    monthly_cost REAL NOT NULL,
    created_at TEXT NOT NULL
)
"#;

const RESOURCES_INDEXES_SQL: &str = r#"
CREATE INDEX IF NOT EXISTS idx_resources_name ON resources(name);
CREATE INDEX IF NOT EXISTS idx_resources_type ON resources(resource_type);
"#;

fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(RESOURCES_TABLE_SQL), M::up(RESOURCES_INDEXES_SQL)])
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Whether to enable WAL mode
    pub wal_enabled: bool,

    /// Cache size in pages
    pub cache_size_pages: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            wal_enabled: true,
            cache_size_pages: Some(2000),
        }
    }
}

/// How [`Storage::ensure_schema`] brought the schema up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutcome {
    /// Versioned migrations ran to the latest version
    Migrated,
    /// Migrations failed; tables were created directly
    FallbackCreated,
}

/// SQLite resource storage
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open storage with default config
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, StorageConfig::default())
    }

    /// Open storage with custom config
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: StorageConfig) -> Result<Self> {
        let conn = Connection::open(path)?;

        if config.wal_enabled {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }

        if let Some(cache_size) = config.cache_size_pages {
            conn.pragma_update(None, "cache_size", cache_size)?;
        }

        Ok(Self { conn })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Bring the schema up to date.
    ///
    /// Runs the versioned migrations first. If they cannot be applied (for
    /// example the file was written by a newer schema version), the tables are
    /// created directly instead.
    pub fn ensure_schema(&mut self) -> Result<SchemaOutcome> {
        match migrations().to_latest(&mut self.conn) {
            Ok(()) => {
                info!("Migrations completed successfully");
                Ok(SchemaOutcome::Migrated)
            }
            Err(e) => {
                warn!("Migration failed, falling back to direct table creation: {}", e);
                self.conn.execute_batch(RESOURCES_TABLE_SQL)?;
                self.conn.execute_batch(RESOURCES_INDEXES_SQL)?;
                Ok(SchemaOutcome::FallbackCreated)
            }
        }
    }

    /// Get the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Get mutable connection
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
