pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;

pub use error::StoreError;

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Handle to the relief database.
///
/// Holds no connection. Every operation opens its own connection, does one
/// unit of work and drops it before returning, on success and error alike.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the database file and schema if they are missing, optionally
    /// seeding the sample request. Safe to run repeatedly.
    pub fn setup(&self, seed: bool) -> Result<()> {
        self.open(OpenFlags::default(), |conn| {
            // WAL lets the list query read while a create is writing
            conn.pragma_update(None, "journal_mode", "WAL")?;
            migrations::ensure_schema(conn)?;
            if seed {
                migrations::seed_fixtures(conn)?;
            }
            Ok(())
        })?;

        info!("Database ready at {}", self.path.display());
        Ok(())
    }

    /// Run `f` on a fresh connection. The file must already exist; only
    /// [`Database::setup`] creates it.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        self.open(
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            f,
        )
    }

    fn open<F, T>(&self, flags: OpenFlags, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = Connection::open_with_flags(&self.path, flags)?;
        conn.busy_timeout(self.busy_timeout)?;
        debug!("Opened connection to {}", self.path.display());
        f(&conn)
    }
}
