use rusqlite::Connection;
use tracing::info;

use crate::Result;

pub const HELP_REQUESTS_TABLE: &str = "help_requests";

/// Facility categories created empty by setup.
pub const DEFAULT_FACILITY_CATEGORIES: &[&str] = &["police_stations", "hospitals"];

pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS help_requests (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            phone           TEXT NOT NULL,
            resource_type   TEXT,
            latitude        REAL NOT NULL,
            longitude       REAL NOT NULL,
            description     TEXT,
            is_resolved     INTEGER NOT NULL DEFAULT 0,
            timestamp       INTEGER NOT NULL,
            disaster_type   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_help_requests_timestamp
            ON help_requests(timestamp);

        CREATE INDEX IF NOT EXISTS idx_help_requests_resolved
            ON help_requests(is_resolved);
        ",
    )?;

    for category in DEFAULT_FACILITY_CATEGORIES {
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {category} (
                name        TEXT NOT NULL,
                address     TEXT NOT NULL,
                latitude    REAL NOT NULL,
                longitude   REAL NOT NULL
            );"
        ))?;
    }

    info!("Database migrations complete");
    Ok(())
}

/// Sample request for local testing. Never overwrites an existing row.
pub fn seed_fixtures(conn: &Connection) -> Result<()> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO help_requests
            (id, name, phone, resource_type, latitude, longitude, description, timestamp, disaster_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            "test123",
            "Test User",
            "+1234567890",
            "water,food",
            12.9716,
            77.5946,
            "Test request",
            1_234_567_890i64,
            "earthquake",
        ],
    )?;

    info!("Seeded {} fixture request(s)", inserted);
    Ok(())
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
