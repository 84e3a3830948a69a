use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use reliefnet_types::models::{Facility, HelpRequest, NewHelpRequest, Nearest};

use crate::migrations::{HELP_REQUESTS_TABLE, table_exists};
use crate::models::{HelpRequestRow, encode_resources, round_coordinate};
use crate::{Database, Result, StoreError};

impl Database {
    // -- Help requests --

    /// Unresolved requests, most recent first.
    pub fn list_unresolved(&self) -> Result<Vec<HelpRequest>> {
        self.with_conn(query_unresolved)
    }

    /// Insert a new request. It always starts unresolved.
    pub fn create(&self, req: &NewHelpRequest) -> Result<()> {
        self.with_conn(|conn| {
            if !table_exists(conn, HELP_REQUESTS_TABLE)? {
                return Err(StoreError::SchemaNotReady);
            }

            let existing: Option<String> = conn
                .query_row(
                    "SELECT id FROM help_requests WHERE id = ?1",
                    [&req.id],
                    |row| row.get(0),
                )
                .optional()?;
            if existing.is_some() {
                return Err(StoreError::Conflict(req.id.clone()));
            }

            conn.execute(
                "INSERT INTO help_requests
                    (id, name, phone, resource_type, latitude, longitude, description, is_resolved, timestamp, disaster_type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9)",
                rusqlite::params![
                    req.id,
                    req.name,
                    req.phone,
                    encode_resources(&req.resource_types),
                    round_coordinate(req.latitude),
                    round_coordinate(req.longitude),
                    req.description,
                    req.timestamp,
                    req.disaster_type,
                ],
            )
            .map_err(|e| {
                // Another writer got the same id in between the check and the insert
                if StoreError::is_primary_key_violation(&e) {
                    StoreError::Conflict(req.id.clone())
                } else {
                    StoreError::classify(e)
                }
            })?;

            debug!("Created help request {}", req.id);
            Ok(())
        })
    }

    /// Set the resolution flag; `None` means resolved.
    ///
    /// An unknown id is not an error: nothing is updated and the returned row
    /// count is 0.
    pub fn update_resolution(&self, id: &str, is_resolved: Option<bool>) -> Result<usize> {
        let is_resolved = is_resolved.unwrap_or(true);
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE help_requests SET is_resolved = ?1 WHERE id = ?2",
                rusqlite::params![is_resolved, id],
            )
            .map_err(StoreError::classify)
        })
    }

    /// Permanently remove a request. Deleting an unknown id succeeds.
    pub fn delete(&self, id: &str) -> Result<usize> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM help_requests WHERE id = ?1", [id])
                .map_err(StoreError::classify)
        })
    }

    /// Round-trip a trivial query. Does not look at the schema.
    pub fn health_check(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
    }

    // -- Facilities --

    pub fn list_facilities(&self, category: &str) -> Result<Vec<Facility>> {
        if !is_identifier(category) {
            return Err(StoreError::UnknownCategory(category.to_string()));
        }

        self.with_conn(|conn| {
            if !table_exists(conn, category)? {
                return Err(StoreError::UnknownCategory(category.to_string()));
            }
            query_facilities(conn, category)
        })
    }

    /// Nearest facility in `category` to the given point.
    pub fn find_nearest_facility(
        &self,
        category: &str,
        user_lat: f64,
        user_lon: f64,
    ) -> Result<Nearest> {
        let facilities = self.list_facilities(category)?;
        reliefnet_geo::find_nearest(&facilities, user_lat, user_lon)
            .ok_or_else(|| StoreError::NotFound(category.to_string()))
    }
}

fn query_unresolved(conn: &Connection) -> Result<Vec<HelpRequest>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, phone, resource_type, latitude, longitude, description, is_resolved, timestamp, disaster_type
             FROM help_requests
             WHERE is_resolved = 0
             ORDER BY timestamp DESC",
        )
        .map_err(StoreError::classify)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(HelpRequestRow {
                id: row.get(0)?,
                name: row.get(1)?,
                phone: row.get(2)?,
                resource_type: row.get(3)?,
                latitude: row.get(4)?,
                longitude: row.get(5)?,
                description: row.get(6)?,
                is_resolved: row.get(7)?,
                timestamp: row.get(8)?,
                disaster_type: row.get(9)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows.into_iter().map(HelpRequest::from).collect())
}

fn query_facilities(conn: &Connection, table: &str) -> Result<Vec<Facility>> {
    // `table` has been checked against sqlite_master and is a bare identifier
    let mut stmt = conn.prepare(&format!(
        "SELECT name, address, latitude, longitude FROM {table}"
    ))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(Facility {
                name: row.get(0)?,
                address: row.get(1)?,
                latitude: row.get(2)?,
                longitude: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
