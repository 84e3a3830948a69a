//! Database row types, mapped directly from SQLite rows.
//! The storage encoding (comma-joined resources, integer booleans) stays in
//! this crate; reliefnet-types only sees decoded values.

use reliefnet_types::models::HelpRequest;

pub struct HelpRequestRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub resource_type: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub is_resolved: bool,
    pub timestamp: i64,
    pub disaster_type: String,
}

impl From<HelpRequestRow> for HelpRequest {
    fn from(row: HelpRequestRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            resource_types: decode_resources(row.resource_type.as_deref().unwrap_or_default()),
            latitude: row.latitude,
            longitude: row.longitude,
            description: row.description.unwrap_or_default(),
            is_resolved: row.is_resolved,
            timestamp: row.timestamp,
            disaster_type: row.disaster_type,
        }
    }
}

pub fn encode_resources(resources: &[String]) -> String {
    resources.join(",")
}

/// An empty column means no resources, not one empty resource.
pub fn decode_resources(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(',').map(str::to_string).collect()
}

/// Coordinates are kept to 8 fractional digits.
pub fn round_coordinate(value: f64) -> f64 {
    (value * 1e8).round() / 1e8
}
