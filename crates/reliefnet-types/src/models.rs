/// A stored help request.
#[derive(Debug, Clone, PartialEq)]
pub struct HelpRequest {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub resource_types: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub is_resolved: bool,
    pub timestamp: i64,
    pub disaster_type: String,
}

/// A validated help request ready to be inserted.
///
/// New requests always start unresolved, so there is no resolution flag.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHelpRequest {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub resource_types: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub timestamp: i64,
    pub disaster_type: String,
}

/// A fixed-location service point (hospital, police station, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of a nearest-facility lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest {
    pub name: String,
    pub address: String,
    pub distance_km: f64,
}
