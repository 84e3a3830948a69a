use serde::{Deserialize, Deserializer, Serialize};

use crate::models::HelpRequest;

// -- Help requests --

/// A help request as listed to responders.
///
/// Field names are the ones existing clients already read, which differ from
/// the storage column names (`victimName` is stored as `name`, and so on).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestResponse {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub disaster_type: String,
    pub resources: Vec<String>,
    pub description: String,
    pub victim_name: String,
    pub victim_phone: String,
    pub created_at: i64,
}

impl From<HelpRequest> for HelpRequestResponse {
    fn from(req: HelpRequest) -> Self {
        Self {
            id: req.id,
            lat: req.latitude,
            lng: req.longitude,
            disaster_type: req.disaster_type,
            resources: req.resource_types,
            description: req.description,
            victim_name: req.name,
            victim_phone: req.phone,
            created_at: req.timestamp,
        }
    }
}

/// Body of `PUT /api/requests/{id}`. An absent flag means "mark resolved";
/// an explicit `null` reads as `false`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateResolutionRequest {
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_resolved: Option<bool>,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<bool>::deserialize(deserializer)?.unwrap_or(false)))
}

// -- Generic replies --

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// -- Health --

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".into(),
            database: Some("connected".into()),
            error: None,
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".into(),
            database: None,
            error: Some(error.into()),
        }
    }
}
