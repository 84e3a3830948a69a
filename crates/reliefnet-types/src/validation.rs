use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::NewHelpRequest;

/// Fields a create request must carry, in the order they are checked.
pub const REQUIRED_FIELDS: &[&str] = &[
    "id",
    "victimName",
    "victimPhone",
    "lat",
    "lng",
    "disasterType",
    "createdAt",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Missing required field: {0}")]
    Missing(&'static str),
    #[error("Invalid value for field: {0}")]
    Invalid(&'static str),
    #[error("Field out of range: {0}")]
    OutOfRange(&'static str),
}

impl NewHelpRequest {
    /// Build a request from a create body, reporting the first missing field
    /// by its wire name. `null` counts as missing. Any resolution flag in the
    /// body is ignored.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = body.as_object().ok_or(ValidationError::NotAnObject)?;

        for field in REQUIRED_FIELDS {
            if obj.get(*field).is_none_or(Value::is_null) {
                return Err(ValidationError::Missing(*field));
            }
        }

        let id = required_text(obj, "id")?;
        let name = required_text(obj, "victimName")?;
        let phone = required_text(obj, "victimPhone")?;
        let latitude = coordinate(obj, "lat", 90.0)?;
        let longitude = coordinate(obj, "lng", 180.0)?;
        let disaster_type = required_text(obj, "disasterType")?;
        let timestamp = epoch(obj, "createdAt")?;
        let resource_types = resources(obj)?;
        let description = match obj.get("description") {
            None | Some(Value::Null) => String::new(),
            Some(v) => text(v).ok_or(ValidationError::Invalid("description"))?,
        };

        Ok(Self {
            id,
            name,
            phone,
            resource_types,
            latitude,
            longitude,
            description,
            timestamp,
            disaster_type,
        })
    }
}

/// Strings pass through, numbers are stringified, everything else is rejected.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_text(obj: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    let value = obj
        .get(field)
        .and_then(text)
        .ok_or(ValidationError::Invalid(field))?;
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(value)
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coordinate(obj: &Map<String, Value>, field: &'static str, limit: f64) -> Result<f64, ValidationError> {
    let value = obj
        .get(field)
        .and_then(number)
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::Invalid(field))?;
    if value.abs() > limit {
        return Err(ValidationError::OutOfRange(field));
    }
    Ok(value)
}

fn epoch(obj: &Map<String, Value>, field: &'static str) -> Result<i64, ValidationError> {
    let parsed = match obj.get(field) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or(ValidationError::Invalid(field))
}

/// Blank entries and entries containing the storage delimiter are rejected,
/// so whatever is accepted lists back unchanged.
fn resources(obj: &Map<String, Value>) -> Result<Vec<String>, ValidationError> {
    let items = match obj.get("resources") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ValidationError::Invalid("resources")),
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let resource = text(item).ok_or(ValidationError::Invalid("resources"))?;
        if resource.trim().is_empty() || resource.contains(',') {
            return Err(ValidationError::Invalid("resources"));
        }
        out.push(resource);
    }
    Ok(out)
}
