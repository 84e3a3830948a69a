use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The `help_requests` table does not exist; setup was never run.
    #[error("Database table not found. Please run setup first.")]
    SchemaNotReady,

    #[error("Request already exists: {0}")]
    Conflict(String),

    /// A facility category exists but has no rows.
    #[error("No facilities registered in category: {0}")]
    NotFound(String),

    #[error("Unknown facility category: {0}")]
    UnknownCategory(String),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl StoreError {
    /// Missing-table failures from any statement mean setup never ran.
    pub(crate) fn classify(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.starts_with("no such table") => {
                Self::SchemaNotReady
            }
            _ => Self::Storage(err),
        }
    }

    pub(crate) fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        )
    }
}
