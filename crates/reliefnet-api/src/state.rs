use std::sync::Arc;
use std::time::Duration;

use reliefnet_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Upper bound on a single storage round-trip.
    pub db_timeout: Duration,
}

impl AppStateInner {
    pub fn new(db: Database, db_timeout: Duration) -> AppState {
        Arc::new(Self { db, db_timeout })
    }

    /// Run a blocking store call off the async runtime, bounded by the
    /// storage timeout. A timed-out call is reported, not retried.
    pub async fn run_db<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Database) -> reliefnet_db::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        let task = tokio::task::spawn_blocking(move || f(&db));

        let joined = tokio::time::timeout(self.db_timeout, task)
            .await
            .map_err(|_| ApiError::Timeout(self.db_timeout))?;

        Ok(joined??)
    }
}
