use std::sync::Arc;

use sea_orm::{ConnectOptions, Database};

use crate::config::Config;
use crate::repositories::{PgUserStore, UserStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// User storage backend (PostgreSQL in production)
    pub store: Arc<dyn UserStore>,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState backed by a pooled PostgreSQL connection
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(config.db_max_connections)
            .min_connections(config.db_min_connections)
            .sqlx_logging(true);

        let db = Database::connect(opt)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(db));

        Ok(Self { store, config })
    }

    /// Create AppState with a custom store (for testing)
    pub fn with_store(config: Config, store: Arc<dyn UserStore>) -> Self {
        Self { store, config }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),
}
