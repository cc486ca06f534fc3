//! Service wiring: storage pool, schema, reference data, repository.

use std::sync::Arc;

use anyhow::Context;

use hope_infra::event_repo::{EventRepository, SqliteEventRepository};
use hope_infra::{db, schema, seed};

use crate::config::ApiConfig;

#[derive(Clone)]
pub struct AppServices {
    events: Arc<dyn EventRepository>,
}

impl AppServices {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// Services backed by the in-memory reference dataset.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(seed::fixture_repository()))
    }

    pub fn events(&self) -> &dyn EventRepository {
        self.events.as_ref()
    }
}

/// Connect to SQLite, create the schema and optionally load the reference data.
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let pool = db::connect(&config.database_url, config.max_connections).await?;

    schema::bootstrap(&pool)
        .await
        .context("schema bootstrap failed")?;

    if config.seed_database {
        seed::seed_fixture(&pool)
            .await
            .context("loading reference data failed")?;
    }

    tracing::info!(
        max_connections = config.max_connections,
        query_timeout_ms = config.query_timeout.as_millis() as u64,
        "event store ready"
    );

    let repo = SqliteEventRepository::with_timeout(pool, config.query_timeout);
    Ok(AppServices::new(Arc::new(repo)))
}
