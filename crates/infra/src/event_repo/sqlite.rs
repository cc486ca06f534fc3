//! SQLite-backed event repository.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database | `Database` |
//! | PoolClosed | `PoolClosed` |
//! | ColumnDecode / Decode / ColumnNotFound | `Decode` |
//! | Other (I/O, TLS, pool timeout, ...) | `Database` |
//!
//! Each query is additionally bounded by the repository's query timeout, which maps
//! to `StoreError::Timeout`. Dropping the timed-out future returns its connection
//! to the pool.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};
use tracing::instrument;

use hope_core::{Category, CategoryId, Event, EventId, EventStatus, FilterCriteria, UserId};

use super::query::{self, QueryParam, RenderedQuery, SearchQuery};
use super::r#trait::{EventRepository, StoreError};

/// Default upper bound for a single query.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed repository over the `events` / `categories` tables.
///
/// ## Thread Safety
///
/// `SqlitePool` is `Send + Sync` and cheap to clone; connections are acquired per
/// query and released on every exit path, including errors and timeouts.
#[derive(Debug, Clone)]
pub struct SqliteEventRepository {
    pool: SqlitePool,
    query_timeout: Duration,
}

#[derive(Debug, FromRow)]
struct EventRow {
    id: i64,
    name: String,
    image: Option<String>,
    event_date: NaiveDate,
    location: String,
    description: Option<String>,
    ticket_price: f64,
    current_attendees: i64,
    goal_attendees: i64,
    status: i64,
    category_id: Option<i64>,
    organizer_id: Option<i64>,
    category_name: Option<String>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: EventId::from_raw(row.id),
            name: row.name,
            image: row.image,
            date: row.event_date,
            location: row.location,
            description: row.description,
            ticket_price: row.ticket_price,
            current_attendees: row.current_attendees,
            goal_attendees: row.goal_attendees,
            category: row.category_name,
            category_id: row.category_id.map(CategoryId::from_raw),
            organizer_id: row.organizer_id.map(UserId::from_raw),
            status: EventStatus::from_flag(row.status),
        }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_timeout(pool, DEFAULT_QUERY_TIMEOUT)
    }

    pub fn with_timeout(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    #[instrument(skip(self), err)]
    pub async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = self
            .timed(
                "list_categories",
                sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories ORDER BY name")
                    .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Category {
                id: CategoryId::from_raw(r.id),
                name: r.name,
            })
            .collect())
    }

    #[instrument(
        skip(self, criteria),
        fields(clauses = criteria.clauses().len()),
        err
    )]
    pub async fn search(&self, criteria: &FilterCriteria) -> Result<Vec<Event>, StoreError> {
        let rendered = SearchQuery::from_criteria(criteria).render();
        let rows = self.fetch_events("find_events", &rendered).await?;
        tracing::debug!(matched = rows.len(), "event search complete");
        Ok(rows.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, id), fields(event_id = %id), err)]
    pub async fn get(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        let rendered = query::find_by_id(id);
        let mut rows = self.fetch_events("find_event_by_id", &rendered).await?;
        Ok(rows.pop().map(Event::from))
    }

    async fn fetch_events(
        &self,
        operation: &str,
        rendered: &RenderedQuery,
    ) -> Result<Vec<EventRow>, StoreError> {
        let mut q = sqlx::query_as::<_, EventRow>(&rendered.sql);
        for param in &rendered.params {
            q = match param {
                QueryParam::Text(s) => q.bind(s.as_str()),
                QueryParam::Date(d) => q.bind(*d),
                QueryParam::Int(i) => q.bind(*i),
            };
        }
        self.timed(operation, q.fetch_all(&self.pool)).await
    }

    async fn timed<T, F>(&self, operation: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(res) => res.map_err(|e| map_sqlx_error(operation, e)),
            Err(_) => Err(StoreError::Timeout {
                operation: operation.to_string(),
                millis: self.query_timeout.as_millis(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl EventRepository for SqliteEventRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.categories().await
    }

    async fn find_events(&self, criteria: &FilterCriteria) -> Result<Vec<Event>, StoreError> {
        self.search(criteria).await
    }

    async fn find_event_by_id(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        self.get(id).await
    }
}

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::Database {
            operation: operation.to_string(),
            message: db_err.message().to_string(),
        },
        sqlx::Error::PoolClosed => StoreError::PoolClosed(operation.to_string()),
        e @ (sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)) => StoreError::Decode {
            operation: operation.to_string(),
            message: e.to_string(),
        },
        other => StoreError::Database {
            operation: operation.to_string(),
            message: other.to_string(),
        },
    }
}
