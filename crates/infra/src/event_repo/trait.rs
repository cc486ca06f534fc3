use thiserror::Error;

use hope_core::{Category, Event, EventId, FilterCriteria};

/// Storage-level failure.
///
/// These never reach HTTP callers verbatim; the API logs them and answers with a
/// generic server error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("database error in {operation}: {message}")]
    Database { operation: String, message: String },

    #[error("connection pool closed in {0}")]
    PoolClosed(String),

    #[error("{operation} timed out after {millis} ms")]
    Timeout { operation: String, millis: u128 },

    #[error("failed to decode row in {operation}: {message}")]
    Decode { operation: String, message: String },
}

/// Read-only access to charity events.
///
/// Implementations must only ever return active events from [`find_events`] and
/// [`find_event_by_id`], ordered by date then id.
///
/// [`find_events`]: EventRepository::find_events
/// [`find_event_by_id`]: EventRepository::find_event_by_id
#[async_trait::async_trait]
pub trait EventRepository: Send + Sync {
    /// All categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Active events matching every supplied criterion.
    async fn find_events(&self, criteria: &FilterCriteria) -> Result<Vec<Event>, StoreError>;

    /// A single active event; `Ok(None)` when it does not exist or is suspended.
    async fn find_event_by_id(&self, id: EventId) -> Result<Option<Event>, StoreError>;
}

#[async_trait::async_trait]
impl<R> EventRepository for std::sync::Arc<R>
where
    R: EventRepository + ?Sized,
{
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).list_categories().await
    }

    async fn find_events(&self, criteria: &FilterCriteria) -> Result<Vec<Event>, StoreError> {
        (**self).find_events(criteria).await
    }

    async fn find_event_by_id(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        (**self).find_event_by_id(id).await
    }
}
