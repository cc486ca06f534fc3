use std::sync::RwLock;

use hope_core::{Category, Entity, Event, EventId, FilterCriteria};

use super::r#trait::{EventRepository, StoreError};

/// In-memory repository for tests/dev.
///
/// Evaluates [`FilterCriteria::matches`] directly, which makes it the reference
/// behaviour the SQL repository is checked against.
#[derive(Debug)]
pub struct InMemoryEventRepository {
    categories: RwLock<Vec<Category>>,
    events: RwLock<Vec<Event>>,
}

impl InMemoryEventRepository {
    pub fn with_data(categories: Vec<Category>, events: Vec<Event>) -> Self {
        Self {
            categories: RwLock::new(categories),
            events: RwLock::new(events),
        }
    }
}

fn poisoned(operation: &str) -> StoreError {
    StoreError::Database {
        operation: operation.to_string(),
        message: "lock poisoned".to_string(),
    }
}

#[async_trait::async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories = self
            .categories
            .read()
            .map_err(|_| poisoned("list_categories"))?
            .clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_events(&self, criteria: &FilterCriteria) -> Result<Vec<Event>, StoreError> {
        let events = self.events.read().map_err(|_| poisoned("find_events"))?;
        let mut matched: Vec<Event> = events
            .iter()
            .filter(|e| criteria.matches(e))
            .cloned()
            .collect();
        matched.sort_by_key(|e| (e.date, e.id()));
        Ok(matched)
    }

    async fn find_event_by_id(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        let events = self.events.read().map_err(|_| poisoned("find_event_by_id"))?;
        Ok(events
            .iter()
            .find(|e| e.id() == id && e.is_active())
            .cloned())
    }
}
