use serde::Deserialize;

use hope_core::{DomainResult, FilterCriteria};

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /api/events`. Blank values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct EventSearchQuery {
    pub q: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}

impl EventSearchQuery {
    pub fn into_criteria(self) -> DomainResult<FilterCriteria> {
        FilterCriteria::from_raw(
            self.q.as_deref(),
            self.date.as_deref(),
            self.location.as_deref(),
            self.category.as_deref(),
        )
    }
}
