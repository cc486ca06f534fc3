//! Search-page filter state as an immutable reducer.
//!
//! The search page keeps one [`FilterState`] snapshot. UI interactions are expressed as
//! [`FilterAction`]s and [`FilterState::apply`] returns the next snapshot, so the whole
//! accumulator can be exercised without a DOM.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::filter::{DATE_FORMAT, FilterCriteria};

/// Snapshot of the search page's active filters and keyword box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub keyword: Option<String>,
}

/// Quick date buttons on the search page, relative to the caller's current day.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DatePreset {
    Today,
    Tomorrow,
}

impl DatePreset {
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            DatePreset::Today => today,
            DatePreset::Tomorrow => today.checked_add_days(Days::new(1)).unwrap_or(today),
        }
    }
}

/// A user interaction on the search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Category button; `None` is the "All" button.
    SetCategory(Option<String>),
    /// Date preset or date picker; `None` is "Any Date".
    SetDate(Option<NaiveDate>),
    /// "Today" / "Tomorrow" button, resolved against `today`.
    SetDatePreset { preset: DatePreset, today: NaiveDate },
    /// Location text box (live input).
    SetLocation(String),
    /// Keyword text box, without submitting.
    SetKeyword(String),
    /// Search button: advanced filters are reset so the keyword wins.
    Search(String),
    /// Reset category, date and location, keeping the keyword.
    ClearAdvanced,
    /// Clear button: reset everything including the keyword.
    ClearAll,
}

impl FilterState {
    /// State used when the page opens, optionally seeded with `?q=` from the home page.
    pub fn initial(keyword: Option<&str>) -> Self {
        Self {
            keyword: non_blank(keyword.unwrap_or_default()),
            ..Self::default()
        }
    }

    pub fn apply(&self, action: FilterAction) -> Self {
        match action {
            FilterAction::SetCategory(category) => Self {
                category: category.as_deref().and_then(non_blank),
                ..self.clone()
            },
            FilterAction::SetDate(date) => Self {
                date,
                ..self.clone()
            },
            FilterAction::SetDatePreset { preset, today } => Self {
                date: Some(preset.resolve(today)),
                ..self.clone()
            },
            FilterAction::SetLocation(location) => Self {
                location: non_blank(&location),
                ..self.clone()
            },
            FilterAction::SetKeyword(keyword) => Self {
                keyword: non_blank(&keyword),
                ..self.clone()
            },
            FilterAction::Search(keyword) => Self {
                keyword: non_blank(&keyword),
                ..Self::default()
            },
            FilterAction::ClearAdvanced => Self {
                keyword: self.keyword.clone(),
                ..Self::default()
            },
            FilterAction::ClearAll => Self::default(),
        }
    }

    /// Fold a sequence of actions starting from `self`.
    pub fn apply_all(&self, actions: impl IntoIterator<Item = FilterAction>) -> Self {
        actions
            .into_iter()
            .fold(self.clone(), |state, action| state.apply(action))
    }

    pub fn has_advanced_filters(&self) -> bool {
        self.category.is_some() || self.date.is_some() || self.location.is_some()
    }

    /// Criteria the server will evaluate for this snapshot.
    pub fn to_criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::any();
        if let Some(keyword) = &self.keyword {
            criteria = criteria.with_keyword(keyword);
        }
        if let Some(date) = self.date {
            criteria = criteria.with_date(date);
        }
        if let Some(location) = &self.location {
            criteria = criteria.with_location(location);
        }
        if let Some(category) = &self.category {
            criteria = criteria.with_category(category);
        }
        criteria
    }

    /// Query string for `GET /api/events`, in `category`, `date`, `location`, `q` order.
    pub fn to_query_string(&self) -> String {
        let date = self.date.map(|d| d.format(DATE_FORMAT).to_string());
        [
            ("category", self.category.as_deref()),
            ("date", date.as_deref()),
            ("location", self.location.as_deref()),
            ("q", self.keyword.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={}", urlencoding::encode(v))))
        .collect::<Vec<_>>()
        .join("&")
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
