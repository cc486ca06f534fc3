//! Search criteria and the typed clauses they expand into.
//!
//! A [`FilterCriteria`] holds up to four independent, optional criteria. Each present
//! criterion becomes one [`Clause`]; a search matches the conjunction of all clauses
//! plus the active-status base predicate. Storage backends render the same clauses
//! into their own query language, while [`Clause::matches`] evaluates them directly.

use chrono::NaiveDate;

use crate::error::{DomainError, DomainResult};
use crate::event::Event;

/// Wire format of the `date` criterion.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validated, normalized search criteria.
///
/// Strings are trimmed and blank values are dropped, so `Some` always means
/// "constrain on this value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    keyword: Option<String>,
    date: Option<NaiveDate>,
    location: Option<String>,
    category: Option<String>,
}

impl FilterCriteria {
    /// No constraints: every active event.
    pub fn any() -> Self {
        Self::default()
    }

    /// Build criteria from raw request values.
    ///
    /// Fails with [`DomainError::Validation`] when `date` is present but not `YYYY-MM-DD`.
    pub fn from_raw(
        keyword: Option<&str>,
        date: Option<&str>,
        location: Option<&str>,
        category: Option<&str>,
    ) -> DomainResult<Self> {
        let date = match normalize(date) {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };
        Ok(Self {
            keyword: normalize(keyword),
            date,
            location: normalize(location),
            category: normalize(category),
        })
    }

    pub fn with_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        self.keyword = normalize(Some(keyword.as_ref()));
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_location(mut self, location: impl AsRef<str>) -> Self {
        self.location = normalize(Some(location.as_ref()));
        self
    }

    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = normalize(Some(category.as_ref()));
        self
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses().is_empty()
    }

    /// Active clauses in a fixed order: keyword, date, location, category.
    pub fn clauses(&self) -> Vec<Clause> {
        let mut clauses = Vec::with_capacity(4);
        if let Some(k) = &self.keyword {
            clauses.push(Clause::Keyword(k.clone()));
        }
        if let Some(d) = self.date {
            clauses.push(Clause::Date(d));
        }
        if let Some(l) = &self.location {
            clauses.push(Clause::Location(l.clone()));
        }
        if let Some(c) = &self.category {
            clauses.push(Clause::Category(c.clone()));
        }
        clauses
    }

    /// Full search predicate: active status AND every clause.
    pub fn matches(&self, event: &Event) -> bool {
        event.is_active() && self.clauses().iter().all(|c| c.matches(event))
    }
}

/// One criterion, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Case-insensitive substring of the name OR the description.
    Keyword(String),
    /// Exact date equality.
    Date(NaiveDate),
    /// Case-insensitive substring of the location.
    Location(String),
    /// Case-insensitive exact match on the category display name.
    Category(String),
}

impl Clause {
    pub fn kind(&self) -> &'static str {
        match self {
            Clause::Keyword(_) => "keyword",
            Clause::Date(_) => "date",
            Clause::Location(_) => "location",
            Clause::Category(_) => "category",
        }
    }

    /// Evaluate the clause against an event.
    ///
    /// Case folding is ASCII-only, which is what SQLite's `LOWER` and `LIKE` do.
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Clause::Keyword(k) => {
                contains_folded(&event.name, k)
                    || event
                        .description
                        .as_deref()
                        .is_some_and(|d| contains_folded(d, k))
            }
            Clause::Date(d) => event.date == *d,
            Clause::Location(l) => contains_folded(&event.location, l),
            Clause::Category(c) => event
                .category
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(c)),
        }
    }
}

/// Parse a `YYYY-MM-DD` date criterion.
pub fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        DomainError::validation(format!("date must be formatted as YYYY-MM-DD, got {raw:?}"))
    })
}

fn normalize(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
