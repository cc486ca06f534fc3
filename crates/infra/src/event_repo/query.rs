//! SQL rendering for event searches.
//!
//! [`SearchQuery`] turns the typed clauses of a [`FilterCriteria`] into SQL text plus an
//! ordered list of [`QueryParam`]s. Clause rendering only ever emits fixed fragments and
//! `?` placeholders; user values travel exclusively through the parameter list.

use chrono::NaiveDate;

use hope_core::{Clause, EventId, FilterCriteria};

/// Projection shared by every event read (search and single lookup).
pub const EVENT_SELECT: &str = "\
SELECT e.id, e.name, e.image, e.event_date, e.location, e.description, \
e.ticket_price, e.current_attendees, e.goal_attendees, e.status, \
e.category_id, e.organizer_id, c.name AS category_name \
FROM events e \
LEFT JOIN categories c ON e.category_id = c.id";

/// Base predicate applied to every read: only active events are visible.
pub const ACTIVE_ONLY: &str = "e.status = 1";

/// Deterministic ordering: date ascending, ties broken by id.
pub const ORDER_BY: &str = " ORDER BY e.event_date ASC, e.id ASC";

/// A value bound out-of-band from the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Text(String),
    Date(NaiveDate),
    Int(i64),
}

/// Rendered SQL text plus its bound parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

/// Accumulates clauses and their parameters, rendering once in [`SearchQuery::render`].
#[derive(Debug, Clone)]
pub struct SearchQuery {
    clauses: Vec<Clause>,
}

impl SearchQuery {
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            clauses: criteria.clauses(),
        }
    }

    pub fn render(&self) -> RenderedQuery {
        let mut sql = String::from(EVENT_SELECT);
        sql.push_str(" WHERE ");
        sql.push_str(ACTIVE_ONLY);

        let mut params = Vec::with_capacity(self.clauses.len() * 2);
        for clause in &self.clauses {
            sql.push_str(" AND ");
            sql.push_str(render_clause(clause, &mut params));
        }
        sql.push_str(ORDER_BY);

        RenderedQuery { sql, params }
    }
}

/// Single active event by id.
pub fn find_by_id(id: EventId) -> RenderedQuery {
    RenderedQuery {
        sql: format!("{EVENT_SELECT} WHERE e.id = ? AND {ACTIVE_ONLY}"),
        params: vec![QueryParam::Int(id.get())],
    }
}

// Returns a static fragment; the clause's value only reaches `params`.
fn render_clause(clause: &Clause, params: &mut Vec<QueryParam>) -> &'static str {
    match clause {
        Clause::Keyword(k) => {
            let pattern = like_pattern(k);
            params.push(QueryParam::Text(pattern.clone()));
            params.push(QueryParam::Text(pattern));
            "(LOWER(e.name) LIKE ? ESCAPE '\\' OR LOWER(e.description) LIKE ? ESCAPE '\\')"
        }
        Clause::Date(d) => {
            params.push(QueryParam::Date(*d));
            "e.event_date = ?"
        }
        Clause::Location(l) => {
            params.push(QueryParam::Text(like_pattern(l)));
            "LOWER(e.location) LIKE ? ESCAPE '\\'"
        }
        Clause::Category(c) => {
            params.push(QueryParam::Text(c.to_ascii_lowercase()));
            "LOWER(c.name) = ?"
        }
    }
}

/// `%value%` with LIKE metacharacters escaped, lowercased to match `LOWER(column)`.
pub fn like_pattern(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('%');
    for ch in value.to_ascii_lowercase().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_criteria_renders_base_predicate_only() {
        let q = SearchQuery::from_criteria(&FilterCriteria::any()).render();
        assert!(q.sql.ends_with("WHERE e.status = 1 ORDER BY e.event_date ASC, e.id ASC"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn all_criteria_are_anded_with_params_in_order() {
        let criteria = FilterCriteria::any()
            .with_keyword("Gala")
            .with_date(ymd(2025, 11, 15))
            .with_location("Sydney")
            .with_category("Gala Dinner");
        let q = SearchQuery::from_criteria(&criteria).render();

        assert_eq!(q.sql.matches(" AND ").count(), 4);
        assert_eq!(q.sql.matches('?').count(), q.params.len());
        assert_eq!(
            q.params,
            vec![
                QueryParam::Text("%gala%".into()),
                QueryParam::Text("%gala%".into()),
                QueryParam::Date(ymd(2025, 11, 15)),
                QueryParam::Text("%sydney%".into()),
                QueryParam::Text("gala dinner".into()),
            ]
        );
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\x"), "%c:\\\\x%");
        assert_eq!(like_pattern("O'Neil"), "%o'neil%");
    }

    #[test]
    fn lookup_binds_id() {
        let q = find_by_id(EventId::from_raw(7));
        assert!(q.sql.contains("WHERE e.id = ? AND e.status = 1"));
        assert_eq!(q.params, vec![QueryParam::Int(7)]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: SQL text depends only on which clauses are present, never on their values.
            #[test]
            fn sql_shape_is_independent_of_values(
                keyword in ".{1,40}",
                location in ".{1,40}",
                category in ".{1,40}",
            ) {
                prop_assume!(!keyword.trim().is_empty());
                prop_assume!(!location.trim().is_empty());
                prop_assume!(!category.trim().is_empty());

                let adversarial = FilterCriteria::any()
                    .with_keyword(&keyword)
                    .with_location(&location)
                    .with_category(&category);
                let benign = FilterCriteria::any()
                    .with_keyword("x")
                    .with_location("y")
                    .with_category("z");

                let a = SearchQuery::from_criteria(&adversarial).render();
                let b = SearchQuery::from_criteria(&benign).render();
                prop_assert_eq!(&a.sql, &b.sql);
                prop_assert_eq!(a.params.len(), b.params.len());
            }
        }
    }
}
