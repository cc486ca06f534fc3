//! Integration tests for the event search pipeline.
//!
//! Tests: FilterCriteria → SearchQuery → SQLite → Event
//!
//! Verifies:
//! - SQL results equal the in-memory reference for every criteria combination
//! - Suspended events are never visible
//! - Crafted input is bound as data and never changes the query

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;

    use hope_core::{Event, EventId, FilterCriteria};

    use crate::db;
    use crate::event_repo::{EventRepository, SqliteEventRepository, StoreError};
    use crate::schema;
    use crate::seed;

    async fn seeded() -> SqliteEventRepository {
        let pool = db::connect_in_memory().await.unwrap();
        schema::bootstrap(&pool).await.unwrap();
        seed::seed_fixture(&pool).await.unwrap();
        SqliteEventRepository::new(pool)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(events: &[Event]) -> Vec<i64> {
        events.iter().map(|e| e.id.get()).collect()
    }

    async fn event_count(repo: &SqliteEventRepository) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(repo.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn date_criterion_matches_exactly_one_event() {
        let repo = seeded().await;
        let found = repo
            .find_events(&FilterCriteria::any().with_date(ymd(2025, 10, 20)))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![2]);
        assert_eq!(found[0].name, "Sunrise Fun Run");
    }

    #[tokio::test]
    async fn category_criterion_orders_by_date() {
        let repo = seeded().await;
        let found = repo
            .find_events(&FilterCriteria::any().with_category("Gala Dinner"))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![1, 12]);
        assert_eq!(found[0].name, "Annual Charity Gala 2025");
        assert_eq!(found[1].name, "Starlight Gala Dinner");
    }

    #[tokio::test]
    async fn category_is_exact_match() {
        let repo = seeded().await;
        let partial = repo
            .find_events(&FilterCriteria::any().with_category("Gala"))
            .await
            .unwrap();
        assert!(partial.is_empty());

        let folded = repo
            .find_events(&FilterCriteria::any().with_category("gala dinner"))
            .await
            .unwrap();
        assert_eq!(ids(&folded), vec![1, 12]);
    }

    #[tokio::test]
    async fn no_criteria_returns_all_active_events_by_date() {
        let repo = seeded().await;
        let found = repo.find_events(&FilterCriteria::any()).await.unwrap();

        assert_eq!(found.len(), 14);
        assert!(!ids(&found).contains(&14));
        assert!(found.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(found.first().map(|e| e.id.get()), Some(9));
        assert_eq!(found.last().map(|e| e.id.get()), Some(15));
    }

    #[tokio::test]
    async fn unknown_category_is_empty_not_an_error() {
        let repo = seeded().await;
        let found = repo
            .find_events(&FilterCriteria::any().with_category("Underwater Basket Weaving"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn keyword_is_case_insensitive_over_name_and_description() {
        let repo = seeded().await;
        let lower = repo
            .find_events(&FilterCriteria::any().with_keyword("charity"))
            .await
            .unwrap();
        let upper = repo
            .find_events(&FilterCriteria::any().with_keyword("CHARITY"))
            .await
            .unwrap();
        assert_eq!(ids(&lower), ids(&upper));
        assert!(ids(&lower).contains(&1));

        // "cancer" only appears in the description of event 2.
        let by_description = repo
            .find_events(&FilterCriteria::any().with_keyword("Cancer"))
            .await
            .unwrap();
        assert_eq!(ids(&by_description), vec![2]);
    }

    #[tokio::test]
    async fn location_is_substring_match() {
        let repo = seeded().await;
        let found = repo
            .find_events(&FilterCriteria::any().with_location("melbourne"))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![2, 12, 6]);
    }

    #[tokio::test]
    async fn suspended_event_is_not_searchable() {
        let repo = seeded().await;
        let found = repo
            .find_events(&FilterCriteria::any().with_date(ymd(2025, 11, 1)))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn lookup_returns_active_event_fields() {
        let repo = seeded().await;
        let ev = repo
            .find_event_by_id(EventId::from_raw(1))
            .await
            .unwrap()
            .expect("event 1 is active");

        assert_eq!(ev.name, "Annual Charity Gala 2025");
        assert_eq!(ev.date, ymd(2025, 11, 15));
        assert_eq!(ev.location, "Sydney Opera House");
        assert_eq!(ev.ticket_price, 150.0);
        assert_eq!(ev.current_attendees, 45);
        assert_eq!(ev.goal_attendees, 200);
        assert_eq!(ev.category.as_deref(), Some("Gala Dinner"));
        assert_eq!(ev.image.as_deref(), Some("../img/event_img/1.jpg"));
    }

    #[tokio::test]
    async fn lookup_of_missing_or_suspended_event_is_none() {
        let repo = seeded().await;
        assert_eq!(repo.find_event_by_id(EventId::from_raw(14)).await.unwrap(), None);
        assert_eq!(repo.find_event_by_id(EventId::from_raw(999)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn crafted_strings_are_treated_as_literal_data() {
        let repo = seeded().await;
        let attacks = [
            "' OR '1'='1",
            "x'; DROP TABLE events; --",
            "\" OR \"\"=\"",
            "%",
            "_",
            "\\",
            "1) OR (1=1",
            "Gala Dinner' --",
        ];

        for attack in attacks {
            for criteria in [
                FilterCriteria::any().with_keyword(attack),
                FilterCriteria::any().with_location(attack),
                FilterCriteria::any().with_category(attack),
            ] {
                let found = repo.find_events(&criteria).await.unwrap();
                assert!(found.is_empty(), "{attack:?} matched {:?}", ids(&found));
            }
        }

        assert_eq!(event_count(&repo).await, 15);
    }

    #[tokio::test]
    async fn sql_results_match_reference_for_all_combinations() {
        let repo = seeded().await;
        let reference = seed::fixture_repository();

        let keywords = ["", "charity", "run", "WORKSHOP", "hope", "zzz"];
        let dates = [None, Some(ymd(2025, 10, 20)), Some(ymd(2025, 11, 1)), Some(ymd(2025, 11, 15))];
        let locations = ["", "melbourne", "Sydney", "online"];
        let categories = ["", "Gala Dinner", "fun run", "Silent Auction", "Nope"];

        for keyword in keywords {
            for date in dates {
                for location in locations {
                    for category in categories {
                        let mut criteria = FilterCriteria::any()
                            .with_keyword(keyword)
                            .with_location(location)
                            .with_category(category);
                        if let Some(d) = date {
                            criteria = criteria.with_date(d);
                        }

                        let sql = repo.find_events(&criteria).await.unwrap();
                        let expected = reference.find_events(&criteria).await.unwrap();
                        assert_eq!(sql, expected, "criteria {criteria:?}");
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn categories_are_listed_by_name() {
        let repo = seeded().await;
        let names: Vec<String> = repo
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names.len(), 8);
        assert_eq!(names.first().map(String::as_str), Some("Art Exhibition"));
        assert_eq!(names.last().map(String::as_str), Some("Workshop"));
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn reseeding_is_a_no_op() {
        let repo = seeded().await;
        schema::bootstrap(repo.pool()).await.unwrap();
        seed::seed_fixture(repo.pool()).await.unwrap();
        assert_eq!(event_count(&repo).await, 15);
    }

    #[tokio::test]
    async fn closed_pool_surfaces_as_store_error() {
        let repo = seeded().await;
        repo.pool().close().await;
        let err = repo.find_events(&FilterCriteria::any()).await.unwrap_err();
        assert!(matches!(err, StoreError::PoolClosed(_)), "{err:?}");
    }

    #[tokio::test]
    async fn slow_query_surfaces_as_timeout() {
        let seeded = seeded().await;
        let repo = SqliteEventRepository::with_timeout(
            seeded.pool().clone(),
            Duration::from_millis(50),
        );

        // The in-memory pool has a single connection; holding it stalls every query.
        let held = seeded.pool().acquire().await.unwrap();
        let err = repo.find_events(&FilterCriteria::any()).await.unwrap_err();
        assert!(
            matches!(err, StoreError::Timeout { ref operation, millis: 50 } if operation == "find_events"),
            "{err:?}"
        );
        drop(held);

        let found = repo.find_events(&FilterCriteria::any()).await.unwrap();
        assert_eq!(found.len(), 14);
    }
}
