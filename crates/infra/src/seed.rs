//! Reference dataset: 8 categories, 5 users, 15 events (one suspended), 4 registrations.
//!
//! Every insert is `INSERT OR IGNORE`, so re-seeding an existing database is a no-op.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use hope_core::{Category, CategoryId, Event, EventId, EventStatus, UserId};

use crate::event_repo::{InMemoryEventRepository, StoreError};
use crate::event_repo::sqlite::map_sqlx_error;

pub const CATEGORIES: [(i64, &str); 8] = [
    (1, "Gala Dinner"),
    (2, "Fun Run"),
    (3, "Silent Auction"),
    (4, "Concert"),
    (5, "Workshop"),
    (6, "Sports Tournament"),
    (7, "Art Exhibition"),
    (8, "Food Festival"),
];

/// (id, username, email, password_hash, role)
pub const USERS: [(i64, &str, &str, &str, &str); 5] = [
    (1, "AdminUser", "admin@charity.com", "admin_password_hash", "admin"),
    (2, "OrgA", "orga@charity.com", "orga_password_hash", "organizer"),
    (3, "OrgB", "orgb@charity.com", "orgb_password_hash", "organizer"),
    (4, "John Doe", "john.doe@email.com", "user_password_hash_1", "user"),
    (5, "Jane Smith", "jane.smith@email.com", "user_password_hash_2", "user"),
];

pub struct SeedEvent {
    pub id: i64,
    pub name: &'static str,
    pub date: NaiveDate,
    pub location: &'static str,
    pub description: &'static str,
    pub ticket_price: f64,
    pub current_attendees: i64,
    pub goal_attendees: i64,
    pub status: EventStatus,
    pub category_id: i64,
    pub organizer_id: i64,
}

macro_rules! seed_event {
    ($id:expr, $name:expr, $date:expr, $loc:expr, $desc:expr, $price:expr, $cur:expr, $goal:expr, $status:expr, $cat:expr, $org:expr) => {
        SeedEvent {
            id: $id,
            name: $name,
            date: $date,
            location: $loc,
            description: $desc,
            ticket_price: $price,
            current_attendees: $cur,
            goal_attendees: $goal,
            status: $status,
            category_id: $cat,
            organizer_id: $org,
        }
    };
}

const ACTIVE: EventStatus = EventStatus::Active;
const SUSPENDED: EventStatus = EventStatus::Suspended;

// Evaluated at compile time, so a bad seed date fails the build.
const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid seed date"),
    }
}

pub const EVENTS: [SeedEvent; 15] = [
    seed_event!(1, "Annual Charity Gala 2025", ymd(2025, 11, 15), "Sydney Opera House",
        "Join us for an elegant evening of dining and entertainment to support children education.",
        150.0, 45, 200, ACTIVE, 1, 2),
    seed_event!(2, "Sunrise Fun Run", ymd(2025, 10, 20), "Melbourne Park",
        "Start your day with a refreshing 5km run to raise funds for cancer research.",
        25.0, 120, 300, ACTIVE, 2, 3),
    seed_event!(3, "Art for Hope Exhibition", ymd(2025, 12, 5), "Brisbane Art Gallery",
        "Featuring local artists with all proceeds supporting mental health initiatives.",
        0.0, 80, 150, ACTIVE, 7, 2),
    seed_event!(4, "Gourmet Giving Festival", ymd(2025, 11, 30), "Adelaide Showground",
        "Taste dishes from top chefs while supporting food security programs.",
        45.0, 200, 400, ACTIVE, 8, 3),
    seed_event!(5, "Tennis Charity Open", ymd(2025, 10, 10), "Perth Tennis Club",
        "Amateur tennis tournament with all entry fees donated to youth sports programs.",
        30.0, 60, 100, ACTIVE, 6, 2),
    seed_event!(6, "Symphony of Hope", ymd(2025, 12, 20), "Melbourne Concert Hall",
        "An evening of classical music to raise funds for medical research.",
        75.0, 150, 250, ACTIVE, 4, 3),
    seed_event!(7, "Silent Auction Extravaganza", ymd(2025, 11, 25), "Online Event",
        "Bid on exclusive items and experiences from the comfort of your home.",
        0.0, 95, 200, ACTIVE, 3, 2),
    seed_event!(8, "Digital Skills Workshop", ymd(2025, 10, 15), "Sydney Tech Hub",
        "Learn essential digital skills while supporting tech education for underprivileged youth.",
        20.0, 30, 80, ACTIVE, 5, 2),
    seed_event!(9, "Community Coding Workshop", ymd(2025, 8, 15), "Canberra Innovation Hub",
        "A hands-on workshop for aspiring developers to learn the basics of web development, supporting tech literacy programs.",
        25.0, 48, 50, ACTIVE, 5, 3),
    seed_event!(10, "Riverfront Music Fest", ymd(2025, 10, 4), "Brisbane Riverstage",
        "An outdoor concert featuring the best local bands. All proceeds will benefit musicians in need.",
        55.0, 275, 1000, ACTIVE, 4, 3),
    seed_event!(11, "Charity Volleyball Match", ymd(2025, 9, 5), "Gold Coast Beach",
        "Watch local celebrities and athletes compete in a friendly beach volleyball tournament for environmental causes.",
        15.0, 115, 120, ACTIVE, 6, 2),
    seed_event!(12, "Starlight Gala Dinner", ymd(2025, 11, 22), "Crown Towers, Melbourne",
        "Our most prestigious event of the year. A night of fine dining and auctions to fund our Starlight Children Program.",
        250.0, 88, 300, ACTIVE, 1, 2),
    seed_event!(13, "Taste of Tasmania Charity Drive", ymd(2025, 12, 28), "Hobart Waterfront",
        "A weekend-long food and wine festival showcasing local produce. A portion of every sale supports Tasmanian wildlife conservation.",
        10.0, 450, 2000, ACTIVE, 8, 3),
    seed_event!(14, "Suspend Test Event", ymd(2025, 11, 1), "Suspend",
        "This event has been postponed. Please check back later for a new date. Originally for supporting emerging artists.",
        0.0, 10, 150, SUSPENDED, 3, 2),
    seed_event!(15, "City to Bay Fun Run 2026", ymd(2026, 3, 15), "Adelaide City Center",
        "The annual city-to-bay run is back! Join thousands of participants to raise money for major health research foundations.",
        40.0, 35, 1500, ACTIVE, 2, 3),
];

/// (event_id, user_id)
pub const REGISTRATIONS: [(i64, i64); 4] = [(1, 4), (1, 5), (2, 4), (5, 5)];

const SEEDED_AT: &str = "2025-09-28 10:37:21";

/// Image path served by the frontend for a seeded event.
pub fn image_for(event_id: i64) -> String {
    format!("../img/event_img/{event_id}.jpg")
}

/// Insert the reference dataset inside one transaction.
pub async fn seed_fixture(pool: &SqlitePool) -> Result<(), StoreError> {
    let err = |e| map_sqlx_error("seed_fixture", e);
    let mut tx = pool.begin().await.map_err(err)?;

    for (id, name) in CATEGORIES {
        sqlx::query("INSERT OR IGNORE INTO categories (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(err)?;
    }

    for (id, username, email, hash, role) in USERS {
        sqlx::query(
            "INSERT OR IGNORE INTO users (id, username, email, password_hash, role, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(username)
        .bind(email)
        .bind(hash)
        .bind(role)
        .bind(SEEDED_AT)
        .execute(&mut *tx)
        .await
        .map_err(err)?;
    }

    for ev in &EVENTS {
        sqlx::query(
            "INSERT OR IGNORE INTO events (id, name, image, event_date, location, description, \
             ticket_price, current_attendees, goal_attendees, status, category_id, organizer_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(ev.id)
        .bind(ev.name)
        .bind(image_for(ev.id))
        .bind(ev.date)
        .bind(ev.location)
        .bind(ev.description)
        .bind(ev.ticket_price)
        .bind(ev.current_attendees)
        .bind(ev.goal_attendees)
        .bind(ev.status.as_flag())
        .bind(ev.category_id)
        .bind(ev.organizer_id)
        .execute(&mut *tx)
        .await
        .map_err(err)?;
    }

    for (event_id, user_id) in REGISTRATIONS {
        sqlx::query(
            "INSERT OR IGNORE INTO events_users (event_id, user_id, registration_date) VALUES (?, ?, ?)",
        )
        .bind(event_id)
        .bind(user_id)
        .bind(SEEDED_AT)
        .execute(&mut *tx)
        .await
        .map_err(err)?;
    }

    tx.commit().await.map_err(err)?;
    tracing::info!(
        categories = CATEGORIES.len(),
        events = EVENTS.len(),
        "reference data processed"
    );
    Ok(())
}

/// The reference dataset as domain values, for the in-memory repository.
pub fn fixture_repository() -> InMemoryEventRepository {
    let categories: Vec<Category> = CATEGORIES
        .iter()
        .map(|&(id, name)| Category {
            id: CategoryId::from_raw(id),
            name: name.to_string(),
        })
        .collect();

    let events = EVENTS
        .iter()
        .map(|ev| Event {
            id: EventId::from_raw(ev.id),
            name: ev.name.to_string(),
            image: Some(image_for(ev.id)),
            date: ev.date,
            location: ev.location.to_string(),
            description: Some(ev.description.to_string()),
            ticket_price: ev.ticket_price,
            current_attendees: ev.current_attendees,
            goal_attendees: ev.goal_attendees,
            category: categories
                .iter()
                .find(|c| c.id.get() == ev.category_id)
                .map(|c| c.name.clone()),
            category_id: Some(CategoryId::from_raw(ev.category_id)),
            organizer_id: Some(UserId::from_raw(ev.organizer_id)),
            status: ev.status,
        })
        .collect();

    InMemoryEventRepository::with_data(categories, events)
}
