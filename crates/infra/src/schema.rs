//! Table bootstrap (create-if-missing, in dependency order).

use sqlx::SqlitePool;

use crate::event_repo::StoreError;
use crate::event_repo::sqlite::map_sqlx_error;

const CREATE_CATEGORIES: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
)"#;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role          TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('user', 'organizer', 'admin')),
    created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)"#;

const CREATE_EVENTS: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    name              TEXT NOT NULL,
    image             TEXT,
    event_date        TEXT NOT NULL,
    location          TEXT NOT NULL,
    description       TEXT,
    ticket_price      REAL NOT NULL DEFAULT 0 CHECK (ticket_price >= 0),
    current_attendees INTEGER NOT NULL DEFAULT 0 CHECK (current_attendees >= 0),
    goal_attendees    INTEGER NOT NULL CHECK (goal_attendees > 0),
    status            INTEGER NOT NULL DEFAULT 1,
    category_id       INTEGER REFERENCES categories (id) ON DELETE SET NULL ON UPDATE CASCADE,
    organizer_id      INTEGER REFERENCES users (id) ON DELETE SET NULL ON UPDATE CASCADE
)"#;

const CREATE_EVENTS_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS events_users (
    event_id          INTEGER NOT NULL REFERENCES events (id) ON DELETE CASCADE,
    user_id           INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    registration_date TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (event_id, user_id)
)"#;

const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_events_date ON events (event_date)",
    "CREATE INDEX IF NOT EXISTS idx_events_category ON events (category_id)",
    "CREATE INDEX IF NOT EXISTS idx_events_organizer ON events (organizer_id)",
];

/// Create every table and index that does not exist yet. Safe to re-run.
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), StoreError> {
    let tables = [
        ("categories", CREATE_CATEGORIES),
        ("users", CREATE_USERS),
        ("events", CREATE_EVENTS),
        ("events_users", CREATE_EVENTS_USERS),
    ];

    for (table, ddl) in tables {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("bootstrap_schema", e))?;
        tracing::info!(table, "table checked/created");
    }

    for ddl in CREATE_INDEXES {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("bootstrap_schema", e))?;
    }

    Ok(())
}
