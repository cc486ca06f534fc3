//! Read-only event repository boundary.
//!
//! The API depends on the [`EventRepository`] trait only; SQLite backs it in
//! production and the in-memory implementation backs tests/dev.

pub mod in_memory;
pub mod query;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryEventRepository;
pub use query::{QueryParam, RenderedQuery, SearchQuery};
pub use sqlite::SqliteEventRepository;
pub use r#trait::{EventRepository, StoreError};
