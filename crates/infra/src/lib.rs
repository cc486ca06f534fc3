//! Infrastructure layer: SQLite pool, schema, reference data, event repository.

pub mod db;
pub mod event_repo;
pub mod schema;
pub mod seed;

mod integration_tests;
