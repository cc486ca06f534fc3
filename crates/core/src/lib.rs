//! `hope-core` — charity events domain.
//!
//! This crate contains **pure domain** types (no infrastructure concerns): the event
//! read models, search criteria, and the search-page filter state.

pub mod entity;
pub mod error;
pub mod event;
pub mod filter;
pub mod filter_state;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use event::{Category, Event, EventStatus, DEFAULT_IMAGE};
pub use filter::{Clause, FilterCriteria};
pub use filter_state::{DatePreset, FilterAction, FilterState};
pub use id::{CategoryId, EventId, UserId};
