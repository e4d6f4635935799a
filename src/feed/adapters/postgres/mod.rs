//! `PostgreSQL` adapters for conversation feed persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresFeedStore;
