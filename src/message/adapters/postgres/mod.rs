//! `PostgreSQL` adapters for message log persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresMessageStore;
