//! `PostgreSQL` adapters for conversation membership persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresParticipantRepository;
