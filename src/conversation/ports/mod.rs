//! Port contracts for conversation membership.

pub mod repository;

pub use repository::ParticipantRepository;
