//! Domain model for conversation membership.

mod participants;

pub use participants::{ParticipantSet, ParticipantSetError};
