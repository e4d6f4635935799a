//! Participant Registry: which identities belong to which conversation.
//!
//! A conversation's identity is derived deterministically from its sorted
//! participant set, so the first message between two users and every later
//! concurrent send all converge on the same conversation. Membership rows
//! are write-once facts: a participant's `joined_at` is recorded on first
//! insert and never revised, and re-registration is an idempotent no-op.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The registry service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
