//! Conversation Feed: per-user, recency-ordered view of "my conversations".
//!
//! The feed is a materialised view, not a computed join: every send writes
//! one fresh entry per participant carrying a snapshot of the newest message
//! and the other participants. Because the ranking key includes the update
//! instant, a refresh inserts a newer-ranked row rather than overwriting in
//! place — older rows for the same conversation stay behind as shadowed
//! rows until an external compaction pass removes them. Readers only ever
//! take rows in ranking order, so shadowing is invisible to correctness.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The feed service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
