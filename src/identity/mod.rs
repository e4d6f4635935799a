//! Identity Index: bidirectional mapping between externally exposed dense
//! indices and internally used stable identifiers.
//!
//! Every relation in the store is keyed by UUID; callers only ever see small
//! integer indices. This module owns both mappings (users and conversations,
//! independently maintained) and the write-once registration paths that
//! create them. The `(identifier ↔ index)` mapping is a bijection for the
//! lifetime of a record: created once, never mutated, never deleted.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The resolution service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
