//! Ronchamp: messaging data-access layer over a wide-column store.
//!
//! This crate provides the data model and read/write protocols for a
//! messaging system backed by a partition/clustering-key store: listing a
//! user's conversations by recency, paginating a conversation's messages,
//! and sending a message that fans out to every denormalised view.
//!
//! # Architecture
//!
//! Ronchamp follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! Every access pattern is pre-materialised into a purpose-built partition;
//! there are no joins and no cross-partition transactions. Write paths fan
//! out to each view that needs updating, and partial failures are surfaced
//! to the caller rather than hidden.
//!
//! # Modules
//!
//! - [`identity`]: bidirectional mapping between external indices and
//!   internal identifiers
//! - [`conversation`]: participant registry and deterministic conversation
//!   identity
//! - [`message`]: append-only, time-ordered message log
//! - [`feed`]: per-user recency-ordered conversation feed
//! - [`messaging`]: the composed operation surface consumed by callers

pub mod conversation;
pub mod feed;
pub mod identity;
pub mod message;
pub mod messaging;
pub mod pagination;
pub mod store;
