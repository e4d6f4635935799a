//! The composed operation surface consumed by the external request layer.
//!
//! Operations here speak only external handles (dense indices); internal
//! identifiers never cross the boundary except the message id. Each
//! operation resolves identities through the Identity Index, touches the
//! purpose-built partition it needs, and re-translates identifiers on the
//! way out. Every failure is one of the typed kinds in [`error`] — callers
//! never see an opaque error.
//!
//! - Domain view types in [`domain`]
//! - The error taxonomy in [`error`]
//! - The orchestration service in [`services`]

pub mod domain;
pub mod error;
pub mod services;

#[cfg(test)]
mod tests;
