//! The provisioned user record.

use super::{UserId, UserIndex};
use serde::{Deserialize, Serialize};

/// A user as recorded at provisioning time.
///
/// The record is write-once: the `(id ↔ index)` pair is a bijection over the
/// record's lifetime and none of the fields are ever updated through this
/// crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: UserId,
    index: UserIndex,
    username: String,
    full_name: String,
    email: String,
}

impl UserRecord {
    /// Creates a user record.
    #[must_use]
    pub fn new(
        id: UserId,
        index: UserIndex,
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            index,
            username: username.into(),
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// The internal identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// The external index.
    #[must_use]
    pub const fn index(&self) -> UserIndex {
        self.index
    }

    /// The login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
