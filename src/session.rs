//! Session identity for the single-user store.
//!
//! The store is scoped per user, so a stable identity must exist before any
//! store operations are permitted. The identity is derived from a secret so
//! that the same secret always maps to the same user's transactions across
//! restarts.

use std::fmt::Display;

use sha2::{Digest, Sha512};

use crate::Error;

/// A stable, opaque identifier for the user that owns the transaction
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// The user ID as the hex string stored alongside each transaction.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An established session identity.
///
/// Create one with [Session::establish] before constructing the transaction
/// store.
#[derive(Debug, Clone)]
pub struct Session {
    user_id: UserId,
}

impl Session {
    /// Establish a session from a `secret` string.
    ///
    /// The user ID is the hex digest of the secret, so the identity is
    /// stable for a given secret.
    ///
    /// # Errors
    /// Returns [Error::AuthenticationFailure] if `secret` is empty or
    /// whitespace-only.
    pub fn establish(secret: &str) -> Result<Self, Error> {
        let secret = secret.trim();

        if secret.is_empty() {
            return Err(Error::AuthenticationFailure);
        }

        let digest = Sha512::digest(secret);
        let user_id = digest
            .iter()
            // The first 16 bytes are plenty for a single-user collection key.
            .take(16)
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>();

        Ok(Self {
            user_id: UserId(user_id),
        })
    }

    /// The identity of the user this session belongs to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
