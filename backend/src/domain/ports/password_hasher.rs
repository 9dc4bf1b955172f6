//! Port for one-way password hashing.

use crate::domain::value_objects::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hasher adapters.
    pub enum PasswordHasherError {
        /// Hashing could not be performed.
        Hashing => "password hashing failed: {message}",
        /// The stored hash is not in a format the adapter understands.
        MalformedHash => "stored password hash is malformed: {message}",
    }
}

/// Hashes new passwords and verifies candidates against stored hashes.
///
/// Hashing is CPU-bound and synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// `Ok(false)` for a wrong password; `Err` only for adapter failures.
    fn verify(&self, password: &Password, hash: &PasswordHash)
    -> Result<bool, PasswordHasherError>;
}
