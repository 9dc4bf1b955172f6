//! Port for user account persistence.

use async_trait::async_trait;

use crate::domain::value_objects::Email;
use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
        /// The email address is already registered.
        Duplicate => "user already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserRepositoryError>;

    /// Insert a new account; emails are unique.
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError>;

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;
}
