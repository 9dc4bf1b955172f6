//! Driving port for account lookups.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

use super::UserProfilePayload;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfilePayload, Error>;
}
