//! Driving port for reading children.

use async_trait::async_trait;

use crate::domain::{Actor, ChildId, Error, UserId};

use super::ChildPayload;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChildQuery: Send + Sync {
    async fn get_child(&self, actor: Actor, child_id: ChildId) -> Result<ChildPayload, Error>;

    /// Children cared for by `guardian_id`.
    async fn list_children(
        &self,
        actor: Actor,
        guardian_id: UserId,
    ) -> Result<Vec<ChildPayload>, Error>;
}
