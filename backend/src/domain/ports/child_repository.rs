//! Port for child persistence.

use async_trait::async_trait;

use crate::domain::{Child, ChildId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by child repository adapters.
    pub enum ChildRepositoryError {
        /// Repository connection could not be established.
        Connection => "child repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "child repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChildRepository: Send + Sync {
    async fn find_by_id(&self, id: &ChildId) -> Result<Option<Child>, ChildRepositoryError>;

    /// Children whose parentage names `guardian_id`.
    async fn list_by_guardian(&self, guardian_id: &UserId)
    -> Result<Vec<Child>, ChildRepositoryError>;

    /// Insert or replace a child record.
    async fn save(&self, child: &Child) -> Result<(), ChildRepositoryError>;
}
