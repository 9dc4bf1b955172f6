//! Port for counsel request persistence.

use async_trait::async_trait;

use crate::domain::{ChildId, CounselRequest, CounselRequestId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by counsel request repository adapters.
    pub enum CounselRequestRepositoryError {
        /// Repository connection could not be established.
        Connection => "counsel request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "counsel request repository query failed: {message}",
        /// The child already has an open request.
        Duplicate => "open counsel request already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounselRequestRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &CounselRequestId,
    ) -> Result<Option<CounselRequest>, CounselRequestRepositoryError>;

    /// Whether the child has a request that is neither completed nor cancelled.
    async fn has_open_request(&self, child_id: &ChildId)
    -> Result<bool, CounselRequestRepositoryError>;

    /// Insert a request; a child may have only one open request at a time.
    async fn create(&self, request: &CounselRequest) -> Result<(), CounselRequestRepositoryError>;

    async fn update(&self, request: &CounselRequest) -> Result<(), CounselRequestRepositoryError>;
}
