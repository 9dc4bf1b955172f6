//! Port for institution persistence.

use async_trait::async_trait;

use crate::domain::{Institution, InstitutionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by institution repository adapters.
    pub enum InstitutionRepositoryError {
        /// Repository connection could not be established.
        Connection => "institution repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "institution repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstitutionRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &InstitutionId,
    ) -> Result<Option<Institution>, InstitutionRepositoryError>;

    async fn exists(&self, id: &InstitutionId) -> Result<bool, InstitutionRepositoryError>;

    /// Insert or replace an institution record.
    async fn save(&self, institution: &Institution) -> Result<(), InstitutionRepositoryError>;
}
