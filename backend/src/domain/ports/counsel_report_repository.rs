//! Port for counsel report persistence.

use async_trait::async_trait;

use crate::domain::{CounselReport, CounselReportId, CounselRequestId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by counsel report repository adapters.
    pub enum CounselReportRepositoryError {
        /// Repository connection could not be established.
        Connection => "counsel report repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "counsel report repository query failed: {message}",
        /// A report already exists for the counsel request.
        Duplicate => "counsel report already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounselReportRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &CounselReportId,
    ) -> Result<Option<CounselReport>, CounselReportRepositoryError>;

    async fn find_by_request(
        &self,
        request_id: &CounselRequestId,
    ) -> Result<Option<CounselReport>, CounselReportRepositoryError>;

    /// Insert a report; at most one report may exist per counsel request.
    async fn create(&self, report: &CounselReport) -> Result<(), CounselReportRepositoryError>;

    async fn update(&self, report: &CounselReport) -> Result<(), CounselReportRepositoryError>;
}
