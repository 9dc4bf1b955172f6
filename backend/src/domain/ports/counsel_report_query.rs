//! Driving port for reading counsel reports.

use async_trait::async_trait;

use crate::domain::{Actor, CounselReportId, Error};

use super::CounselReportPayload;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounselReportQuery: Send + Sync {
    /// Guardian view of a report. Drafts are reported as not found.
    async fn get_for_guardian(
        &self,
        actor: Actor,
        report_id: CounselReportId,
    ) -> Result<CounselReportPayload, Error>;
}
