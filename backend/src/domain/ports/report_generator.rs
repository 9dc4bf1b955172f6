//! Driven port for the external report-generation service.

use async_trait::async_trait;

use crate::domain::CounselReportId;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while requesting report generation.
    pub enum ReportGeneratorError {
        /// Network transport failed before receiving a response.
        Transport => "report generator transport failed: {message}",
        /// The service answered with a failure status.
        Rejected => "report generator rejected request: {message}",
        /// The service is not configured.
        Unavailable => "report generator unavailable: {message}",
    }
}

/// Renders an approved counsel report into its final document form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, report_id: &CounselReportId) -> Result<(), ReportGeneratorError>;
}
