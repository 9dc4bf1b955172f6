//! Reqwest-backed client for the report-generation service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::info;

use crate::domain::CounselReportId;
use crate::domain::ports::{ReportGenerator, ReportGeneratorError};
use crate::outbound::http_support::{HttpClientError, endpoint, status_message};

const REPORTS_PATH: &str = "reports";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateReportDto {
    report_id: CounselReportId,
}

/// Posts `{"reportId": ...}` to `{base}/reports`; any 2xx is success.
#[derive(Debug, Clone)]
pub struct ReportGeneratorHttpClient {
    client: Client,
    endpoint: Url,
}

impl ReportGeneratorHttpClient {
    /// # Errors
    ///
    /// Returns an error when `base` cannot carry a path or the reqwest client
    /// cannot be constructed.
    pub fn new(base: &Url, timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint(base, REPORTS_PATH)?,
        })
    }
}

#[async_trait]
impl ReportGenerator for ReportGeneratorHttpClient {
    async fn generate(&self, report_id: &CounselReportId) -> Result<(), ReportGeneratorError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GenerateReportDto {
                report_id: *report_id,
            })
            .send()
            .await
            .map_err(|error| ReportGeneratorError::transport(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!(%report_id, "report generation accepted");
            return Ok(());
        }
        let body = response
            .bytes()
            .await
            .map_err(|error| ReportGeneratorError::transport(error.to_string()))?;
        Err(ReportGeneratorError::rejected(status_message(
            status.as_u16(),
            body.as_ref(),
        )))
    }
}
