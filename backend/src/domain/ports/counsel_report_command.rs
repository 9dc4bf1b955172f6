//! Driving port for counsel report authoring and review.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Actor, ChildId, CounselReport, CounselReportId, CounselReportStatus, CounselRequestId, Error,
    UserId,
};

/// Serializable counsel report payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounselReportPayload {
    pub id: CounselReportId,
    pub counsel_request_id: CounselRequestId,
    pub child_id: ChildId,
    pub counselor_id: UserId,
    pub title: String,
    pub body: String,
    pub status: CounselReportStatus,
    pub reviewer_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl From<&CounselReport> for CounselReportPayload {
    fn from(value: &CounselReport) -> Self {
        Self {
            id: value.id(),
            counsel_request_id: value.counsel_request_id(),
            child_id: value.child_id(),
            counselor_id: value.counselor_id(),
            title: value.title().as_str().to_owned(),
            body: value.body().as_str().to_owned(),
            status: value.status(),
            reviewer_comment: value.reviewer_comment().map(str::to_owned),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
            submitted_at: value.submitted_at(),
            approved_at: value.approved_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCounselReportRequest {
    pub counsel_request_id: CounselRequestId,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviseCounselReportRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCounselReportRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounselReportCommand: Send + Sync {
    /// Start a draft for an in-progress request assigned to the counselor.
    async fn create_draft(
        &self,
        actor: Actor,
        request: CreateCounselReportRequest,
    ) -> Result<CounselReportPayload, Error>;

    async fn revise_draft(
        &self,
        actor: Actor,
        report_id: CounselReportId,
        request: ReviseCounselReportRequest,
    ) -> Result<CounselReportPayload, Error>;

    async fn submit_report(
        &self,
        actor: Actor,
        report_id: CounselReportId,
    ) -> Result<CounselReportPayload, Error>;

    async fn mark_reviewed(
        &self,
        actor: Actor,
        report_id: CounselReportId,
    ) -> Result<CounselReportPayload, Error>;

    /// Approve, complete the counsel request, and schedule document
    /// generation in the background.
    async fn approve_report(
        &self,
        actor: Actor,
        report_id: CounselReportId,
    ) -> Result<CounselReportPayload, Error>;

    async fn return_for_revision(
        &self,
        actor: Actor,
        report_id: CounselReportId,
        request: ReturnCounselReportRequest,
    ) -> Result<CounselReportPayload, Error>;
}
