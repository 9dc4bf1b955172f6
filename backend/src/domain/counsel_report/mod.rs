//! Counsel report aggregate.
//!
//! A counselor drafts a report for a counsel request, submits it, and the
//! institution admin reviews and approves it or returns it for revision.
//! Every status change goes through one private transition routine, which
//! consults [`status::TRANSITIONS`] before touching any field.

pub mod status;

use chrono::{DateTime, Utc};

pub use status::{CounselReportStatus, TRANSITIONS};

use super::events::DomainEvent;
use super::value_objects::{ReportBody, ReportTitle};
use super::{ChildId, CounselReportId, CounselRequestId, UserId};

/// Rule violations raised by report mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CounselReportError {
    /// Content edits are only allowed while the report is a draft.
    #[error("작성 중인 보고서만 수정할 수 있습니다 (현재 상태: {status})")]
    NotEditable { status: CounselReportStatus },
    /// The requested status change is not in the transition table.
    #[error("보고서 상태를 {from}에서 {to}(으)로 변경할 수 없습니다")]
    InvalidTransition {
        from: CounselReportStatus,
        to: CounselReportStatus,
    },
}

/// Validated input for [`CounselReport::create`].
#[derive(Debug, Clone)]
pub struct NewCounselReport {
    pub counsel_request_id: CounselRequestId,
    pub child_id: ChildId,
    pub counselor_id: UserId,
    pub title: ReportTitle,
    pub body: ReportBody,
}

/// Stored shape used to re-hydrate a [`CounselReport`].
#[derive(Debug, Clone)]
pub struct CounselReportRecord {
    pub id: CounselReportId,
    pub counsel_request_id: CounselRequestId,
    pub child_id: ChildId,
    pub counselor_id: UserId,
    pub title: ReportTitle,
    pub body: ReportBody,
    pub status: CounselReportStatus,
    pub reviewer_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
}

/// Report authored by a counselor about one counsel request.
#[derive(Debug, Clone)]
pub struct CounselReport {
    id: CounselReportId,
    counsel_request_id: CounselRequestId,
    child_id: ChildId,
    counselor_id: UserId,
    title: ReportTitle,
    body: ReportBody,
    status: CounselReportStatus,
    reviewer_comment: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
    approved_at: Option<DateTime<Utc>>,
    events: Vec<DomainEvent>,
}

impl CounselReport {
    /// Start a new report in [`CounselReportStatus::Draft`].
    pub fn create(new: NewCounselReport, now: DateTime<Utc>) -> Self {
        let NewCounselReport {
            counsel_request_id,
            child_id,
            counselor_id,
            title,
            body,
        } = new;
        Self {
            id: CounselReportId::random(),
            counsel_request_id,
            child_id,
            counselor_id,
            title,
            body,
            status: CounselReportStatus::Draft,
            reviewer_comment: None,
            created_at: now,
            updated_at: now,
            submitted_at: None,
            approved_at: None,
            events: Vec::new(),
        }
    }

    /// Re-hydrate a stored report without validation.
    pub fn restore(record: CounselReportRecord) -> Self {
        let CounselReportRecord {
            id,
            counsel_request_id,
            child_id,
            counselor_id,
            title,
            body,
            status,
            reviewer_comment,
            created_at,
            updated_at,
            submitted_at,
            approved_at,
        } = record;
        Self {
            id,
            counsel_request_id,
            child_id,
            counselor_id,
            title,
            body,
            status,
            reviewer_comment,
            created_at,
            updated_at,
            submitted_at,
            approved_at,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> CounselReportId {
        self.id
    }

    pub fn counsel_request_id(&self) -> CounselRequestId {
        self.counsel_request_id
    }

    pub fn child_id(&self) -> ChildId {
        self.child_id
    }

    pub fn counselor_id(&self) -> UserId {
        self.counselor_id
    }

    pub fn title(&self) -> &ReportTitle {
        &self.title
    }

    pub fn body(&self) -> &ReportBody {
        &self.body
    }

    pub fn status(&self) -> CounselReportStatus {
        self.status
    }

    /// Comment left when the report was returned for revision.
    pub fn reviewer_comment(&self) -> Option<&str> {
        self.reviewer_comment.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    pub fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// Whether `counselor` is the author.
    pub fn is_author(&self, counselor: UserId) -> bool {
        self.counselor_id == counselor
    }

    /// Whether `counselor` may edit the content right now.
    pub fn can_edit(&self, counselor: UserId) -> bool {
        self.is_author(counselor) && self.status.is_counselor_editable()
    }

    /// Replace title and body while the report is a draft.
    pub fn revise(
        &mut self,
        title: ReportTitle,
        body: ReportBody,
        now: DateTime<Utc>,
    ) -> Result<(), CounselReportError> {
        if !self.status.is_counselor_editable() {
            return Err(CounselReportError::NotEditable {
                status: self.status,
            });
        }
        self.title = title;
        self.body = body;
        self.updated_at = now;
        Ok(())
    }

    /// `Draft -> Submitted`. Clears any earlier reviewer comment.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<(), CounselReportError> {
        self.transition_to(CounselReportStatus::Submitted, now)?;
        self.submitted_at = Some(now);
        self.reviewer_comment = None;
        Ok(())
    }

    /// `Submitted -> Reviewed`.
    pub fn mark_reviewed(&mut self, now: DateTime<Utc>) -> Result<(), CounselReportError> {
        self.transition_to(CounselReportStatus::Reviewed, now)
    }

    /// `Reviewed -> Approved`.
    pub fn approve(&mut self, now: DateTime<Utc>) -> Result<(), CounselReportError> {
        self.transition_to(CounselReportStatus::Approved, now)?;
        self.approved_at = Some(now);
        Ok(())
    }

    /// `Submitted -> Draft`, keeping the reviewer's comment. A blank comment
    /// is stored as none.
    pub fn return_for_revision(
        &mut self,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), CounselReportError> {
        self.transition_to(CounselReportStatus::Draft, now)?;
        self.reviewer_comment = comment
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty());
        self.submitted_at = None;
        Ok(())
    }

    /// Drain queued domain events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn transition_to(
        &mut self,
        to: CounselReportStatus,
        now: DateTime<Utc>,
    ) -> Result<(), CounselReportError> {
        let from = self.status;
        if !from.can_transition_to(to) {
            return Err(CounselReportError::InvalidTransition { from, to });
        }
        self.status = to;
        self.updated_at = now;
        self.events.push(DomainEvent::CounselReportStatusChanged {
            report_id: self.id,
            from,
            to,
        });
        Ok(())
    }
}
