//! Counsel request aggregate.
//!
//! A guardian asks for counselling about one child. An admin matches the
//! request to an institution, the institution assigns a counselor, and the
//! request completes once the counselor's report is approved.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::events::DomainEvent;
use super::value_objects::CounselReason;
use super::{ChildId, CounselRequestId, InstitutionId, UnknownVariant, UserId};

/// Lifecycle status of a counsel request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounselRequestStatus {
    Pending,
    Matched,
    InProgress,
    Completed,
    Cancelled,
}

const REQUEST_TRANSITIONS: &[(CounselRequestStatus, CounselRequestStatus)] = &[
    (CounselRequestStatus::Pending, CounselRequestStatus::Matched),
    (CounselRequestStatus::Matched, CounselRequestStatus::InProgress),
    (CounselRequestStatus::InProgress, CounselRequestStatus::Completed),
    (CounselRequestStatus::Pending, CounselRequestStatus::Cancelled),
    (CounselRequestStatus::Matched, CounselRequestStatus::Cancelled),
];

impl CounselRequestStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Matched,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Whether the lifecycle permits `self -> to`.
    pub fn can_transition_to(self, to: Self) -> bool {
        REQUEST_TRANSITIONS.contains(&(self, to))
    }

    /// Open requests block a second request for the same child.
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Matched => "MATCHED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for CounselRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CounselRequestStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_owned()))
    }
}

/// Rule violations raised by request mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CounselRequestError {
    #[error("상담 요청 상태를 {from}에서 {to}(으)로 변경할 수 없습니다")]
    InvalidTransition {
        from: CounselRequestStatus,
        to: CounselRequestStatus,
    },
    #[error("기관이 배정되지 않은 상담 요청입니다")]
    InstitutionNotAssigned,
}

/// Validated input for [`CounselRequest::create`].
#[derive(Debug, Clone)]
pub struct NewCounselRequest {
    pub child_id: ChildId,
    pub guardian_id: UserId,
    pub reason: CounselReason,
}

/// Stored shape used to re-hydrate a [`CounselRequest`].
#[derive(Debug, Clone)]
pub struct CounselRequestRecord {
    pub id: CounselRequestId,
    pub child_id: ChildId,
    pub guardian_id: UserId,
    pub reason: CounselReason,
    pub status: CounselRequestStatus,
    pub institution_id: Option<InstitutionId>,
    pub counselor_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A guardian's request for counselling about one child.
///
/// ## Invariants
/// - `institution_id` is set from `Matched` onwards.
/// - `counselor_id` is set from `InProgress` onwards.
#[derive(Debug, Clone)]
pub struct CounselRequest {
    id: CounselRequestId,
    child_id: ChildId,
    guardian_id: UserId,
    reason: CounselReason,
    status: CounselRequestStatus,
    institution_id: Option<InstitutionId>,
    counselor_id: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl CounselRequest {
    /// Open a new request in `Pending`.
    pub fn create(new: NewCounselRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: CounselRequestId::random(),
            child_id: new.child_id,
            guardian_id: new.guardian_id,
            reason: new.reason,
            status: CounselRequestStatus::Pending,
            institution_id: None,
            counselor_id: None,
            created_at: now,
            updated_at: now,
            events: Vec::new(),
        }
    }

    /// Re-hydrate a stored request without validation.
    pub fn restore(record: CounselRequestRecord) -> Self {
        Self {
            id: record.id,
            child_id: record.child_id,
            guardian_id: record.guardian_id,
            reason: record.reason,
            status: record.status,
            institution_id: record.institution_id,
            counselor_id: record.counselor_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> CounselRequestId {
        self.id
    }

    pub fn child_id(&self) -> ChildId {
        self.child_id
    }

    pub fn guardian_id(&self) -> UserId {
        self.guardian_id
    }

    pub fn reason(&self) -> &CounselReason {
        &self.reason
    }

    pub fn status(&self) -> CounselRequestStatus {
        self.status
    }

    pub fn institution_id(&self) -> Option<InstitutionId> {
        self.institution_id
    }

    pub fn counselor_id(&self) -> Option<UserId> {
        self.counselor_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn is_requested_by(&self, user: UserId) -> bool {
        self.guardian_id == user
    }

    /// `Pending -> Matched`.
    pub fn assign_institution(
        &mut self,
        institution: InstitutionId,
        now: DateTime<Utc>,
    ) -> Result<(), CounselRequestError> {
        self.transition_to(CounselRequestStatus::Matched, now)?;
        self.institution_id = Some(institution);
        Ok(())
    }

    /// `Matched -> InProgress`.
    pub fn assign_counselor(
        &mut self,
        counselor: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), CounselRequestError> {
        if self.institution_id.is_none() {
            return Err(CounselRequestError::InstitutionNotAssigned);
        }
        self.transition_to(CounselRequestStatus::InProgress, now)?;
        self.counselor_id = Some(counselor);
        Ok(())
    }

    /// `InProgress -> Completed`.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), CounselRequestError> {
        self.transition_to(CounselRequestStatus::Completed, now)
    }

    /// `Pending | Matched -> Cancelled`.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), CounselRequestError> {
        self.transition_to(CounselRequestStatus::Cancelled, now)
    }

    /// Drain queued domain events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn transition_to(
        &mut self,
        to: CounselRequestStatus,
        now: DateTime<Utc>,
    ) -> Result<(), CounselRequestError> {
        let from = self.status;
        if !from.can_transition_to(to) {
            return Err(CounselRequestError::InvalidTransition { from, to });
        }
        self.status = to;
        self.updated_at = now;
        self.events.push(DomainEvent::CounselRequestStatusChanged {
            request_id: self.id,
            from,
            to,
        });
        Ok(())
    }
}
