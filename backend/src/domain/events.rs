//! Domain events queued by aggregates.
//!
//! Aggregates record events while they change state; services drain them
//! with `take_events()` once the change is persisted and hand them to
//! [`publish`], which emits one structured log event per domain event.

use tracing::info;

use super::counsel_report::CounselReportStatus;
use super::counsel_request::CounselRequestStatus;
use super::{CounselReportId, CounselRequestId, InstitutionId, ReviewId, TraceId, UserId};

/// Something that happened to an aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    /// A guardian posted a review.
    ReviewPosted {
        review_id: ReviewId,
        institution_id: InstitutionId,
        author_id: UserId,
        rating: u8,
    },
    /// A counsel report moved along its status lattice.
    CounselReportStatusChanged {
        report_id: CounselReportId,
        from: CounselReportStatus,
        to: CounselReportStatus,
    },
    /// A counsel request moved along its lifecycle.
    CounselRequestStatusChanged {
        request_id: CounselRequestId,
        from: CounselRequestStatus,
        to: CounselRequestStatus,
    },
}

impl DomainEvent {
    /// Stable event name used as the log `event` field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReviewPosted { .. } => "review_posted",
            Self::CounselReportStatusChanged { .. } => "counsel_report_status_changed",
            Self::CounselRequestStatusChanged { .. } => "counsel_request_status_changed",
        }
    }
}

/// Emit drained events as structured log records.
pub fn publish(events: impl IntoIterator<Item = DomainEvent>) {
    let trace_id = TraceId::current().map(|id| id.to_string());
    for event in events {
        match &event {
            DomainEvent::ReviewPosted {
                review_id,
                institution_id,
                author_id,
                rating,
            } => info!(
                event = event.name(),
                trace_id = trace_id.as_deref(),
                %review_id,
                %institution_id,
                %author_id,
                rating,
                "domain event"
            ),
            DomainEvent::CounselReportStatusChanged {
                report_id,
                from,
                to,
            } => info!(
                event = event.name(),
                trace_id = trace_id.as_deref(),
                %report_id,
                from = from.as_str(),
                to = to.as_str(),
                "domain event"
            ),
            DomainEvent::CounselRequestStatusChanged {
                request_id,
                from,
                to,
            } => info!(
                event = event.name(),
                trace_id = trace_id.as_deref(),
                %request_id,
                from = from.as_str(),
                to = to.as_str(),
                "domain event"
            ),
        }
    }
}
