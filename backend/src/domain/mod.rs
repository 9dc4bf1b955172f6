//! Domain primitives, aggregates, ports and use cases.
//!
//! Purpose: keep every business rule of the case-management backend in one
//! transport-agnostic layer. Value objects validate their input, aggregates
//! own their state transitions, and services orchestrate them through the
//! ports in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: the single failure type returned by every use case.
//! - Value objects in [`value_objects`] and identifiers in [`ids`].
//! - Aggregates: [`Review`], [`Child`], [`CounselRequest`],
//!   [`CounselReport`], [`User`], [`Institution`].
//! - Services implementing the driving ports.

pub mod actor;
pub mod child;
pub mod counsel_report;
pub mod counsel_request;
pub mod error;
mod error_mapping;
pub mod events;
pub mod ids;
pub mod institution;
pub mod ports;
pub mod railway;
pub mod review;
pub mod trace_id;
pub mod user;
pub mod value_objects;

mod child_service;
mod counsel_report_service;
mod counsel_request_service;
mod institution_service;
mod review_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::actor::Actor;
pub use self::child::{Child, ChildError, ChildRecord, Gender, NewChild, Parentage};
pub use self::child_service::ChildService;
pub use self::counsel_report::{
    CounselReport, CounselReportError, CounselReportRecord, CounselReportStatus,
    NewCounselReport,
};
pub use self::counsel_report_service::CounselReportService;
pub use self::counsel_request::{
    CounselRequest, CounselRequestError, CounselRequestRecord, CounselRequestStatus,
    NewCounselRequest,
};
pub use self::counsel_request_service::CounselRequestService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::events::DomainEvent;
pub use self::ids::{ChildId, CounselReportId, CounselRequestId, InstitutionId, ReviewId, UserId};
pub use self::institution::{Institution, InstitutionRecord, NewInstitution};
pub use self::institution_service::InstitutionService;
pub use self::review::{NewReview, Review, ReviewRecord};
pub use self::review_service::ReviewService;
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, User, UserError, UserRecord, UserRole};
pub use self::user_service::UserService;

/// Text that does not name any variant of a stored enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// Convenient result alias for use cases and handlers.
///
/// # Examples
/// ```
/// use carebridge::domain::{ApiResult, Error};
///
/// fn guarded() -> ApiResult<()> {
///     Err(Error::forbidden("작성자만 수정할 수 있습니다"))
/// }
/// assert!(guarded().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
