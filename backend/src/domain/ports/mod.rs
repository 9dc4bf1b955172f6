//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, external services, the background dispatcher)
//! are implemented in `outbound`. Driving ports (`*Command`, `*Query`) are
//! implemented by the services in `domain` and consumed by `inbound`.

mod macros;
pub(crate) use macros::define_port_error;

mod background_dispatcher;
mod child_command;
mod child_query;
mod child_repository;
mod counsel_report_command;
mod counsel_report_query;
mod counsel_report_repository;
mod counsel_request_command;
mod counsel_request_repository;
mod institution_command;
mod institution_query;
mod institution_repository;
mod password_hasher;
mod recommendation_source;
mod report_generator;
mod review_command;
mod review_query;
mod review_repository;
mod user_command;
mod user_query;
mod user_repository;

#[cfg(test)]
pub use background_dispatcher::MockBackgroundDispatcher;
pub use background_dispatcher::{BackgroundDispatcher, BestEffortFailure, BestEffortTask};
#[cfg(test)]
pub use child_command::MockChildCommand;
pub use child_command::{ChildCommand, ChildPayload, RegisterChildRequest, RenameChildRequest};
#[cfg(test)]
pub use child_query::MockChildQuery;
pub use child_query::ChildQuery;
#[cfg(test)]
pub use child_repository::MockChildRepository;
pub use child_repository::{ChildRepository, ChildRepositoryError};
#[cfg(test)]
pub use counsel_report_command::MockCounselReportCommand;
pub use counsel_report_command::{
    CounselReportCommand, CounselReportPayload, CreateCounselReportRequest,
    ReturnCounselReportRequest, ReviseCounselReportRequest,
};
#[cfg(test)]
pub use counsel_report_query::MockCounselReportQuery;
pub use counsel_report_query::CounselReportQuery;
#[cfg(test)]
pub use counsel_report_repository::MockCounselReportRepository;
pub use counsel_report_repository::{CounselReportRepository, CounselReportRepositoryError};
#[cfg(test)]
pub use counsel_request_command::MockCounselRequestCommand;
pub use counsel_request_command::{
    AssignCounselorRequest, AssignInstitutionRequest, CounselRequestCommand,
    CounselRequestPayload, CreateCounselRequestRequest, InstitutionRecommendationsPayload,
    RecommendedInstitution,
};
#[cfg(test)]
pub use counsel_request_repository::MockCounselRequestRepository;
pub use counsel_request_repository::{CounselRequestRepository, CounselRequestRepositoryError};
#[cfg(test)]
pub use institution_command::MockInstitutionCommand;
pub use institution_command::{InstitutionCommand, InstitutionPayload, RegisterInstitutionRequest};
#[cfg(test)]
pub use institution_query::MockInstitutionQuery;
pub use institution_query::InstitutionQuery;
#[cfg(test)]
pub use institution_repository::MockInstitutionRepository;
pub use institution_repository::{InstitutionRepository, InstitutionRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use recommendation_source::MockRecommendationSource;
pub use recommendation_source::{
    RecommendationCandidate, RecommendationRequest, RecommendationSource,
    RecommendationSourceError,
};
#[cfg(test)]
pub use report_generator::MockReportGenerator;
pub use report_generator::{ReportGenerator, ReportGeneratorError};
#[cfg(test)]
pub use review_command::MockReviewCommand;
pub use review_command::{CreateReviewRequest, ReviewCommand, ReviewPayload, UpdateReviewRequest};
#[cfg(test)]
pub use review_query::MockReviewQuery;
pub use review_query::{InstitutionReviewItem, InstitutionReviewsPayload, ReviewQuery};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::{ChangePasswordRequest, RegisterUserRequest, UserCommand, UserProfilePayload};
#[cfg(test)]
pub use user_query::MockUserQuery;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
