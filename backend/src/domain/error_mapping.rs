//! Conversions from port and aggregate-rule failures into [`Error`].
//!
//! Repository errors map uniformly: `Connection` becomes
//! `service_unavailable`, `Query` becomes `internal`, and `Duplicate`
//! becomes `conflict`. Services that need a more specific conflict message
//! match on `Duplicate` before falling back to these conversions.

use serde_json::json;
use tracing::{error, warn};

use super::counsel_report::CounselReportError;
use super::counsel_request::CounselRequestError;
use super::ports::{
    ChildRepositoryError, CounselReportRepositoryError, CounselRequestRepositoryError,
    InstitutionRepositoryError, PasswordHasherError, ReviewRepositoryError, UserRepositoryError,
};
use super::{ChildError, Error, UserError};

fn unavailable(port: &'static str, message: &str) -> Error {
    warn!(port, %message, "repository unavailable");
    Error::service_unavailable(format!("{port} repository unavailable"))
}

fn query_failed(port: &'static str, message: &str) -> Error {
    error!(port, %message, "repository query failed");
    Error::internal(format!("{port} repository error: {message}"))
}

macro_rules! map_repository_error {
    ($error:ident, $port:literal, [$($duplicate:ident)?]) => {
        impl From<$error> for Error {
            fn from(value: $error) -> Self {
                match value {
                    $error::Connection { message } => unavailable($port, &message),
                    $error::Query { message } => query_failed($port, &message),
                    $(
                        $error::$duplicate { message } => {
                            Error::conflict(format!("{} already exists", $port))
                                .with_details(json!({ "code": "duplicate", "reason": message }))
                        }
                    )?
                }
            }
        }
    };
}

map_repository_error!(ReviewRepositoryError, "review", [Duplicate]);
map_repository_error!(ChildRepositoryError, "child", []);
map_repository_error!(CounselReportRepositoryError, "counsel report", [Duplicate]);
map_repository_error!(CounselRequestRepositoryError, "counsel request", [Duplicate]);
map_repository_error!(UserRepositoryError, "user", [Duplicate]);
map_repository_error!(InstitutionRepositoryError, "institution", []);

impl From<PasswordHasherError> for Error {
    fn from(value: PasswordHasherError) -> Self {
        error!(error = %value, "password hasher failed");
        Error::internal("password hashing failed")
    }
}

impl From<CounselReportError> for Error {
    fn from(value: CounselReportError) -> Self {
        let details = match &value {
            CounselReportError::InvalidTransition { from, to } => json!({
                "code": "invalid_transition",
                "from": from.as_str(),
                "to": to.as_str(),
            }),
            CounselReportError::NotEditable { status } => json!({
                "code": "not_editable",
                "status": status.as_str(),
            }),
        };
        Error::conflict(value.to_string()).with_details(details)
    }
}

impl From<CounselRequestError> for Error {
    fn from(value: CounselRequestError) -> Self {
        let details = match &value {
            CounselRequestError::InvalidTransition { from, to } => json!({
                "code": "invalid_transition",
                "from": from.as_str(),
                "to": to.as_str(),
            }),
            CounselRequestError::InstitutionNotAssigned => json!({
                "code": "institution_not_assigned",
            }),
        };
        Error::conflict(value.to_string()).with_details(details)
    }
}

impl From<ChildError> for Error {
    fn from(value: ChildError) -> Self {
        let (field, code) = match value {
            ChildError::ParentageMissing => ("parentage", "missing"),
            ChildError::ParentageConflict => ("parentage", "conflict"),
            ChildError::BirthDateInFuture => ("birthDate", "in_future"),
        };
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": field, "code": code }))
    }
}

impl From<UserError> for Error {
    fn from(value: UserError) -> Self {
        let code = match value {
            UserError::InstitutionRequired { .. } => "required",
            UserError::InstitutionNotAllowed { .. } => "not_allowed",
        };
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": "institutionId", "code": code }))
    }
}
