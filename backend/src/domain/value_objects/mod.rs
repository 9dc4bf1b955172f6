//! Self-validating value objects.
//!
//! Every type here is built through `new`, which trims and checks its input
//! and returns a dedicated validation enum on the first failed rule. The
//! `restore` constructors skip validation and are only visible inside the
//! crate, where the outbound persistence mapping re-hydrates stored rows.

mod address;
mod email;
mod password;
mod phone_number;
mod rating;
mod text;

pub use address::{Address, AddressValidationError, POSTAL_CODE_LEN};
pub use email::{Email, EmailValidationError};
pub use password::{Password, PasswordHash, PasswordValidationError};
pub use phone_number::{PhoneNumber, PhoneNumberValidationError};
pub use rating::{Rating, RatingValidationError};
pub use text::{
    CounselReason, CounselReasonValidationError, InstitutionName, InstitutionNameValidationError,
    PersonName, PersonNameValidationError, ReportBody, ReportBodyValidationError, ReportTitle,
    ReportTitleValidationError, ReviewContent, ReviewContentValidationError,
};

use serde_json::json;

use super::Error;

/// Machine-readable classification shared by value-object validation errors.
pub trait ValidationFailure: std::error::Error {
    /// Stable snake_case code for the violated rule.
    fn code(&self) -> &'static str;
}

/// Convert a value-object failure into an `invalid_request` domain error
/// carrying `{ field, code }` details.
pub(crate) fn invalid_field<E>(field: &'static str, error: E) -> Error
where
    E: ValidationFailure,
{
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": error.code(),
    }))
}
