//! Driving port for account registration and credentials.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Actor, Error, InstitutionId, User, UserId, UserRole};

/// Public account view. The phone number is always masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfilePayload {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub institution_id: Option<InstitutionId>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfilePayload {
    fn from(value: &User) -> Self {
        Self {
            id: value.id(),
            email: value.email().as_str().to_owned(),
            name: value.name().as_str().to_owned(),
            phone: value.phone().map(|p| p.masked()),
            role: value.role(),
            institution_id: value.institution_id(),
            created_at: value.created_at(),
        }
    }
}

/// Unvalidated registration input.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub institution_id: Option<InstitutionId>,
}

impl std::fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("institution_id", &self.institution_id)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangePasswordRequest(<redacted>)")
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Create an account.
    ///
    /// Guardians may self-register (`actor` absent). Counselor and
    /// institution-admin accounts need a system admin or an admin of the
    /// same institution; admin accounts need a system admin.
    async fn register_user(
        &self,
        actor: Option<Actor>,
        request: RegisterUserRequest,
    ) -> Result<UserProfilePayload, Error>;

    /// Replace the password after verifying the current one.
    async fn change_password(
        &self,
        user_id: UserId,
        request: ChangePasswordRequest,
    ) -> Result<(), Error>;
}
