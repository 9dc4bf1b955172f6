//! User account aggregate and roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::value_objects::{Email, PasswordHash, PersonName, PhoneNumber};
use super::{InstitutionId, UnknownVariant, UserId};

/// Role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Guardian,
    Counselor,
    InstitutionAdmin,
    Admin,
}

impl UserRole {
    pub const ALL: [Self; 4] = [
        Self::Guardian,
        Self::Counselor,
        Self::InstitutionAdmin,
        Self::Admin,
    ];

    /// Whether accounts with this role must belong to an institution.
    pub fn requires_institution(self) -> bool {
        matches!(self, Self::Counselor | Self::InstitutionAdmin)
    }

    /// Check that `institution_id` is present exactly when the role needs one.
    pub fn check_affiliation(self, institution_id: Option<InstitutionId>) -> Result<(), UserError> {
        match (self.requires_institution(), institution_id) {
            (true, None) => Err(UserError::InstitutionRequired { role: self }),
            (false, Some(_)) => Err(UserError::InstitutionNotAllowed { role: self }),
            _ => Ok(()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guardian => "GUARDIAN",
            Self::Counselor => "COUNSELOR",
            Self::InstitutionAdmin => "INSTITUTION_ADMIN",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_owned()))
    }
}

/// Role and institution pairing violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("{role} 계정은 소속 기관이 필요합니다")]
    InstitutionRequired { role: UserRole },
    #[error("{role} 계정은 기관에 소속될 수 없습니다")]
    InstitutionNotAllowed { role: UserRole },
}

/// Validated input for [`User::create`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub name: PersonName,
    pub phone: Option<PhoneNumber>,
    pub role: UserRole,
    pub institution_id: Option<InstitutionId>,
    pub password_hash: PasswordHash,
}

/// Stored shape used to re-hydrate a [`User`].
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub email: Email,
    pub name: PersonName,
    pub phone: Option<PhoneNumber>,
    pub role: UserRole,
    pub institution_id: Option<InstitutionId>,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registered account.
///
/// ## Invariants
/// - `institution_id` is present exactly when the role requires one.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    name: PersonName,
    phone: Option<PhoneNumber>,
    role: UserRole,
    institution_id: Option<InstitutionId>,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create an account, enforcing the role/institution pairing.
    pub fn create(new: NewUser, now: DateTime<Utc>) -> Result<Self, UserError> {
        new.role.check_affiliation(new.institution_id)?;
        Ok(Self {
            id: UserId::random(),
            email: new.email,
            name: new.name,
            phone: new.phone,
            role: new.role,
            institution_id: new.institution_id,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// Re-hydrate a stored account without validation.
    pub fn restore(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            phone: record.phone,
            role: record.role,
            institution_id: record.institution_id,
            password_hash: record.password_hash,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn institution_id(&self) -> Option<InstitutionId> {
        self.institution_id
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn change_password(&mut self, hash: PasswordHash, now: DateTime<Utc>) {
        self.password_hash = hash;
        self.updated_at = now;
    }

    pub fn update_phone(&mut self, phone: Option<PhoneNumber>, now: DateTime<Utc>) {
        self.phone = phone;
        self.updated_at = now;
    }

    /// Authorization view of this account.
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            role: self.role,
            institution_id: self.institution_id,
        }
    }
}
