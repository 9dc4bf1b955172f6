//! Authenticated caller as seen by use cases.

use super::user::UserRole;
use super::{InstitutionId, UserId};

/// Who is performing an operation.
///
/// Built by the inbound adapter from already-authenticated request
/// metadata. Services make every ownership and role decision from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: UserRole,
    pub institution_id: Option<InstitutionId>,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_guardian(&self) -> bool {
        self.role == UserRole::Guardian
    }

    pub fn is_counselor(&self) -> bool {
        self.role == UserRole::Counselor
    }

    /// Whether the actor administers `institution`.
    pub fn administers(&self, institution: InstitutionId) -> bool {
        self.role == UserRole::InstitutionAdmin && self.institution_id == Some(institution)
    }
}
