//! Driving port for child registration and edits.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Actor, ChildId, Error, Gender, InstitutionId, UserId};

/// Serializable child payload, including the age on the configured calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildPayload {
    pub id: ChildId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub age: u32,
    pub gender: Gender,
    pub guardian_id: Option<UserId>,
    pub institution_id: Option<InstitutionId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated registration input. Exactly one of `guardian_id` and
/// `institution_id` must be given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterChildRequest {
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub guardian_id: Option<UserId>,
    #[serde(default)]
    pub institution_id: Option<InstitutionId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameChildRequest {
    pub name: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChildCommand: Send + Sync {
    async fn register_child(
        &self,
        actor: Actor,
        request: RegisterChildRequest,
    ) -> Result<ChildPayload, Error>;

    async fn rename_child(
        &self,
        actor: Actor,
        child_id: ChildId,
        request: RenameChildRequest,
    ) -> Result<ChildPayload, Error>;
}
