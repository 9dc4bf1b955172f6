//! Driving port for counsel request routing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Actor, ChildId, CounselRequest, CounselRequestId, CounselRequestStatus, Error, InstitutionId,
    UserId,
};

/// Serializable counsel request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounselRequestPayload {
    pub id: CounselRequestId,
    pub child_id: ChildId,
    pub guardian_id: UserId,
    pub reason: String,
    pub status: CounselRequestStatus,
    pub institution_id: Option<InstitutionId>,
    pub counselor_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CounselRequest> for CounselRequestPayload {
    fn from(value: &CounselRequest) -> Self {
        Self {
            id: value.id(),
            child_id: value.child_id(),
            guardian_id: value.guardian_id(),
            reason: value.reason().as_str().to_owned(),
            status: value.status(),
            institution_id: value.institution_id(),
            counselor_id: value.counselor_id(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCounselRequestRequest {
    pub child_id: ChildId,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignInstitutionRequest {
    pub institution_id: InstitutionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCounselorRequest {
    pub counselor_id: UserId,
}

/// One recommended institution that is known to this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedInstitution {
    pub institution_id: InstitutionId,
    pub name: String,
    pub score: f64,
    pub rationale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionRecommendationsPayload {
    pub request_id: CounselRequestId,
    pub candidates: Vec<RecommendedInstitution>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounselRequestCommand: Send + Sync {
    /// Open a request for one of the guardian's children.
    async fn create_request(
        &self,
        actor: Actor,
        request: CreateCounselRequestRequest,
    ) -> Result<CounselRequestPayload, Error>;

    /// Route a pending request to an institution. System admins only.
    async fn assign_institution(
        &self,
        actor: Actor,
        request_id: CounselRequestId,
        request: AssignInstitutionRequest,
    ) -> Result<CounselRequestPayload, Error>;

    /// Assign a counselor of the matched institution.
    async fn assign_counselor(
        &self,
        actor: Actor,
        request_id: CounselRequestId,
        request: AssignCounselorRequest,
    ) -> Result<CounselRequestPayload, Error>;

    /// Withdraw a request that has not started. Owning guardian only.
    async fn cancel_request(
        &self,
        actor: Actor,
        request_id: CounselRequestId,
    ) -> Result<CounselRequestPayload, Error>;

    /// Ask the external service for suitable institutions.
    async fn recommend_institutions(
        &self,
        actor: Actor,
        request_id: CounselRequestId,
    ) -> Result<InstitutionRecommendationsPayload, Error>;
}
