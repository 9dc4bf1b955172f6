//! Counsel request lifecycle.
//!
//! A guardian opens a request for one child. A system administrator routes
//! it to an institution, whose administrator then assigns one of the
//! institution's counselors. Institution matching can be assisted by the
//! external recommendation service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::FixedOffset;
use futures_util::future::try_join_all;
use mockable::Clock;
use serde_json::json;
use tracing::warn;

use crate::domain::events;
use crate::domain::ports::{
    AssignCounselorRequest, AssignInstitutionRequest, ChildRepository, CounselRequestCommand,
    CounselRequestPayload, CounselRequestRepository, CounselRequestRepositoryError,
    CreateCounselRequestRequest, InstitutionRecommendationsPayload, InstitutionRepository,
    RecommendationCandidate, RecommendationRequest, RecommendationSource, RecommendedInstitution,
    UserRepository,
};
use crate::domain::railway::combine;
use crate::domain::value_objects::{CounselReason, invalid_field};
use crate::domain::{
    Actor, Child, ChildId, CounselRequest, CounselRequestError, CounselRequestId, Error,
    NewCounselRequest, UserRole,
};

/// Number of candidates requested from the recommendation service.
const RECOMMENDATION_LIMIT: usize = 5;

/// Counsel request service implementing [`CounselRequestCommand`].
#[derive(Clone)]
pub struct CounselRequestService<Q, C, U, I, S: ?Sized> {
    requests: Arc<Q>,
    children: Arc<C>,
    users: Arc<U>,
    institutions: Arc<I>,
    source: Arc<S>,
    clock: Arc<dyn Clock>,
    timezone: FixedOffset,
}

impl<Q, C, U, I, S: ?Sized> CounselRequestService<Q, C, U, I, S> {
    pub fn new(
        requests: Arc<Q>,
        children: Arc<C>,
        users: Arc<U>,
        institutions: Arc<I>,
        source: Arc<S>,
        clock: Arc<dyn Clock>,
        timezone: FixedOffset,
    ) -> Self {
        Self {
            requests,
            children,
            users,
            institutions,
            source,
            clock,
            timezone,
        }
    }
}

fn map_create_error(error: CounselRequestRepositoryError) -> Error {
    match error {
        CounselRequestRepositoryError::Duplicate { .. } => open_request_exists(),
        other => other.into(),
    }
}

fn open_request_exists() -> Error {
    Error::conflict("진행 중인 상담 요청이 이미 있습니다")
}

/// One eligibility rule for the counselor named in an assignment.
fn counselor_rule(holds: bool, code: &'static str, message: &'static str) -> Result<(), Error> {
    if holds {
        Ok(())
    } else {
        Err(Error::invalid_request(message)
            .with_details(json!({ "field": "counselorId", "code": code })))
    }
}

impl<Q, C, U, I, S> CounselRequestService<Q, C, U, I, S>
where
    Q: CounselRequestRepository,
    C: ChildRepository,
    U: UserRepository,
    I: InstitutionRepository,
    S: RecommendationSource + ?Sized,
{
    async fn load(&self, id: &CounselRequestId) -> Result<CounselRequest, Error> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("counsel request {id} not found")))
    }

    async fn load_child(&self, id: &ChildId) -> Result<Child, Error> {
        self.children
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("child {id} not found")))
    }

    async fn persist(&self, mut request: CounselRequest) -> Result<CounselRequestPayload, Error> {
        self.requests.update(&request).await?;
        events::publish(request.take_events());
        Ok(CounselRequestPayload::from(&request))
    }

    async fn recommended(
        &self,
        candidate: RecommendationCandidate,
    ) -> Result<Option<RecommendedInstitution>, Error> {
        let institution = self.institutions.find_by_id(&candidate.institution_id).await?;
        Ok(institution.map(|institution| RecommendedInstitution {
            institution_id: institution.id(),
            name: institution.name().as_str().to_owned(),
            score: candidate.score,
            rationale: candidate.rationale,
        }))
    }
}

#[async_trait]
impl<Q, C, U, I, S> CounselRequestCommand for CounselRequestService<Q, C, U, I, S>
where
    Q: CounselRequestRepository,
    C: ChildRepository,
    U: UserRepository,
    I: InstitutionRepository,
    S: RecommendationSource + ?Sized,
{
    async fn create_request(
        &self,
        actor: Actor,
        request: CreateCounselRequestRequest,
    ) -> Result<CounselRequestPayload, Error> {
        let reason =
            CounselReason::new(&request.reason).map_err(|err| invalid_field("reason", err))?;
        let child = self.load_child(&request.child_id).await?;
        if !actor.is_guardian() || !child.is_guardian(actor.user_id) {
            return Err(Error::forbidden("자신의 아동에 대해서만 상담을 요청할 수 있습니다"));
        }
        if self.requests.has_open_request(&child.id()).await? {
            return Err(open_request_exists());
        }

        let mut counsel_request = CounselRequest::create(
            NewCounselRequest {
                child_id: child.id(),
                guardian_id: actor.user_id,
                reason,
            },
            self.clock.utc(),
        );
        self.requests
            .create(&counsel_request)
            .await
            .map_err(map_create_error)?;
        events::publish(counsel_request.take_events());
        Ok(CounselRequestPayload::from(&counsel_request))
    }

    async fn assign_institution(
        &self,
        actor: Actor,
        request_id: CounselRequestId,
        request: AssignInstitutionRequest,
    ) -> Result<CounselRequestPayload, Error> {
        if !actor.is_admin() {
            return Err(Error::forbidden("시스템 관리자만 기관을 배정할 수 있습니다"));
        }
        let mut counsel_request = self.load(&request_id).await?;
        if !self.institutions.exists(&request.institution_id).await? {
            return Err(Error::not_found(format!(
                "institution {} not found",
                request.institution_id
            )));
        }
        counsel_request.assign_institution(request.institution_id, self.clock.utc())?;
        self.persist(counsel_request).await
    }

    async fn assign_counselor(
        &self,
        actor: Actor,
        request_id: CounselRequestId,
        request: AssignCounselorRequest,
    ) -> Result<CounselRequestPayload, Error> {
        let mut counsel_request = self.load(&request_id).await?;
        let Some(institution_id) = counsel_request.institution_id() else {
            return Err(CounselRequestError::InstitutionNotAssigned.into());
        };
        if !actor.administers(institution_id) {
            return Err(Error::forbidden("배정된 기관의 관리자만 상담사를 지정할 수 있습니다"));
        }

        let counselor_id = request.counselor_id;
        let counselor = self
            .users
            .find_by_id(&counselor_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("counselor {counselor_id} not found")))?;
        combine([
            counselor_rule(
                counselor.role() == UserRole::Counselor,
                "not_counselor",
                "상담사 계정이 아닙니다",
            ),
            counselor_rule(
                counselor.institution_id() == Some(institution_id),
                "other_institution",
                "배정된 기관 소속 상담사가 아닙니다",
            ),
        ])?;

        counsel_request.assign_counselor(request.counselor_id, self.clock.utc())?;
        self.persist(counsel_request).await
    }

    async fn cancel_request(
        &self,
        actor: Actor,
        request_id: CounselRequestId,
    ) -> Result<CounselRequestPayload, Error> {
        let mut counsel_request = self.load(&request_id).await?;
        if !counsel_request.is_requested_by(actor.user_id) {
            return Err(Error::forbidden("요청한 보호자만 취소할 수 있습니다"));
        }
        counsel_request.cancel(self.clock.utc())?;
        self.persist(counsel_request).await
    }

    async fn recommend_institutions(
        &self,
        actor: Actor,
        request_id: CounselRequestId,
    ) -> Result<InstitutionRecommendationsPayload, Error> {
        let counsel_request = self.load(&request_id).await?;
        if !actor.is_admin() && !counsel_request.is_requested_by(actor.user_id) {
            return Err(Error::forbidden("기관 추천을 요청할 권한이 없습니다"));
        }
        let child = self.load_child(&counsel_request.child_id()).await?;

        let query = RecommendationRequest {
            child_age: child.age_at(self.clock.utc(), self.timezone),
            reason: counsel_request.reason().as_str().to_owned(),
            limit: RECOMMENDATION_LIMIT,
        };
        let candidates = self.source.recommend(&query).await.map_err(|err| {
            warn!(error = %err, %request_id, "recommendation service failed");
            Error::service_unavailable("기관 추천 서비스를 사용할 수 없습니다")
        })?;

        let resolved =
            try_join_all(candidates.into_iter().map(|candidate| self.recommended(candidate)))
                .await?;
        Ok(InstitutionRecommendationsPayload {
            request_id,
            candidates: resolved.into_iter().flatten().collect(),
        })
    }
}

#[cfg(test)]
#[path = "counsel_request_service_tests.rs"]
mod tests;
