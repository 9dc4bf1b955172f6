//! Counsel request handlers.
//!
//! ```text
//! POST /api/v1/counsel-requests
//! POST /api/v1/counsel-requests/{request_id}/institution
//! POST /api/v1/counsel-requests/{request_id}/counselor
//! POST /api/v1/counsel-requests/{request_id}/cancel
//! GET  /api/v1/counsel-requests/{request_id}/recommendations
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::CounselRequestId;
use crate::domain::ports::{
    AssignCounselorRequest, AssignInstitutionRequest, CounselRequestPayload,
    CreateCounselRequestRequest, InstitutionRecommendationsPayload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::AuthenticatedActor;
use crate::inbound::http::state::HttpState;

#[post("/counsel-requests")]
pub async fn create_counsel_request(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    payload: web::Json<CreateCounselRequestRequest>,
) -> ApiResult<HttpResponse> {
    let request = state
        .counsel_requests
        .create_request(actor.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(request))
}

#[post("/counsel-requests/{request_id}/institution")]
pub async fn assign_institution(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<CounselRequestId>,
    payload: web::Json<AssignInstitutionRequest>,
) -> ApiResult<web::Json<CounselRequestPayload>> {
    let request = state
        .counsel_requests
        .assign_institution(actor.into_inner(), path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(request))
}

#[post("/counsel-requests/{request_id}/counselor")]
pub async fn assign_counselor(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<CounselRequestId>,
    payload: web::Json<AssignCounselorRequest>,
) -> ApiResult<web::Json<CounselRequestPayload>> {
    let request = state
        .counsel_requests
        .assign_counselor(actor.into_inner(), path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(request))
}

#[post("/counsel-requests/{request_id}/cancel")]
pub async fn cancel_counsel_request(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<CounselRequestId>,
) -> ApiResult<web::Json<CounselRequestPayload>> {
    let request = state
        .counsel_requests
        .cancel_request(actor.into_inner(), path.into_inner())
        .await?;
    Ok(web::Json(request))
}

/// Ranked institutions suggested by the matching service.
#[get("/counsel-requests/{request_id}/recommendations")]
pub async fn recommend_institutions(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<CounselRequestId>,
) -> ApiResult<web::Json<InstitutionRecommendationsPayload>> {
    let recommendations = state
        .counsel_requests
        .recommend_institutions(actor.into_inner(), path.into_inner())
        .await?;
    Ok(web::Json(recommendations))
}
