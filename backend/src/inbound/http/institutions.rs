//! Institution handlers.
//!
//! ```text
//! POST /api/v1/institutions
//! GET  /api/v1/institutions/{institution_id}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::InstitutionId;
use crate::domain::ports::{InstitutionPayload, RegisterInstitutionRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::AuthenticatedActor;
use crate::inbound::http::state::HttpState;

#[post("/institutions")]
pub async fn register_institution(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    payload: web::Json<RegisterInstitutionRequest>,
) -> ApiResult<HttpResponse> {
    let institution = state
        .institutions
        .register_institution(actor.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(institution))
}

/// Public institution details.
#[get("/institutions/{institution_id}")]
pub async fn get_institution(
    state: web::Data<HttpState>,
    path: web::Path<InstitutionId>,
) -> ApiResult<web::Json<InstitutionPayload>> {
    let institution = state
        .institutions_query
        .get_institution(path.into_inner())
        .await?;
    Ok(web::Json(institution))
}
