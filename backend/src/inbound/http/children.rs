//! Child registration and lookup handlers.
//!
//! ```text
//! POST  /api/v1/children
//! GET   /api/v1/children/{child_id}
//! PATCH /api/v1/children/{child_id}
//! GET   /api/v1/guardians/{guardian_id}/children
//! ```

use actix_web::{HttpResponse, get, patch, post, web};

use crate::domain::ports::{ChildPayload, RegisterChildRequest, RenameChildRequest};
use crate::domain::{ChildId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::AuthenticatedActor;
use crate::inbound::http::state::HttpState;

#[post("/children")]
pub async fn register_child(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    payload: web::Json<RegisterChildRequest>,
) -> ApiResult<HttpResponse> {
    let child = state
        .children
        .register_child(actor.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(child))
}

#[get("/children/{child_id}")]
pub async fn get_child(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<ChildId>,
) -> ApiResult<web::Json<ChildPayload>> {
    let child = state
        .children_query
        .get_child(actor.into_inner(), path.into_inner())
        .await?;
    Ok(web::Json(child))
}

#[patch("/children/{child_id}")]
pub async fn rename_child(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<ChildId>,
    payload: web::Json<RenameChildRequest>,
) -> ApiResult<web::Json<ChildPayload>> {
    let child = state
        .children
        .rename_child(actor.into_inner(), path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(child))
}

/// Children of one guardian, oldest first.
#[get("/guardians/{guardian_id}/children")]
pub async fn list_children(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<Vec<ChildPayload>>> {
    let children = state
        .children_query
        .list_children(actor.into_inner(), path.into_inner())
        .await?;
    Ok(web::Json(children))
}
