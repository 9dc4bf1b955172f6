//! Account handlers.
//!
//! ```text
//! POST /api/v1/users
//! GET  /api/v1/users/me
//! PUT  /api/v1/users/me/password
//! ```

use actix_web::{HttpResponse, get, post, put, web};

use crate::domain::ports::{ChangePasswordRequest, RegisterUserRequest, UserProfilePayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::{AuthenticatedActor, MaybeActor};
use crate::inbound::http::state::HttpState;

/// Register an account.
///
/// Guardians may sign up anonymously; staff accounts are created by an
/// authenticated administrator, so identity headers are optional here.
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    actor: MaybeActor,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let MaybeActor(actor) = actor;
    let profile = state
        .users
        .register_user(actor, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(profile))
}

#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
) -> ApiResult<web::Json<UserProfilePayload>> {
    let profile = state.users_query.get_profile(actor.0.user_id).await?;
    Ok(web::Json(profile))
}

#[put("/users/me/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    state
        .users
        .change_password(actor.0.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
