//! Caller identity extracted from request headers.
//!
//! Authentication happens upstream (gateway or session layer). By the time a
//! request reaches this service the caller is described by three headers:
//!
//! ```text
//! X-User-Id:         <uuid>
//! X-User-Role:       GUARDIAN | COUNSELOR | INSTITUTION_ADMIN | ADMIN
//! X-Institution-Id:  <uuid>   (staff roles only)
//! ```

use std::str::FromStr;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};
use serde_json::json;

use crate::domain::{Actor, Error, InstitutionId, UserId, UserRole};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const INSTITUTION_ID_HEADER: &str = "x-institution-id";

fn header<'a>(req: &'a HttpRequest, name: &'static str) -> Result<Option<&'a str>, Error> {
    req.headers()
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(str::trim)
                .map_err(|_| invalid_header(name))
        })
        .transpose()
}

fn invalid_header(name: &'static str) -> Error {
    Error::unauthorized("인증 정보가 올바르지 않습니다").with_details(json!({
        "header": name,
        "code": "invalid_header",
    }))
}

fn parse<T: FromStr>(raw: &str, name: &'static str) -> Result<T, Error> {
    raw.parse().map_err(|_| invalid_header(name))
}

/// `Ok(None)` when no identity headers are present at all.
fn actor_from_headers(req: &HttpRequest) -> Result<Option<Actor>, Error> {
    let Some(raw_user) = header(req, USER_ID_HEADER)? else {
        return Ok(None);
    };
    let raw_role = header(req, USER_ROLE_HEADER)?.ok_or_else(|| invalid_header(USER_ROLE_HEADER))?;
    let institution_id = header(req, INSTITUTION_ID_HEADER)?
        .map(|raw| parse::<InstitutionId>(raw, INSTITUTION_ID_HEADER))
        .transpose()?;
    Ok(Some(Actor {
        user_id: parse::<UserId>(raw_user, USER_ID_HEADER)?,
        role: parse::<UserRole>(raw_role, USER_ROLE_HEADER)?,
        institution_id,
    }))
}

/// Authenticated caller; rejects the request with 401 when absent.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedActor(pub Actor);

impl AuthenticatedActor {
    pub fn into_inner(self) -> Actor {
        self.0
    }
}

impl FromRequest for AuthenticatedActor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(actor_from_headers(req).and_then(|actor| {
            actor
                .map(Self)
                .ok_or_else(|| Error::unauthorized("로그인이 필요합니다"))
        }))
    }
}

/// Caller identity for endpoints that also serve anonymous requests.
#[derive(Debug, Clone, Copy)]
pub struct MaybeActor(pub Option<Actor>);

impl FromRequest for MaybeActor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(actor_from_headers(req).map(Self))
    }
}
