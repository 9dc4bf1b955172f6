//! Harness driving the assembled application over the memory adapters.
//!
//! Integration tests compile as separate crates, so each one includes this
//! file with `#[path]`.

use std::time::Duration;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::web;
use carebridge::config::ServerSettings;
use carebridge::inbound::http::actor::{INSTITUTION_ID_HEADER, USER_ID_HEADER, USER_ROLE_HEADER};
use carebridge::inbound::http::health::HealthState;
use carebridge::server::{MemoryRepositories, build_app, build_http_state};
use chrono::FixedOffset;
use serde_json::Value;
use tokio::runtime::Handle;
use uuid::Uuid;

/// Settings with every external service disabled.
pub fn settings() -> ServerSettings {
    ServerSettings {
        bind_addr: "127.0.0.1:0".parse().expect("socket address"),
        timezone: FixedOffset::east_opt(9 * 3600).expect("KST offset"),
        recommendation_url: None,
        report_generator_url: None,
        http_timeout: Duration::from_secs(1),
    }
}

/// Initialise the full application, probes included.
pub async fn init_app(
    settings: ServerSettings,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let state = build_http_state(&settings, &MemoryRepositories::default(), Handle::current())
        .expect("http state");
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    test::init_service(build_app(health, web::Data::new(state))).await
}

/// Caller identity forwarded by the upstream gateway.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: &'static str,
    pub institution_id: Option<Uuid>,
}

impl Caller {
    pub fn admin() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            role: "ADMIN",
            institution_id: None,
        }
    }

    pub fn institution_admin(institution_id: Uuid) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            role: "INSTITUTION_ADMIN",
            institution_id: Some(institution_id),
        }
    }

    pub fn guardian(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: "GUARDIAN",
            institution_id: None,
        }
    }

    pub fn counselor(user_id: Uuid, institution_id: Uuid) -> Self {
        Self {
            user_id,
            role: "COUNSELOR",
            institution_id: Some(institution_id),
        }
    }

    /// Attach this identity to `request`.
    pub fn sign(&self, request: TestRequest) -> TestRequest {
        let request = request
            .insert_header((USER_ID_HEADER, self.user_id.to_string()))
            .insert_header((USER_ROLE_HEADER, self.role));
        match self.institution_id {
            Some(id) => request.insert_header((INSTITUTION_ID_HEADER, id.to_string())),
            None => request,
        }
    }
}

/// Call the app and decode the body; empty bodies decode as `Null`.
pub async fn call<S>(app: &S, request: TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice(&body).expect("JSON response body");
    (status, json)
}

/// Read a UUID field from a response body.
pub fn id_of(body: &Value, field: &str) -> Uuid {
    body.get(field)
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_else(|| panic!("`{field}` missing from {body}"))
}

pub fn str_of<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str)
}
