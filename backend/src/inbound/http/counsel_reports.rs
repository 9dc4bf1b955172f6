//! Counsel report handlers.
//!
//! ```text
//! POST /api/v1/counsel-reports
//! PUT  /api/v1/counsel-reports/{report_id}
//! POST /api/v1/counsel-reports/{report_id}/submit
//! POST /api/v1/counsel-reports/{report_id}/review
//! POST /api/v1/counsel-reports/{report_id}/approve
//! POST /api/v1/counsel-reports/{report_id}/return
//! GET  /api/v1/counsel-reports/{report_id}
//! ```

use actix_web::{HttpResponse, get, post, put, web};

use crate::domain::CounselReportId;
use crate::domain::ports::{
    CounselReportPayload, CreateCounselReportRequest, ReturnCounselReportRequest,
    ReviseCounselReportRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::AuthenticatedActor;
use crate::inbound::http::state::HttpState;

type ReportResponse = ApiResult<web::Json<CounselReportPayload>>;

/// Draft a report for the caller's in-progress counsel request.
#[post("/counsel-reports")]
pub async fn create_draft(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    payload: web::Json<CreateCounselReportRequest>,
) -> ApiResult<HttpResponse> {
    let report = state
        .counsel_reports
        .create_draft(actor.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(report))
}

#[put("/counsel-reports/{report_id}")]
pub async fn revise_draft(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<CounselReportId>,
    payload: web::Json<ReviseCounselReportRequest>,
) -> ReportResponse {
    let report = state
        .counsel_reports
        .revise_draft(actor.into_inner(), path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(report))
}

#[post("/counsel-reports/{report_id}/submit")]
pub async fn submit_report(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<CounselReportId>,
) -> ReportResponse {
    let report = state
        .counsel_reports
        .submit_report(actor.into_inner(), path.into_inner())
        .await?;
    Ok(web::Json(report))
}

#[post("/counsel-reports/{report_id}/review")]
pub async fn mark_reviewed(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<CounselReportId>,
) -> ReportResponse {
    let report = state
        .counsel_reports
        .mark_reviewed(actor.into_inner(), path.into_inner())
        .await?;
    Ok(web::Json(report))
}

/// Approve a report; completes the counsel request as well.
#[post("/counsel-reports/{report_id}/approve")]
pub async fn approve_report(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<CounselReportId>,
) -> ReportResponse {
    let report = state
        .counsel_reports
        .approve_report(actor.into_inner(), path.into_inner())
        .await?;
    Ok(web::Json(report))
}

/// Send a report back to its author; the body may be empty.
#[post("/counsel-reports/{report_id}/return")]
pub async fn return_for_revision(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<CounselReportId>,
    payload: Option<web::Json<ReturnCounselReportRequest>>,
) -> ReportResponse {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let report = state
        .counsel_reports
        .return_for_revision(actor.into_inner(), path.into_inner(), request)
        .await?;
    Ok(web::Json(report))
}

/// Guardian view of a report about their child.
#[get("/counsel-reports/{report_id}")]
pub async fn get_report(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<CounselReportId>,
) -> ReportResponse {
    let report = state
        .counsel_reports_query
        .get_for_guardian(actor.into_inner(), path.into_inner())
        .await?;
    Ok(web::Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Actor, ChildId, CounselReportStatus, CounselRequestId, Error, InstitutionId, UserId,
        UserRole,
    };
    use crate::inbound::http::test_utils::{MockPorts, as_actor};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};

    fn counselor() -> Actor {
        Actor {
            user_id: UserId::random(),
            role: UserRole::Counselor,
            institution_id: Some(InstitutionId::random()),
        }
    }

    fn report(status: CounselReportStatus) -> CounselReportPayload {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        CounselReportPayload {
            id: CounselReportId::random(),
            counsel_request_id: CounselRequestId::random(),
            child_id: ChildId::random(),
            counselor_id: UserId::random(),
            title: "1차 상담 결과".to_owned(),
            body: "아동이 새 환경에 잘 적응하고 있습니다.".to_owned(),
            status,
            reviewer_comment: None,
            created_at: at,
            updated_at: at,
            submitted_at: None,
            approved_at: None,
        }
    }

    #[actix_web::test]
    async fn draft_is_created() {
        let mut ports = MockPorts::default();
        ports
            .counsel_reports
            .expect_create_draft()
            .times(1)
            .return_once(|_, _| Ok(report(CounselReportStatus::Draft)));
        let app = actix_test::init_service(ports.into_app()).await;

        let request = as_actor(actix_test::TestRequest::post(), &counselor())
            .uri("/api/v1/counsel-reports")
            .set_json(json!({
                "counselRequestId": CounselRequestId::random(),
                "title": "1차 상담 결과",
                "body": "아동이 새 환경에 잘 적응하고 있습니다."
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("status").and_then(Value::as_str), Some("DRAFT"));
    }

    #[actix_web::test]
    async fn invalid_transition_keeps_conflict_details() {
        let mut ports = MockPorts::default();
        ports.counsel_reports.expect_submit_report().return_once(|_, _| {
            Err(Error::conflict("허용되지 않는 상태 변경입니다").with_details(json!({
                "code": "invalid_transition",
                "from": "APPROVED",
                "to": "SUBMITTED",
            })))
        });
        let app = actix_test::init_service(ports.into_app()).await;

        let request = as_actor(actix_test::TestRequest::post(), &counselor())
            .uri(&format!(
                "/api/v1/counsel-reports/{}/submit",
                CounselReportId::random()
            ))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.pointer("/details/from").and_then(Value::as_str),
            Some("APPROVED")
        );
    }

    #[actix_web::test]
    async fn return_accepts_an_empty_body() {
        let mut ports = MockPorts::default();
        ports
            .counsel_reports
            .expect_return_for_revision()
            .withf(|_, _, request| request.comment.is_none())
            .times(1)
            .return_once(|_, _, _| Ok(report(CounselReportStatus::Draft)));
        let app = actix_test::init_service(ports.into_app()).await;

        let request = as_actor(actix_test::TestRequest::post(), &counselor())
            .uri(&format!(
                "/api/v1/counsel-reports/{}/return",
                CounselReportId::random()
            ))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn return_forwards_comment() {
        let mut ports = MockPorts::default();
        ports
            .counsel_reports
            .expect_return_for_revision()
            .withf(|_, _, request| request.comment.as_deref() == Some("관찰 내용을 보완해 주세요"))
            .times(1)
            .return_once(|_, _, _| Ok(report(CounselReportStatus::Draft)));
        let app = actix_test::init_service(ports.into_app()).await;

        let request = as_actor(actix_test::TestRequest::post(), &counselor())
            .uri(&format!(
                "/api/v1/counsel-reports/{}/return",
                CounselReportId::random()
            ))
            .set_json(json!({ "comment": "관찰 내용을 보완해 주세요" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn guardian_draft_lookup_is_404() {
        let mut ports = MockPorts::default();
        ports
            .counsel_reports_query
            .expect_get_for_guardian()
            .return_once(|_, id| Err(Error::not_found(format!("counsel report {id} not found"))));
        let app = actix_test::init_service(ports.into_app()).await;

        let guardian = Actor {
            user_id: UserId::random(),
            role: UserRole::Guardian,
            institution_id: None,
        };
        let request = as_actor(actix_test::TestRequest::get(), &guardian)
            .uri(&format!("/api/v1/counsel-reports/{}", CounselReportId::random()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
