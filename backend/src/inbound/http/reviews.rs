//! Institution review HTTP handlers.
//!
//! ```text
//! POST   /api/v1/reviews
//! PATCH  /api/v1/reviews/{review_id}
//! DELETE /api/v1/reviews/{review_id}
//! POST   /api/v1/reviews/{review_id}/helpful
//! GET    /api/v1/institutions/{institution_id}/reviews
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::domain::ports::{
    CreateReviewRequest, InstitutionReviewsPayload, ReviewPayload, UpdateReviewRequest,
};
use crate::domain::{InstitutionId, ReviewId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::AuthenticatedActor;
use crate::inbound::http::state::HttpState;

/// Write a review of an institution as the authenticated guardian.
#[post("/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    payload: web::Json<CreateReviewRequest>,
) -> ApiResult<HttpResponse> {
    let review = state
        .reviews
        .create_review(actor.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(review))
}

/// Change rating and/or content of the caller's own review.
#[patch("/reviews/{review_id}")]
pub async fn update_review(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<ReviewId>,
    payload: web::Json<UpdateReviewRequest>,
) -> ApiResult<web::Json<ReviewPayload>> {
    let review = state
        .reviews
        .update_review(actor.into_inner(), path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(review))
}

#[delete("/reviews/{review_id}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<ReviewId>,
) -> ApiResult<HttpResponse> {
    state
        .reviews
        .delete_review(actor.into_inner(), path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/reviews/{review_id}/helpful")]
pub async fn mark_helpful(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<ReviewId>,
) -> ApiResult<web::Json<ReviewPayload>> {
    let review = state
        .reviews
        .mark_helpful(actor.into_inner(), path.into_inner())
        .await?;
    Ok(web::Json(review))
}

/// Public listing of an institution's reviews with the average rating.
#[get("/institutions/{institution_id}/reviews")]
pub async fn list_institution_reviews(
    state: web::Data<HttpState>,
    path: web::Path<InstitutionId>,
) -> ApiResult<web::Json<InstitutionReviewsPayload>> {
    let reviews = state
        .reviews_query
        .list_institution_reviews(path.into_inner())
        .await?;
    Ok(web::Json(reviews))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Actor, Error, UserId, UserRole};
    use crate::inbound::http::test_utils::{MockPorts, as_actor};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};

    fn guardian() -> Actor {
        Actor {
            user_id: UserId::random(),
            role: UserRole::Guardian,
            institution_id: None,
        }
    }

    fn payload(author: UserId, institution: InstitutionId) -> ReviewPayload {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        ReviewPayload {
            id: ReviewId::random(),
            institution_id: institution,
            author_id: author,
            rating: 4,
            content: "선생님들이 아이를 세심하게 돌봐 주십니다".to_owned(),
            helpful_count: 0,
            created_at: at,
            updated_at: at,
        }
    }

    #[actix_web::test]
    async fn create_returns_created_review() {
        let actor = guardian();
        let institution = InstitutionId::random();
        let mut ports = MockPorts::default();
        ports
            .reviews
            .expect_create_review()
            .withf(move |caller, request| {
                caller.user_id == actor.user_id
                    && request.institution_id == institution
                    && request.rating == 4
            })
            .times(1)
            .return_once(move |caller, _| Ok(payload(caller.user_id, institution)));
        let app = actix_test::init_service(ports.into_app()).await;

        let request = as_actor(actix_test::TestRequest::post(), &actor)
            .uri("/api/v1/reviews")
            .set_json(json!({
                "institutionId": institution,
                "rating": 4,
                "content": "선생님들이 아이를 세심하게 돌봐 주십니다"
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("rating").and_then(Value::as_u64), Some(4));
        assert_eq!(body.get("helpfulCount").and_then(Value::as_u64), Some(0));
    }

    #[actix_web::test]
    async fn anonymous_create_is_unauthorized_before_the_service() {
        let mut ports = MockPorts::default();
        ports.reviews.expect_create_review().times(0);
        let app = actix_test::init_service(ports.into_app()).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/reviews")
            .set_json(json!({
                "institutionId": InstitutionId::random(),
                "rating": 4,
                "content": "선생님들이 아이를 세심하게 돌봐 주십니다"
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn forbidden_update_maps_to_403() {
        let mut ports = MockPorts::default();
        ports
            .reviews
            .expect_update_review()
            .return_once(|_, _, _| Err(Error::forbidden("작성자만 수정할 수 있습니다")));
        let app = actix_test::init_service(ports.into_app()).await;

        let request = as_actor(actix_test::TestRequest::patch(), &guardian())
            .uri(&format!("/api/v1/reviews/{}", ReviewId::random()))
            .set_json(json!({ "rating": 1 }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn delete_returns_no_content() {
        let mut ports = MockPorts::default();
        ports
            .reviews
            .expect_delete_review()
            .times(1)
            .return_once(|_, _| Ok(()));
        let app = actix_test::init_service(ports.into_app()).await;

        let request = as_actor(actix_test::TestRequest::delete(), &guardian())
            .uri(&format!("/api/v1/reviews/{}", ReviewId::random()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn listing_is_public() {
        let institution = InstitutionId::random();
        let mut ports = MockPorts::default();
        ports
            .reviews_query
            .expect_list_institution_reviews()
            .withf(move |id| *id == institution)
            .return_once(move |_| {
                Ok(InstitutionReviewsPayload {
                    institution_id: institution,
                    review_count: 0,
                    average_rating: None,
                    reviews: Vec::new(),
                })
            });
        let app = actix_test::init_service(ports.into_app()).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/institutions/{institution}/reviews"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("reviewCount").and_then(Value::as_u64), Some(0));
        assert!(body.get("averageRating").is_some_and(Value::is_null));
    }
}
