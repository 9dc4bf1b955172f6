//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate requests into driving-port calls and map domain
//! errors onto HTTP responses; they hold no business rules of their own.

pub mod actor;
pub mod children;
pub mod counsel_reports;
pub mod counsel_requests;
pub mod error;
pub mod health;
pub mod institutions;
pub mod reviews;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every API handler together with the extractor configuration
/// that renders malformed input as the standard error envelope.
///
/// Mount under the versioned scope:
///
/// ```ignore
/// App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .app_data(error::query_config())
        .service(users::register_user)
        .service(users::current_user)
        .service(users::change_password)
        .service(institutions::register_institution)
        .service(institutions::get_institution)
        .service(reviews::create_review)
        .service(reviews::update_review)
        .service(reviews::delete_review)
        .service(reviews::mark_helpful)
        .service(reviews::list_institution_reviews)
        .service(children::register_child)
        .service(children::get_child)
        .service(children::rename_child)
        .service(children::list_children)
        .service(counsel_requests::create_counsel_request)
        .service(counsel_requests::assign_institution)
        .service(counsel_requests::assign_counselor)
        .service(counsel_requests::cancel_counsel_request)
        .service(counsel_requests::recommend_institutions)
        .service(counsel_reports::create_draft)
        .service(counsel_reports::revise_draft)
        .service(counsel_reports::submit_report)
        .service(counsel_reports::mark_reviewed)
        .service(counsel_reports::approve_report)
        .service(counsel_reports::return_for_revision)
        .service(counsel_reports::get_report);
}
