//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::TestRequest;
use actix_web::{App, web};

use super::actor::{INSTITUTION_ID_HEADER, USER_ID_HEADER, USER_ROLE_HEADER};
use super::state::HttpState;
use crate::domain::Actor;
use crate::domain::ports::{
    MockChildCommand, MockChildQuery, MockCounselReportCommand, MockCounselReportQuery,
    MockCounselRequestCommand, MockInstitutionCommand, MockInstitutionQuery, MockReviewCommand,
    MockReviewQuery, MockUserCommand, MockUserQuery,
};

/// Driving-port mocks; unset expectations fail the test when called.
#[derive(Default)]
pub struct MockPorts {
    pub reviews: MockReviewCommand,
    pub reviews_query: MockReviewQuery,
    pub children: MockChildCommand,
    pub children_query: MockChildQuery,
    pub counsel_requests: MockCounselRequestCommand,
    pub counsel_reports: MockCounselReportCommand,
    pub counsel_reports_query: MockCounselReportQuery,
    pub users: MockUserCommand,
    pub users_query: MockUserQuery,
    pub institutions: MockInstitutionCommand,
    pub institutions_query: MockInstitutionQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            reviews: Arc::new(self.reviews),
            reviews_query: Arc::new(self.reviews_query),
            children: Arc::new(self.children),
            children_query: Arc::new(self.children_query),
            counsel_requests: Arc::new(self.counsel_requests),
            counsel_reports: Arc::new(self.counsel_reports),
            counsel_reports_query: Arc::new(self.counsel_reports_query),
            users: Arc::new(self.users),
            users_query: Arc::new(self.users_query),
            institutions: Arc::new(self.institutions),
            institutions_query: Arc::new(self.institutions_query),
        }
    }

    /// App serving every API route against these mocks.
    pub fn into_app(
        self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.into_state()))
            .service(web::scope("/api/v1").configure(super::configure))
    }
}

/// Attach identity headers describing `actor`.
pub fn as_actor(request: TestRequest, actor: &Actor) -> TestRequest {
    let request = request
        .insert_header((USER_ID_HEADER, actor.user_id.to_string()))
        .insert_header((USER_ROLE_HEADER, actor.role.as_str()));
    match actor.institution_id {
        Some(institution_id) => {
            request.insert_header((INSTITUTION_ID_HEADER, institution_id.to_string()))
        }
        None => request,
    }
}
