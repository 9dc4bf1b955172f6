//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ChildCommand, ChildQuery, CounselReportCommand, CounselReportQuery, CounselRequestCommand,
    InstitutionCommand, InstitutionQuery, ReviewCommand, ReviewQuery, UserCommand, UserQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub reviews: Arc<dyn ReviewCommand>,
    pub reviews_query: Arc<dyn ReviewQuery>,
    pub children: Arc<dyn ChildCommand>,
    pub children_query: Arc<dyn ChildQuery>,
    pub counsel_requests: Arc<dyn CounselRequestCommand>,
    pub counsel_reports: Arc<dyn CounselReportCommand>,
    pub counsel_reports_query: Arc<dyn CounselReportQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub institutions: Arc<dyn InstitutionCommand>,
    pub institutions_query: Arc<dyn InstitutionQuery>,
}
