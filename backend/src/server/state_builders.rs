//! Builders wiring memory repositories, external clients and services into
//! the HTTP adapter state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::config::ServerSettings;
use crate::domain::ports::{RecommendationSource, ReportGenerator};
use crate::domain::{
    ChildService, CounselReportService, CounselRequestService, InstitutionService,
    ReviewService, UserService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    MemoryChildRepository, MemoryCounselReportRepository, MemoryCounselRequestRepository,
    MemoryInstitutionRepository, MemoryReviewRepository, MemoryUserRepository,
};
use crate::outbound::recommendation::{DisabledRecommendationSource, RecommendationHttpSource};
use crate::outbound::report_generator::{DisabledReportGenerator, ReportGeneratorHttpClient};
use crate::outbound::{Argon2PasswordHasher, HttpClientError, TokioBackgroundDispatcher};

/// In-memory repositories shared by every service.
#[derive(Clone, Default)]
pub struct MemoryRepositories {
    pub reviews: Arc<MemoryReviewRepository>,
    pub children: Arc<MemoryChildRepository>,
    pub counsel_requests: Arc<MemoryCounselRequestRepository>,
    pub counsel_reports: Arc<MemoryCounselReportRepository>,
    pub users: Arc<MemoryUserRepository>,
    pub institutions: Arc<MemoryInstitutionRepository>,
}

fn recommendation_source(
    settings: &ServerSettings,
) -> Result<Arc<dyn RecommendationSource>, HttpClientError> {
    match &settings.recommendation_url {
        Some(url) => {
            info!(%url, "institution recommendations enabled");
            Ok(Arc::new(RecommendationHttpSource::new(
                url,
                settings.http_timeout,
            )?))
        }
        None => {
            warn!("no recommendation endpoint configured; recommendations unavailable");
            Ok(Arc::new(DisabledRecommendationSource))
        }
    }
}

fn report_generator(
    settings: &ServerSettings,
) -> Result<Arc<dyn ReportGenerator>, HttpClientError> {
    match &settings.report_generator_url {
        Some(url) => {
            info!(%url, "report generation enabled");
            Ok(Arc::new(ReportGeneratorHttpClient::new(
                url,
                settings.http_timeout,
            )?))
        }
        None => {
            warn!("no report generator configured; approved reports are not rendered");
            Ok(Arc::new(DisabledReportGenerator))
        }
    }
}

/// Build the handler state over `repositories`.
///
/// Best-effort work is spawned on `runtime`, whose failure channel is
/// drained into the log.
///
/// # Errors
/// Returns [`HttpClientError`] when an outbound HTTP client cannot be built.
pub fn build_http_state(
    settings: &ServerSettings,
    repositories: &MemoryRepositories,
    runtime: Handle,
) -> Result<HttpState, HttpClientError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let repos = repositories.clone();
    let dispatcher = Arc::new(TokioBackgroundDispatcher::with_logging(runtime));

    let reviews = Arc::new(ReviewService::new(
        Arc::clone(&repos.reviews),
        Arc::clone(&repos.institutions),
        Arc::clone(&repos.users),
        Arc::clone(&clock),
    ));
    let children = Arc::new(ChildService::new(
        Arc::clone(&repos.children),
        Arc::clone(&repos.users),
        Arc::clone(&repos.institutions),
        Arc::clone(&clock),
        settings.timezone,
    ));
    let counsel_requests = Arc::new(CounselRequestService::new(
        Arc::clone(&repos.counsel_requests),
        Arc::clone(&repos.children),
        Arc::clone(&repos.users),
        Arc::clone(&repos.institutions),
        recommendation_source(settings)?,
        Arc::clone(&clock),
        settings.timezone,
    ));
    let counsel_reports = Arc::new(CounselReportService::new(
        Arc::clone(&repos.counsel_reports),
        Arc::clone(&repos.counsel_requests),
        Arc::clone(&repos.children),
        dispatcher,
        report_generator(settings)?,
        Arc::clone(&clock),
    ));
    let users = Arc::new(UserService::new(
        Arc::clone(&repos.users),
        Arc::clone(&repos.institutions),
        Arc::new(Argon2PasswordHasher),
        Arc::clone(&clock),
    ));
    let institutions = Arc::new(InstitutionService::new(repos.institutions, clock));

    Ok(HttpState {
        reviews: reviews.clone(),
        reviews_query: reviews,
        children: children.clone(),
        children_query: children,
        counsel_requests,
        counsel_reports: counsel_reports.clone(),
        counsel_reports_query: counsel_reports,
        users: users.clone(),
        users_query: users,
        institutions: institutions.clone(),
        institutions_query: institutions,
    })
}
