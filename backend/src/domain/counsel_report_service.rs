//! Counsel report drafting, review and approval.
//!
//! The counselor assigned to an in-progress request writes one report for
//! it and submits it. The administrator of the request's institution then
//! reviews, approves or returns it. Approval completes the counsel request
//! and schedules document generation as best-effort background work.
//!
//! Every status change goes through the aggregate's transition table before
//! anything is written, so an illegal move never reaches a repository.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::events;
use crate::domain::ports::{
    BackgroundDispatcher, BestEffortTask, ChildRepository, CounselReportCommand,
    CounselReportPayload, CounselReportQuery, CounselReportRepository,
    CounselReportRepositoryError, CounselRequestRepository, CreateCounselReportRequest,
    ReportGenerator, ReturnCounselReportRequest, ReviseCounselReportRequest,
};
use crate::domain::railway::zip;
use crate::domain::value_objects::{ReportBody, ReportTitle, invalid_field};
use crate::domain::{
    Actor, CounselReport, CounselReportId, CounselRequest, CounselRequestId,
    CounselRequestStatus, Error, NewCounselReport,
};

/// Name under which report generation is dispatched.
pub(crate) const GENERATE_REPORT_TASK: &str = "generate_counsel_report";

/// Counsel report service implementing [`CounselReportCommand`] and
/// [`CounselReportQuery`].
#[derive(Clone)]
pub struct CounselReportService<P, Q, C, D, G: ?Sized> {
    reports: Arc<P>,
    requests: Arc<Q>,
    children: Arc<C>,
    dispatcher: Arc<D>,
    generator: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<P, Q, C, D, G: ?Sized> CounselReportService<P, Q, C, D, G> {
    pub fn new(
        reports: Arc<P>,
        requests: Arc<Q>,
        children: Arc<C>,
        dispatcher: Arc<D>,
        generator: Arc<G>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reports,
            requests,
            children,
            dispatcher,
            generator,
            clock,
        }
    }
}

fn map_create_error(error: CounselReportRepositoryError) -> Error {
    match error {
        CounselReportRepositoryError::Duplicate { .. } => report_exists(),
        other => other.into(),
    }
}

fn report_exists() -> Error {
    Error::conflict("이미 작성된 상담 보고서가 있습니다")
}

fn validate_content(title: &str, body: &str) -> Result<(ReportTitle, ReportBody), Error> {
    zip(
        ReportTitle::new(title).map_err(|err| invalid_field("title", err)),
        ReportBody::new(body).map_err(|err| invalid_field("body", err)),
    )
}

impl<P, Q, C, D, G> CounselReportService<P, Q, C, D, G>
where
    P: CounselReportRepository,
    Q: CounselRequestRepository,
    C: ChildRepository,
    D: BackgroundDispatcher,
    G: ReportGenerator + ?Sized + 'static,
{
    async fn load(&self, id: &CounselReportId) -> Result<CounselReport, Error> {
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("counsel report {id} not found")))
    }

    async fn load_request(&self, id: &CounselRequestId) -> Result<CounselRequest, Error> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("counsel request {id} not found")))
    }

    /// Load a report as its author, failing with Forbidden for anyone else.
    async fn load_authored(
        &self,
        actor: &Actor,
        id: &CounselReportId,
    ) -> Result<CounselReport, Error> {
        let report = self.load(id).await?;
        if report.is_author(actor.user_id) {
            Ok(report)
        } else {
            Err(Error::forbidden("작성한 상담사만 보고서를 변경할 수 있습니다"))
        }
    }

    /// Load a report and its request as an administrator of the request's
    /// institution.
    async fn load_for_review(
        &self,
        actor: &Actor,
        id: &CounselReportId,
    ) -> Result<(CounselReport, CounselRequest), Error> {
        let report = self.load(id).await?;
        let request = self.load_request(&report.counsel_request_id()).await?;
        let reviewer = request
            .institution_id()
            .is_some_and(|institution| actor.administers(institution));
        if !reviewer {
            return Err(Error::forbidden("담당 기관의 관리자만 보고서를 검토할 수 있습니다"));
        }
        Ok((report, request))
    }

    async fn persist(&self, mut report: CounselReport) -> Result<CounselReportPayload, Error> {
        self.reports.update(&report).await?;
        events::publish(report.take_events());
        Ok(CounselReportPayload::from(&report))
    }

    fn schedule_generation(&self, report_id: CounselReportId) {
        let generator = Arc::clone(&self.generator);
        self.dispatcher.dispatch(BestEffortTask::new(
            GENERATE_REPORT_TASK,
            async move {
                generator
                    .generate(&report_id)
                    .await
                    .map_err(|err| err.to_string())
            },
        ));
        info!(%report_id, task = GENERATE_REPORT_TASK, "report generation scheduled");
    }
}

#[async_trait]
impl<P, Q, C, D, G> CounselReportCommand for CounselReportService<P, Q, C, D, G>
where
    P: CounselReportRepository,
    Q: CounselRequestRepository,
    C: ChildRepository,
    D: BackgroundDispatcher,
    G: ReportGenerator + ?Sized + 'static,
{
    async fn create_draft(
        &self,
        actor: Actor,
        request: CreateCounselReportRequest,
    ) -> Result<CounselReportPayload, Error> {
        let (title, body) = validate_content(&request.title, &request.body)?;
        let counsel_request = self.load_request(&request.counsel_request_id).await?;
        if counsel_request.counselor_id() != Some(actor.user_id) {
            return Err(Error::forbidden("배정된 상담사만 보고서를 작성할 수 있습니다"));
        }
        if counsel_request.status() != CounselRequestStatus::InProgress {
            return Err(Error::conflict("진행 중인 상담에 대해서만 보고서를 작성할 수 있습니다"));
        }
        if self
            .reports
            .find_by_request(&counsel_request.id())
            .await?
            .is_some()
        {
            return Err(report_exists());
        }

        let report = CounselReport::create(
            NewCounselReport {
                counsel_request_id: counsel_request.id(),
                child_id: counsel_request.child_id(),
                counselor_id: actor.user_id,
                title,
                body,
            },
            self.clock.utc(),
        );
        self.reports
            .create(&report)
            .await
            .map_err(map_create_error)?;
        Ok(CounselReportPayload::from(&report))
    }

    async fn revise_draft(
        &self,
        actor: Actor,
        report_id: CounselReportId,
        request: ReviseCounselReportRequest,
    ) -> Result<CounselReportPayload, Error> {
        let mut report = self.load_authored(&actor, &report_id).await?;
        let (title, body) = validate_content(&request.title, &request.body)?;
        report.revise(title, body, self.clock.utc())?;
        self.persist(report).await
    }

    async fn submit_report(
        &self,
        actor: Actor,
        report_id: CounselReportId,
    ) -> Result<CounselReportPayload, Error> {
        let mut report = self.load_authored(&actor, &report_id).await?;
        report.submit(self.clock.utc())?;
        self.persist(report).await
    }

    async fn mark_reviewed(
        &self,
        actor: Actor,
        report_id: CounselReportId,
    ) -> Result<CounselReportPayload, Error> {
        let (mut report, _) = self.load_for_review(&actor, &report_id).await?;
        report.mark_reviewed(self.clock.utc())?;
        self.persist(report).await
    }

    async fn approve_report(
        &self,
        actor: Actor,
        report_id: CounselReportId,
    ) -> Result<CounselReportPayload, Error> {
        let (mut report, mut counsel_request) = self.load_for_review(&actor, &report_id).await?;
        let now = self.clock.utc();
        report.approve(now)?;
        counsel_request.complete(now)?;

        let payload = self.persist(report).await?;
        self.requests.update(&counsel_request).await?;
        events::publish(counsel_request.take_events());

        self.schedule_generation(report_id);
        Ok(payload)
    }

    async fn return_for_revision(
        &self,
        actor: Actor,
        report_id: CounselReportId,
        request: ReturnCounselReportRequest,
    ) -> Result<CounselReportPayload, Error> {
        let (mut report, _) = self.load_for_review(&actor, &report_id).await?;
        report.return_for_revision(request.comment, self.clock.utc())?;
        self.persist(report).await
    }
}

#[async_trait]
impl<P, Q, C, D, G> CounselReportQuery for CounselReportService<P, Q, C, D, G>
where
    P: CounselReportRepository,
    Q: CounselRequestRepository,
    C: ChildRepository,
    D: BackgroundDispatcher,
    G: ReportGenerator + ?Sized + 'static,
{
    async fn get_for_guardian(
        &self,
        actor: Actor,
        report_id: CounselReportId,
    ) -> Result<CounselReportPayload, Error> {
        let report = self.load(&report_id).await?;
        let owns_child = self
            .children
            .find_by_id(&report.child_id())
            .await?
            .is_some_and(|child| child.is_guardian(actor.user_id));
        if !owns_child {
            return Err(Error::forbidden("자녀의 보고서만 조회할 수 있습니다"));
        }
        if !report.status().is_guardian_viewable() {
            return Err(Error::not_found(format!("counsel report {report_id} not found")));
        }
        Ok(CounselReportPayload::from(&report))
    }
}

#[cfg(test)]
#[path = "counsel_report_service_tests.rs"]
mod tests;
