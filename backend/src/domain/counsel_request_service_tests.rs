//! Tests for the counsel request service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockChildRepository, MockCounselRequestRepository, MockInstitutionRepository,
    MockRecommendationSource, MockUserRepository, RecommendationSourceError,
};
use crate::domain::test_support::{
    RequestFixture, actor, admin_actor, child_with, fixture_clock, guardian_actor,
    institution_with, kst, user_with,
};
use crate::domain::{CounselRequestStatus, ErrorCode, InstitutionId, Parentage, UserId};
use rstest::rstest;

type Service = CounselRequestService<
    MockCounselRequestRepository,
    MockChildRepository,
    MockUserRepository,
    MockInstitutionRepository,
    MockRecommendationSource,
>;

#[derive(Default)]
struct Mocks {
    requests: MockCounselRequestRepository,
    children: MockChildRepository,
    users: MockUserRepository,
    institutions: MockInstitutionRepository,
    source: MockRecommendationSource,
}

impl Mocks {
    fn into_service(self) -> Service {
        CounselRequestService::new(
            Arc::new(self.requests),
            Arc::new(self.children),
            Arc::new(self.users),
            Arc::new(self.institutions),
            Arc::new(self.source),
            fixture_clock(),
            kst(),
        )
    }
}

fn create_request(child_id: ChildId) -> CreateCounselRequestRequest {
    CreateCounselRequestRequest {
        child_id,
        reason: "최근 등교를 거부하는 일이 잦습니다".to_owned(),
    }
}

fn stored(
    fixture: RequestFixture,
) -> impl FnOnce(&CounselRequestId) -> Result<Option<CounselRequest>, CounselRequestRepositoryError>
+ Send {
    move |_| Ok(Some(fixture.build()))
}

#[tokio::test]
async fn guardian_opens_request_for_own_child() {
    let guardian = guardian_actor();
    let child_id = ChildId::random();
    let child = child_with(child_id, Parentage::Guardian(guardian.user_id));
    let mut mocks = Mocks::default();
    mocks
        .children
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(child)));
    mocks
        .requests
        .expect_has_open_request()
        .return_once(|_| Ok(false));
    mocks.requests.expect_create().times(1).return_once(|_| Ok(()));

    let payload = mocks
        .into_service()
        .create_request(guardian, create_request(child_id))
        .await
        .expect("request opened");
    assert_eq!(payload.status, CounselRequestStatus::Pending);
    assert_eq!(payload.guardian_id, guardian.user_id);
}

#[tokio::test]
async fn request_for_someone_elses_child_is_forbidden() {
    let child = child_with(ChildId::random(), Parentage::Guardian(UserId::random()));
    let mut mocks = Mocks::default();
    mocks
        .children
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(child)));
    mocks.requests.expect_has_open_request().times(0);
    mocks.requests.expect_create().times(0);

    let error = mocks
        .into_service()
        .create_request(guardian_actor(), create_request(ChildId::random()))
        .await
        .expect_err("foreign child");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(CounselRequestRepositoryError::duplicate("open request")))]
#[tokio::test]
async fn second_open_request_conflicts(
    #[case] open_exists: bool,
    #[case] insert_error: Option<CounselRequestRepositoryError>,
) {
    let guardian = guardian_actor();
    let child = child_with(ChildId::random(), Parentage::Guardian(guardian.user_id));
    let mut mocks = Mocks::default();
    mocks
        .children
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(child)));
    mocks
        .requests
        .expect_has_open_request()
        .return_once(move |_| Ok(open_exists));
    match insert_error {
        Some(error) => {
            mocks.requests.expect_create().return_once(move |_| Err(error));
        }
        None => {
            mocks.requests.expect_create().times(0);
        }
    }

    let error = mocks
        .into_service()
        .create_request(guardian, create_request(ChildId::random()))
        .await
        .expect_err("already open");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn short_reason_is_rejected_before_lookup() {
    let mut mocks = Mocks::default();
    mocks.children.expect_find_by_id().times(0);
    let request = CreateCounselRequestRequest {
        child_id: ChildId::random(),
        reason: "힘들어요".to_owned(),
    };

    let error = mocks
        .into_service()
        .create_request(guardian_actor(), request)
        .await
        .expect_err("short reason");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(UserRole::Guardian)]
#[case(UserRole::InstitutionAdmin)]
#[tokio::test]
async fn only_system_admin_assigns_institution(#[case] role: UserRole) {
    let mut mocks = Mocks::default();
    mocks.requests.expect_find_by_id().times(0);
    mocks.requests.expect_update().times(0);

    let error = mocks
        .into_service()
        .assign_institution(
            actor(role, None),
            CounselRequestId::random(),
            AssignInstitutionRequest {
                institution_id: InstitutionId::random(),
            },
        )
        .await
        .expect_err("not an admin");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn admin_matches_pending_request() {
    let institution_id = InstitutionId::random();
    let mut mocks = Mocks::default();
    mocks
        .requests
        .expect_find_by_id()
        .return_once(stored(RequestFixture::pending(UserId::random())));
    mocks.institutions.expect_exists().return_once(|_| Ok(true));
    mocks
        .requests
        .expect_update()
        .times(1)
        .withf(|request| request.status() == CounselRequestStatus::Matched)
        .return_once(|_| Ok(()));

    let payload = mocks
        .into_service()
        .assign_institution(
            admin_actor(),
            CounselRequestId::random(),
            AssignInstitutionRequest { institution_id },
        )
        .await
        .expect("matched");
    assert_eq!(payload.institution_id, Some(institution_id));
}

#[tokio::test]
async fn matching_twice_is_an_invalid_transition() {
    let mut fixture = RequestFixture::pending(UserId::random());
    fixture.status = CounselRequestStatus::Matched;
    fixture.institution_id = Some(InstitutionId::random());
    let mut mocks = Mocks::default();
    mocks.requests.expect_find_by_id().return_once(stored(fixture));
    mocks.institutions.expect_exists().return_once(|_| Ok(true));
    mocks.requests.expect_update().times(0);

    let error = mocks
        .into_service()
        .assign_institution(
            admin_actor(),
            CounselRequestId::random(),
            AssignInstitutionRequest {
                institution_id: InstitutionId::random(),
            },
        )
        .await
        .expect_err("already matched");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(
        error.details().and_then(|d| d.get("from")).and_then(|v| v.as_str()),
        Some("MATCHED")
    );
}

fn matched(institution_id: InstitutionId) -> RequestFixture {
    let mut fixture = RequestFixture::pending(UserId::random());
    fixture.status = CounselRequestStatus::Matched;
    fixture.institution_id = Some(institution_id);
    fixture
}

#[tokio::test]
async fn institution_admin_assigns_own_counselor() {
    let institution_id = InstitutionId::random();
    let counselor_id = UserId::random();
    let mut mocks = Mocks::default();
    mocks
        .requests
        .expect_find_by_id()
        .return_once(stored(matched(institution_id)));
    mocks.users.expect_find_by_id().return_once(move |_| {
        Ok(Some(user_with(
            counselor_id,
            "박상담",
            UserRole::Counselor,
            Some(institution_id),
        )))
    });
    mocks.requests.expect_update().times(1).return_once(|_| Ok(()));

    let payload = mocks
        .into_service()
        .assign_counselor(
            actor(UserRole::InstitutionAdmin, Some(institution_id)),
            CounselRequestId::random(),
            AssignCounselorRequest { counselor_id },
        )
        .await
        .expect("counselor assigned");
    assert_eq!(payload.status, CounselRequestStatus::InProgress);
    assert_eq!(payload.counselor_id, Some(counselor_id));
}

#[tokio::test]
async fn admin_of_other_institution_cannot_assign_counselor() {
    let mut mocks = Mocks::default();
    mocks
        .requests
        .expect_find_by_id()
        .return_once(stored(matched(InstitutionId::random())));
    mocks.users.expect_find_by_id().times(0);
    mocks.requests.expect_update().times(0);

    let error = mocks
        .into_service()
        .assign_counselor(
            actor(UserRole::InstitutionAdmin, Some(InstitutionId::random())),
            CounselRequestId::random(),
            AssignCounselorRequest {
                counselor_id: UserId::random(),
            },
        )
        .await
        .expect_err("foreign institution");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(UserRole::Counselor, false, "other_institution")]
#[case(UserRole::Guardian, true, "not_counselor")]
#[case(UserRole::Guardian, false, "not_counselor")]
#[tokio::test]
async fn ineligible_counselor_is_rejected(
    #[case] role: UserRole,
    #[case] same_institution: bool,
    #[case] code: &str,
) {
    let institution_id = InstitutionId::random();
    let counselor_id = UserId::random();
    let affiliation = if same_institution {
        institution_id
    } else {
        InstitutionId::random()
    };
    let mut mocks = Mocks::default();
    mocks
        .requests
        .expect_find_by_id()
        .return_once(stored(matched(institution_id)));
    mocks.users.expect_find_by_id().return_once(move |_| {
        Ok(Some(user_with(counselor_id, "박상담", role, Some(affiliation))))
    });
    mocks.requests.expect_update().times(0);

    let error = mocks
        .into_service()
        .assign_counselor(
            actor(UserRole::InstitutionAdmin, Some(institution_id)),
            CounselRequestId::random(),
            AssignCounselorRequest { counselor_id },
        )
        .await
        .expect_err("not eligible");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().cloned().unwrap_or_default();
    assert_eq!(details.get("field").and_then(|v| v.as_str()), Some("counselorId"));
    assert_eq!(details.get("code").and_then(|v| v.as_str()), Some(code));
}

#[tokio::test]
async fn unknown_counselor_is_not_found() {
    let institution_id = InstitutionId::random();
    let mut mocks = Mocks::default();
    mocks
        .requests
        .expect_find_by_id()
        .return_once(stored(matched(institution_id)));
    mocks.users.expect_find_by_id().return_once(|_| Ok(None));
    mocks.requests.expect_update().times(0);

    let error = mocks
        .into_service()
        .assign_counselor(
            actor(UserRole::InstitutionAdmin, Some(institution_id)),
            CounselRequestId::random(),
            AssignCounselorRequest {
                counselor_id: UserId::random(),
            },
        )
        .await
        .expect_err("no such counselor");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn assigning_counselor_before_matching_conflicts() {
    let mut mocks = Mocks::default();
    mocks
        .requests
        .expect_find_by_id()
        .return_once(stored(RequestFixture::pending(UserId::random())));
    mocks.requests.expect_update().times(0);

    let error = mocks
        .into_service()
        .assign_counselor(
            actor(UserRole::InstitutionAdmin, Some(InstitutionId::random())),
            CounselRequestId::random(),
            AssignCounselorRequest {
                counselor_id: UserId::random(),
            },
        )
        .await
        .expect_err("no institution yet");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn only_requesting_guardian_cancels() {
    let mut mocks = Mocks::default();
    mocks
        .requests
        .expect_find_by_id()
        .return_once(stored(RequestFixture::pending(UserId::random())));
    mocks.requests.expect_update().times(0);

    let error = mocks
        .into_service()
        .cancel_request(guardian_actor(), CounselRequestId::random())
        .await
        .expect_err("not the requester");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn in_progress_request_cannot_be_cancelled() {
    let mut fixture = RequestFixture::in_progress(InstitutionId::random(), UserId::random());
    let guardian = guardian_actor();
    fixture.guardian_id = guardian.user_id;
    let mut mocks = Mocks::default();
    mocks.requests.expect_find_by_id().return_once(stored(fixture));
    mocks.requests.expect_update().times(0);

    let error = mocks
        .into_service()
        .cancel_request(guardian, CounselRequestId::random())
        .await
        .expect_err("already started");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn recommendations_drop_unknown_institutions_and_keep_order() {
    let guardian = guardian_actor();
    let fixture = RequestFixture::pending(guardian.user_id);
    let child = child_with(fixture.child_id, Parentage::Guardian(guardian.user_id));
    let first = InstitutionId::random();
    let unknown = InstitutionId::random();
    let second = InstitutionId::random();

    let mut mocks = Mocks::default();
    mocks.requests.expect_find_by_id().return_once(stored(fixture));
    mocks
        .children
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(child)));
    mocks
        .source
        .expect_recommend()
        .times(1)
        .withf(|query| query.child_age == 10 && query.limit == RECOMMENDATION_LIMIT)
        .return_once(move |_| {
            Ok([first, unknown, second]
                .into_iter()
                .map(|institution_id| RecommendationCandidate {
                    institution_id,
                    score: 0.9,
                    rationale: None,
                })
                .collect())
        });
    mocks
        .institutions
        .expect_find_by_id()
        .times(3)
        .returning(move |id| Ok((*id != unknown).then(|| institution_with(*id))));

    let payload = mocks
        .into_service()
        .recommend_institutions(guardian, CounselRequestId::random())
        .await
        .expect("recommendations");
    let ids: Vec<_> = payload
        .candidates
        .iter()
        .map(|candidate| candidate.institution_id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn recommendation_outage_is_service_unavailable() {
    let guardian = guardian_actor();
    let fixture = RequestFixture::pending(guardian.user_id);
    let child = child_with(fixture.child_id, Parentage::Guardian(guardian.user_id));
    let mut mocks = Mocks::default();
    mocks.requests.expect_find_by_id().return_once(stored(fixture));
    mocks
        .children
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(child)));
    mocks
        .source
        .expect_recommend()
        .return_once(|_| Err(RecommendationSourceError::timeout("after 10s")));
    mocks.institutions.expect_find_by_id().times(0);

    let error = mocks
        .into_service()
        .recommend_institutions(guardian, CounselRequestId::random())
        .await
        .expect_err("source down");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
