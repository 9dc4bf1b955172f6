//! Shared fixtures for service tests.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use super::value_objects::{
    Address, CounselReason, Email, InstitutionName, PasswordHash, PersonName, Rating,
    ReportBody, ReportTitle, ReviewContent,
};
use super::{
    Actor, Child, ChildId, ChildRecord, CounselReport, CounselReportId, CounselReportRecord,
    CounselReportStatus, CounselRequest, CounselRequestId, CounselRequestRecord,
    CounselRequestStatus, Gender, Institution, InstitutionId, InstitutionRecord, Parentage, Review,
    ReviewId, ReviewRecord, User, UserId, UserRecord, UserRole,
};

pub(crate) struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 16, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_now(),
    })
}

pub(crate) fn kst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("valid offset")
}

pub(crate) fn actor(role: UserRole, institution_id: Option<InstitutionId>) -> Actor {
    Actor {
        user_id: UserId::random(),
        role,
        institution_id,
    }
}

pub(crate) fn guardian_actor() -> Actor {
    actor(UserRole::Guardian, None)
}

pub(crate) fn admin_actor() -> Actor {
    actor(UserRole::Admin, None)
}

pub(crate) fn review_by(author_id: UserId, institution_id: InstitutionId, rating: u8) -> Review {
    Review::restore(ReviewRecord {
        id: ReviewId::random(),
        institution_id,
        author_id,
        rating: Rating::restore(rating),
        content: ReviewContent::restore("아이가 즐겁게 다니고 있어요"),
        helpful_count: 0,
        created_at: fixture_now(),
        updated_at: fixture_now(),
    })
}

pub(crate) fn user_with(
    id: UserId,
    name: &str,
    role: UserRole,
    institution_id: Option<InstitutionId>,
) -> User {
    User::restore(UserRecord {
        id,
        email: Email::restore(format!("{id}@example.com")),
        name: PersonName::restore(name),
        phone: None,
        role,
        institution_id,
        password_hash: PasswordHash::new("stored-hash"),
        created_at: fixture_now(),
        updated_at: fixture_now(),
    })
}

pub(crate) fn institution_with(id: InstitutionId) -> Institution {
    Institution::restore(InstitutionRecord {
        id,
        name: InstitutionName::restore("해피양육시설"),
        address: Address::restore("서울시 마포구 월드컵로 1".to_owned(), None, None),
        phone: None,
        created_at: fixture_now(),
        updated_at: fixture_now(),
    })
}

pub(crate) fn child_with(id: ChildId, parentage: Parentage) -> Child {
    Child::restore(ChildRecord {
        id,
        name: PersonName::restore("김하늘"),
        birth_date: NaiveDate::from_ymd_opt(2016, 3, 15).expect("valid date"),
        gender: Gender::Female,
        parentage,
        created_at: fixture_now(),
        updated_at: fixture_now(),
    })
}

pub(crate) struct RequestFixture {
    pub id: CounselRequestId,
    pub child_id: ChildId,
    pub guardian_id: UserId,
    pub status: CounselRequestStatus,
    pub institution_id: Option<InstitutionId>,
    pub counselor_id: Option<UserId>,
}

impl RequestFixture {
    pub fn pending(guardian_id: UserId) -> Self {
        Self {
            id: CounselRequestId::random(),
            child_id: ChildId::random(),
            guardian_id,
            status: CounselRequestStatus::Pending,
            institution_id: None,
            counselor_id: None,
        }
    }

    pub fn in_progress(institution_id: InstitutionId, counselor_id: UserId) -> Self {
        Self {
            status: CounselRequestStatus::InProgress,
            institution_id: Some(institution_id),
            counselor_id: Some(counselor_id),
            ..Self::pending(UserId::random())
        }
    }

    pub fn build(&self) -> CounselRequest {
        CounselRequest::restore(CounselRequestRecord {
            id: self.id,
            child_id: self.child_id,
            guardian_id: self.guardian_id,
            reason: CounselReason::restore("최근 등교를 거부하는 일이 잦습니다"),
            status: self.status,
            institution_id: self.institution_id,
            counselor_id: self.counselor_id,
            created_at: fixture_now(),
            updated_at: fixture_now(),
        })
    }
}

pub(crate) fn report_with(
    request: &CounselRequest,
    counselor_id: UserId,
    status: CounselReportStatus,
) -> CounselReport {
    CounselReport::restore(CounselReportRecord {
        id: CounselReportId::random(),
        counsel_request_id: request.id(),
        child_id: request.child_id(),
        counselor_id,
        title: ReportTitle::restore("1차 상담 결과"),
        body: ReportBody::restore("아동이 새 환경에 잘 적응하고 있습니다."),
        status,
        reviewer_comment: None,
        created_at: fixture_now(),
        updated_at: fixture_now(),
        submitted_at: None,
        approved_at: None,
    })
}
