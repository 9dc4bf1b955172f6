//! Institution review aggregate.

use chrono::{DateTime, Utc};

use super::events::DomainEvent;
use super::value_objects::{Rating, ReviewContent};
use super::{InstitutionId, ReviewId, UserId};

/// Validated input for [`Review::create`].
#[derive(Debug, Clone)]
pub struct NewReview {
    pub institution_id: InstitutionId,
    pub author_id: UserId,
    pub rating: Rating,
    pub content: ReviewContent,
}

/// Stored shape used to re-hydrate a [`Review`].
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub id: ReviewId,
    pub institution_id: InstitutionId,
    pub author_id: UserId,
    pub rating: Rating,
    pub content: ReviewContent,
    pub helpful_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A guardian's review of a care institution.
///
/// ## Invariants
/// - Only the author may modify or delete the review.
/// - `helpful_count` never decreases.
#[derive(Debug, Clone)]
pub struct Review {
    id: ReviewId,
    institution_id: InstitutionId,
    author_id: UserId,
    rating: Rating,
    content: ReviewContent,
    helpful_count: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl Review {
    /// Create a new review and queue a `ReviewPosted` event.
    pub fn create(new: NewReview, now: DateTime<Utc>) -> Self {
        let NewReview {
            institution_id,
            author_id,
            rating,
            content,
        } = new;
        let id = ReviewId::random();
        Self {
            id,
            institution_id,
            author_id,
            rating,
            content,
            helpful_count: 0,
            created_at: now,
            updated_at: now,
            events: vec![DomainEvent::ReviewPosted {
                review_id: id,
                institution_id,
                author_id,
                rating: rating.value(),
            }],
        }
    }

    /// Re-hydrate a stored review without validation.
    pub fn restore(record: ReviewRecord) -> Self {
        let ReviewRecord {
            id,
            institution_id,
            author_id,
            rating,
            content,
            helpful_count,
            created_at,
            updated_at,
        } = record;
        Self {
            id,
            institution_id,
            author_id,
            rating,
            content,
            helpful_count,
            created_at,
            updated_at,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn institution_id(&self) -> InstitutionId {
        self.institution_id
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn content(&self) -> &ReviewContent {
        &self.content
    }

    pub fn helpful_count(&self) -> u32 {
        self.helpful_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user` may edit this review.
    pub fn can_modify(&self, user: UserId) -> bool {
        self.author_id == user
    }

    /// Whether `user` may delete this review.
    pub fn can_delete(&self, user: UserId) -> bool {
        self.author_id == user
    }

    pub fn is_author(&self, user: UserId) -> bool {
        self.author_id == user
    }

    /// Replace the rating.
    pub fn update_rating(&mut self, rating: Rating, now: DateTime<Utc>) {
        self.rating = rating;
        self.updated_at = now;
    }

    /// Replace the content wholesale.
    pub fn update_content(&mut self, content: ReviewContent, now: DateTime<Utc>) {
        self.content = content;
        self.updated_at = now;
    }

    /// Count one more "helpful" vote. Saturates at `u32::MAX`.
    pub fn mark_helpful(&mut self) {
        self.helpful_count = self.helpful_count.saturating_add(1);
    }

    /// Drain queued domain events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn review(now: DateTime<Utc>) -> Review {
        Review::create(
            NewReview {
                institution_id: InstitutionId::random(),
                author_id: UserId::random(),
                rating: Rating::new(4).expect("valid rating"),
                content: ReviewContent::new("아이가 즐겁게 다니고 있어요").expect("valid content"),
            },
            now,
        )
    }

    #[rstest]
    fn create_queues_posted_event(mut review: Review) {
        let events = review.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events.first(),
            Some(DomainEvent::ReviewPosted { rating: 4, .. })
        ));
        assert!(review.take_events().is_empty());
    }

    #[rstest]
    fn only_author_may_modify_or_delete(review: Review) {
        let stranger = UserId::random();
        assert!(review.can_modify(review.author_id()));
        assert!(review.can_delete(review.author_id()));
        assert!(!review.can_modify(stranger));
        assert!(!review.can_delete(stranger));
    }

    #[rstest]
    fn updates_replace_values_and_touch_timestamp(mut review: Review, now: DateTime<Utc>) {
        let later = now + chrono::Duration::hours(1);
        review.update_rating(Rating::new(2).expect("valid"), later);
        review.update_content(ReviewContent::new("조금 아쉬운 부분이 있었어요").expect("valid"), later);
        assert_eq!(review.rating().value(), 2);
        assert_eq!(review.content().as_str(), "조금 아쉬운 부분이 있었어요");
        assert_eq!(review.updated_at(), later);
        assert_eq!(review.created_at(), now);
    }

    #[rstest]
    fn helpful_count_increments(mut review: Review) {
        review.mark_helpful();
        review.mark_helpful();
        assert_eq!(review.helpful_count(), 2);
    }

    #[rstest]
    fn restore_queues_no_events(now: DateTime<Utc>) {
        let mut review = Review::restore(ReviewRecord {
            id: ReviewId::random(),
            institution_id: InstitutionId::random(),
            author_id: UserId::random(),
            rating: Rating::restore(5),
            content: ReviewContent::restore("저장된 리뷰 내용입니다"),
            helpful_count: 7,
            created_at: now,
            updated_at: now,
        });
        assert_eq!(review.helpful_count(), 7);
        assert!(review.take_events().is_empty());
    }
}
