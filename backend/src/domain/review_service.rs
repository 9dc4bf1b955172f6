//! Institution review use cases.
//!
//! Guardians post at most one review per institution. Only the author may
//! edit or delete a review, and only someone else may mark it helpful.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use mockable::Clock;
use tracing::debug;

use crate::domain::events;
use crate::domain::ports::{
    CreateReviewRequest, InstitutionRepository, InstitutionReviewItem, InstitutionReviewsPayload,
    ReviewCommand, ReviewPayload, ReviewQuery, ReviewRepository, ReviewRepositoryError,
    UpdateReviewRequest, UserRepository,
};
use crate::domain::railway::zip;
use crate::domain::value_objects::{Rating, ReviewContent, invalid_field};
use crate::domain::{Actor, Error, InstitutionId, NewReview, Review, ReviewId};

/// Display name used when a review's author account no longer exists.
const UNKNOWN_AUTHOR: &str = "탈퇴한 사용자";

/// Review service implementing [`ReviewCommand`] and [`ReviewQuery`].
#[derive(Clone)]
pub struct ReviewService<R, I, U> {
    reviews: Arc<R>,
    institutions: Arc<I>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, I, U> ReviewService<R, I, U> {
    pub fn new(
        reviews: Arc<R>,
        institutions: Arc<I>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reviews,
            institutions,
            users,
            clock,
        }
    }
}

impl<R, I, U> ReviewService<R, I, U>
where
    R: ReviewRepository,
    I: InstitutionRepository,
    U: UserRepository,
{
    async fn require_institution(&self, id: &InstitutionId) -> Result<(), Error> {
        if self.institutions.exists(id).await? {
            Ok(())
        } else {
            Err(Error::not_found(format!("institution {id} not found")))
        }
    }

    async fn load(&self, id: &ReviewId) -> Result<Review, Error> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("review {id} not found")))
    }

    async fn author_name(&self, review: &Review) -> Result<String, Error> {
        let author = self.users.find_by_id(&review.author_id()).await?;
        Ok(author.map_or_else(
            || UNKNOWN_AUTHOR.to_owned(),
            |user| user.name().as_str().to_owned(),
        ))
    }
}

fn map_create_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Duplicate { .. } => already_reviewed(),
        other => other.into(),
    }
}

fn already_reviewed() -> Error {
    Error::conflict("이미 리뷰를 작성한 기관입니다")
}

fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating().value())).sum();
    Some(f64::from(total) / reviews.len() as f64)
}

#[async_trait]
impl<R, I, U> ReviewCommand for ReviewService<R, I, U>
where
    R: ReviewRepository,
    I: InstitutionRepository,
    U: UserRepository,
{
    async fn create_review(
        &self,
        actor: Actor,
        request: CreateReviewRequest,
    ) -> Result<ReviewPayload, Error> {
        if !actor.is_guardian() {
            return Err(Error::forbidden("보호자만 리뷰를 작성할 수 있습니다"));
        }
        let (rating, content) = zip(
            Rating::new(request.rating).map_err(|err| invalid_field("rating", err)),
            ReviewContent::new(&request.content).map_err(|err| invalid_field("content", err)),
        )?;

        self.require_institution(&request.institution_id).await?;
        if self
            .reviews
            .exists_for_author(&request.institution_id, &actor.user_id)
            .await?
        {
            return Err(already_reviewed());
        }

        let mut review = Review::create(
            NewReview {
                institution_id: request.institution_id,
                author_id: actor.user_id,
                rating,
                content,
            },
            self.clock.utc(),
        );
        self.reviews
            .create(&review)
            .await
            .map_err(map_create_error)?;
        events::publish(review.take_events());
        Ok(ReviewPayload::from(&review))
    }

    async fn update_review(
        &self,
        actor: Actor,
        review_id: ReviewId,
        request: UpdateReviewRequest,
    ) -> Result<ReviewPayload, Error> {
        let mut review = self.load(&review_id).await?;
        if !review.can_modify(actor.user_id) {
            return Err(Error::forbidden("작성자만 리뷰를 수정할 수 있습니다"));
        }
        if request.rating.is_none() && request.content.is_none() {
            return Err(Error::invalid_request("변경할 항목이 없습니다"));
        }

        let (rating, content) = zip(
            request
                .rating
                .map(Rating::new)
                .transpose()
                .map_err(|err| invalid_field("rating", err)),
            request
                .content
                .as_deref()
                .map(ReviewContent::new)
                .transpose()
                .map_err(|err| invalid_field("content", err)),
        )?;

        let now = self.clock.utc();
        if let Some(rating) = rating {
            review.update_rating(rating, now);
        }
        if let Some(content) = content {
            review.update_content(content, now);
        }
        self.reviews.update(&review).await?;
        Ok(ReviewPayload::from(&review))
    }

    async fn delete_review(&self, actor: Actor, review_id: ReviewId) -> Result<(), Error> {
        let review = self.load(&review_id).await?;
        if !review.can_delete(actor.user_id) {
            return Err(Error::forbidden("작성자만 리뷰를 삭제할 수 있습니다"));
        }
        self.reviews.delete(&review_id).await?;
        debug!(%review_id, "review deleted");
        Ok(())
    }

    async fn mark_helpful(
        &self,
        actor: Actor,
        review_id: ReviewId,
    ) -> Result<ReviewPayload, Error> {
        let mut review = self.load(&review_id).await?;
        if review.is_author(actor.user_id) {
            return Err(Error::forbidden("자신의 리뷰는 추천할 수 없습니다"));
        }
        review.mark_helpful();
        self.reviews.update(&review).await?;
        Ok(ReviewPayload::from(&review))
    }
}

#[async_trait]
impl<R, I, U> ReviewQuery for ReviewService<R, I, U>
where
    R: ReviewRepository,
    I: InstitutionRepository,
    U: UserRepository,
{
    async fn list_institution_reviews(
        &self,
        institution_id: InstitutionId,
    ) -> Result<InstitutionReviewsPayload, Error> {
        self.require_institution(&institution_id).await?;
        let reviews = self.reviews.list_by_institution(&institution_id).await?;
        let names = try_join_all(reviews.iter().map(|review| self.author_name(review))).await?;

        let average_rating = average_rating(&reviews);
        let items = reviews
            .iter()
            .zip(names)
            .map(|(review, author_name)| InstitutionReviewItem {
                review: ReviewPayload::from(review),
                author_name,
            })
            .collect::<Vec<_>>();

        Ok(InstitutionReviewsPayload {
            institution_id,
            review_count: items.len(),
            average_rating,
            reviews: items,
        })
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;
