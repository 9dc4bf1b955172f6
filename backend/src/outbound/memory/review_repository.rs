//! In-memory review storage.

use async_trait::async_trait;

use super::{PoisonedStore, Table};
use crate::domain::ports::{ReviewRepository, ReviewRepositoryError};
use crate::domain::{InstitutionId, Review, ReviewId, ReviewRecord, UserId};

/// [`ReviewRepository`] enforcing one review per author and institution.
#[derive(Debug)]
pub struct MemoryReviewRepository {
    table: Table<ReviewId, ReviewRecord>,
}

impl Default for MemoryReviewRepository {
    fn default() -> Self {
        Self {
            table: Table::new("review"),
        }
    }
}

fn record_of(review: &Review) -> ReviewRecord {
    ReviewRecord {
        id: review.id(),
        institution_id: review.institution_id(),
        author_id: review.author_id(),
        rating: review.rating(),
        content: review.content().clone(),
        helpful_count: review.helpful_count(),
        created_at: review.created_at(),
        updated_at: review.updated_at(),
    }
}

fn store_error(error: PoisonedStore) -> ReviewRepositoryError {
    ReviewRepositoryError::query(error.to_string())
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewRepositoryError> {
        self.table
            .read(|rows| rows.get(id).cloned().map(Review::restore))
            .map_err(store_error)
    }

    async fn list_by_institution(
        &self,
        institution_id: &InstitutionId,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let mut records = self
            .table
            .read(|rows| {
                rows.values()
                    .filter(|row| row.institution_id == *institution_id)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .map_err(store_error)?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records.into_iter().map(Review::restore).collect())
    }

    async fn exists_for_author(
        &self,
        institution_id: &InstitutionId,
        author_id: &UserId,
    ) -> Result<bool, ReviewRepositoryError> {
        self.table
            .read(|rows| {
                rows.values().any(|row| {
                    row.institution_id == *institution_id && row.author_id == *author_id
                })
            })
            .map_err(store_error)
    }

    async fn create(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let record = record_of(review);
        self.table
            .write(|rows| {
                let taken = rows.values().any(|row| {
                    row.institution_id == record.institution_id
                        && row.author_id == record.author_id
                });
                if taken || rows.contains_key(&record.id) {
                    return Err(ReviewRepositoryError::duplicate(format!(
                        "author {} already reviewed institution {}",
                        record.author_id, record.institution_id
                    )));
                }
                rows.insert(record.id, record);
                Ok(())
            })
            .map_err(store_error)?
    }

    async fn update(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let record = record_of(review);
        self.table
            .write(|rows| match rows.get_mut(&record.id) {
                Some(row) => {
                    *row = record;
                    Ok(())
                }
                None => Err(ReviewRepositoryError::query(format!(
                    "review {} does not exist",
                    record.id
                ))),
            })
            .map_err(store_error)?
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), ReviewRepositoryError> {
        self.table
            .write(|rows| {
                rows.remove(id);
            })
            .map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewReview;
    use crate::domain::value_objects::{Rating, ReviewContent};
    use chrono::{Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> MemoryReviewRepository {
        MemoryReviewRepository::default()
    }

    fn review(institution_id: InstitutionId, author_id: UserId, minutes: i64) -> Review {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
            + Duration::minutes(minutes);
        Review::create(
            NewReview {
                institution_id,
                author_id,
                rating: Rating::new(4).expect("valid rating"),
                content: ReviewContent::new("아이가 즐겁게 다니고 있어요").expect("valid content"),
            },
            at,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn second_review_by_same_author_is_duplicate(repo: MemoryReviewRepository) {
        let institution = InstitutionId::random();
        let author = UserId::random();
        repo.create(&review(institution, author, 0))
            .await
            .expect("first insert");
        let error = repo
            .create(&review(institution, author, 5))
            .await
            .expect_err("second insert");
        assert!(matches!(error, ReviewRepositoryError::Duplicate { .. }));
        assert!(
            repo.exists_for_author(&institution, &author)
                .await
                .expect("lookup")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn listing_is_newest_first(repo: MemoryReviewRepository) {
        let institution = InstitutionId::random();
        let older = review(institution, UserId::random(), 0);
        let newer = review(institution, UserId::random(), 30);
        repo.create(&older).await.expect("insert older");
        repo.create(&newer).await.expect("insert newer");
        repo.create(&review(InstitutionId::random(), UserId::random(), 60))
            .await
            .expect("insert elsewhere");

        let listed = repo
            .list_by_institution(&institution)
            .await
            .expect("listing");
        let ids: Vec<_> = listed.iter().map(Review::id).collect();
        assert_eq!(ids, vec![newer.id(), older.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn restored_reviews_carry_no_events(repo: MemoryReviewRepository) {
        let created = review(InstitutionId::random(), UserId::random(), 0);
        repo.create(&created).await.expect("insert");
        let mut loaded = repo
            .find_by_id(&created.id())
            .await
            .expect("lookup")
            .expect("present");
        assert!(loaded.take_events().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_is_idempotent(repo: MemoryReviewRepository) {
        let created = review(InstitutionId::random(), UserId::random(), 0);
        repo.create(&created).await.expect("insert");
        repo.delete(&created.id()).await.expect("first delete");
        repo.delete(&created.id()).await.expect("second delete");
        assert!(repo.find_by_id(&created.id()).await.expect("lookup").is_none());
    }
}
