//! Port for review persistence.

use async_trait::async_trait;

use crate::domain::{InstitutionId, Review, ReviewId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "review repository query failed: {message}",
        /// The author already reviewed this institution.
        Duplicate => "review already exists: {message}",
    }
}

/// Storage for institution reviews.
///
/// Adapters must enforce one review per `(institution, author)` pair when
/// inserting; [`ReviewRepository::exists_for_author`] is only a fast path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewRepositoryError>;

    /// Reviews for one institution, newest first.
    async fn list_by_institution(
        &self,
        institution_id: &InstitutionId,
    ) -> Result<Vec<Review>, ReviewRepositoryError>;

    async fn exists_for_author(
        &self,
        institution_id: &InstitutionId,
        author_id: &UserId,
    ) -> Result<bool, ReviewRepositoryError>;

    /// Insert a new review, failing with `Duplicate` on the uniqueness rule.
    async fn create(&self, review: &Review) -> Result<(), ReviewRepositoryError>;

    async fn update(&self, review: &Review) -> Result<(), ReviewRepositoryError>;

    /// Remove a review. Deleting an absent review is not an error.
    async fn delete(&self, id: &ReviewId) -> Result<(), ReviewRepositoryError>;
}
