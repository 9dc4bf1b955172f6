//! Driving port for review mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Actor, Error, InstitutionId, Review, ReviewId, UserId};

/// Serializable review payload for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub id: ReviewId,
    pub institution_id: InstitutionId,
    pub author_id: UserId,
    pub rating: u8,
    pub content: String,
    pub helpful_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Review> for ReviewPayload {
    fn from(value: &Review) -> Self {
        Self {
            id: value.id(),
            institution_id: value.institution_id(),
            author_id: value.author_id(),
            rating: value.rating().value(),
            content: value.content().as_str().to_owned(),
            helpful_count: value.helpful_count(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// Unvalidated input for posting a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub institution_id: InstitutionId,
    pub rating: i64,
    pub content: String,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Post a review of an institution. One review per author and institution.
    async fn create_review(
        &self,
        actor: Actor,
        request: CreateReviewRequest,
    ) -> Result<ReviewPayload, Error>;

    /// Change rating and/or content. Author only.
    async fn update_review(
        &self,
        actor: Actor,
        review_id: ReviewId,
        request: UpdateReviewRequest,
    ) -> Result<ReviewPayload, Error>;

    /// Remove a review. Author only.
    async fn delete_review(&self, actor: Actor, review_id: ReviewId) -> Result<(), Error>;

    /// Count a "helpful" vote from someone other than the author.
    async fn mark_helpful(&self, actor: Actor, review_id: ReviewId)
    -> Result<ReviewPayload, Error>;
}
