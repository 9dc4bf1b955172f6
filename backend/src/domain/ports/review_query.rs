//! Driving port for review listings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, InstitutionId};

use super::ReviewPayload;

/// One review together with its author's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionReviewItem {
    #[serde(flatten)]
    pub review: ReviewPayload,
    pub author_name: String,
}

/// Reviews of one institution with summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionReviewsPayload {
    pub institution_id: InstitutionId,
    pub review_count: usize,
    /// Mean rating, absent when there are no reviews.
    pub average_rating: Option<f64>,
    pub reviews: Vec<InstitutionReviewItem>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    async fn list_institution_reviews(
        &self,
        institution_id: InstitutionId,
    ) -> Result<InstitutionReviewsPayload, Error>;
}
