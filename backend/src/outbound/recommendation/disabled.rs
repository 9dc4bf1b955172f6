//! Recommendation source used when no service endpoint is configured.

use async_trait::async_trait;

use crate::domain::ports::{
    RecommendationCandidate, RecommendationRequest, RecommendationSource,
    RecommendationSourceError,
};

/// Always reports the service as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledRecommendationSource;

#[async_trait]
impl RecommendationSource for DisabledRecommendationSource {
    async fn recommend(
        &self,
        _request: &RecommendationRequest,
    ) -> Result<Vec<RecommendationCandidate>, RecommendationSourceError> {
        Err(RecommendationSourceError::unavailable(
            "no recommendation endpoint configured",
        ))
    }
}
