//! Driven port for the external institution recommendation service.
//!
//! Matching happens in a separate service; the domain owns only the request
//! and response shapes.

use async_trait::async_trait;

use crate::domain::InstitutionId;

use super::define_port_error;

/// Input sent to the recommendation service.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    /// Child's age in completed years.
    pub child_age: u32,
    /// Guardian's description of the concern.
    pub reason: String,
    /// Maximum number of candidates wanted.
    pub limit: usize,
}

/// One ranked candidate returned by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationCandidate {
    pub institution_id: InstitutionId,
    /// Relevance score; higher is better.
    pub score: f64,
    pub rationale: Option<String>,
}

define_port_error! {
    /// Errors surfaced while calling the recommendation service.
    pub enum RecommendationSourceError {
        /// Network transport failed before receiving a response.
        Transport => "recommendation transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout => "recommendation request timed out: {message}",
        /// The response body could not be decoded.
        Decode => "recommendation response decode failed: {message}",
        /// The service is not configured or refused the request.
        Unavailable => "recommendation service unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Ranked candidates, best first.
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendationCandidate>, RecommendationSourceError>;
}
