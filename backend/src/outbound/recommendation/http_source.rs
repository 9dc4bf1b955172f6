//! Reqwest-backed recommendation source.
//!
//! The adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and decoding into ranked candidates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{RecommendationRequestDto, RecommendationResponseDto};
use crate::domain::ports::{
    RecommendationCandidate, RecommendationRequest, RecommendationSource,
    RecommendationSourceError,
};
use crate::outbound::http_support::{HttpClientError, endpoint, status_message};

const RECOMMENDATIONS_PATH: &str = "recommendations";

/// Recommendation source posting to `{base}/recommendations`.
#[derive(Debug, Clone)]
pub struct RecommendationHttpSource {
    client: Client,
    endpoint: Url,
}

impl RecommendationHttpSource {
    /// Build an adapter using a reqwest client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when `base` cannot carry a path or the reqwest client
    /// cannot be constructed.
    pub fn new(base: &Url, timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint(base, RECOMMENDATIONS_PATH)?,
        })
    }
}

#[async_trait]
impl RecommendationSource for RecommendationHttpSource {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendationCandidate>, RecommendationSourceError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&RecommendationRequestDto::from(request))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let candidates = parse_candidates(body.as_ref(), request.limit)?;
        debug!(count = candidates.len(), "recommendation candidates received");
        Ok(candidates)
    }
}

fn parse_candidates(
    body: &[u8],
    limit: usize,
) -> Result<Vec<RecommendationCandidate>, RecommendationSourceError> {
    let decoded: RecommendationResponseDto = serde_json::from_slice(body).map_err(|error| {
        RecommendationSourceError::decode(format!("invalid recommendation payload: {error}"))
    })?;
    decoded
        .into_candidates(limit)
        .map_err(RecommendationSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> RecommendationSourceError {
    if error.is_timeout() {
        RecommendationSourceError::timeout(error.to_string())
    } else {
        RecommendationSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RecommendationSourceError {
    let message = status_message(status.as_u16(), body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RecommendationSourceError::timeout(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::TOO_MANY_REQUESTS => {
            RecommendationSourceError::unavailable(message)
        }
        _ => RecommendationSourceError::transport(message),
    }
}
