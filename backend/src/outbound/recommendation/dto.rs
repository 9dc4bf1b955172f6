//! Wire shapes for the recommendation service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::InstitutionId;
use crate::domain::ports::{RecommendationCandidate, RecommendationRequest};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RecommendationRequestDto<'a> {
    pub(super) child_age: u32,
    pub(super) reason: &'a str,
    pub(super) limit: usize,
}

impl<'a> From<&'a RecommendationRequest> for RecommendationRequestDto<'a> {
    fn from(request: &'a RecommendationRequest) -> Self {
        Self {
            child_age: request.child_age,
            reason: request.reason.as_str(),
            limit: request.limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RecommendationResponseDto {
    #[serde(default)]
    pub(super) candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CandidateDto {
    pub(super) institution_id: Uuid,
    pub(super) score: f64,
    #[serde(default)]
    pub(super) rationale: Option<String>,
}

impl RecommendationResponseDto {
    /// Candidates ordered best first, trimmed to `limit`.
    pub(super) fn into_candidates(
        self,
        limit: usize,
    ) -> Result<Vec<RecommendationCandidate>, String> {
        let mut candidates = self
            .candidates
            .into_iter()
            .map(CandidateDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(limit);
        Ok(candidates)
    }
}

impl CandidateDto {
    fn into_domain(self) -> Result<RecommendationCandidate, String> {
        if !self.score.is_finite() {
            return Err(format!(
                "candidate {} has a non-finite score",
                self.institution_id
            ));
        }
        Ok(RecommendationCandidate {
            institution_id: InstitutionId::from_uuid(self.institution_id),
            score: self.score,
            rationale: self.rationale.filter(|text| !text.trim().is_empty()),
        })
    }
}
