//! Driving port for institution lookups.

use async_trait::async_trait;

use crate::domain::{Error, InstitutionId};

use super::InstitutionPayload;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstitutionQuery: Send + Sync {
    async fn get_institution(&self, institution_id: InstitutionId)
    -> Result<InstitutionPayload, Error>;
}
