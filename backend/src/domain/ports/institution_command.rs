//! Driving port for institution registration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Actor, Error, Institution, InstitutionId};

/// Serializable institution payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionPayload {
    pub id: InstitutionId,
    pub name: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Institution> for InstitutionPayload {
    fn from(value: &Institution) -> Self {
        let address = value.address();
        Self {
            id: value.id(),
            name: value.name().as_str().to_owned(),
            address: address.address().to_owned(),
            address_detail: address.detail().map(str::to_owned),
            postal_code: address.postal_code().map(str::to_owned),
            phone: value.phone().map(|p| p.as_str().to_owned()),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInstitutionRequest {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub address_detail: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstitutionCommand: Send + Sync {
    /// Register an institution. System admins only.
    async fn register_institution(
        &self,
        actor: Actor,
        request: RegisterInstitutionRequest,
    ) -> Result<InstitutionPayload, Error>;
}
