//! Institution registration and lookup.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    InstitutionCommand, InstitutionPayload, InstitutionQuery, InstitutionRepository,
    RegisterInstitutionRequest,
};
use crate::domain::railway::zip3;
use crate::domain::value_objects::{Address, InstitutionName, PhoneNumber, invalid_field};
use crate::domain::{Actor, Error, Institution, InstitutionId, NewInstitution};

/// Institution service implementing [`InstitutionCommand`] and
/// [`InstitutionQuery`].
#[derive(Clone)]
pub struct InstitutionService<I> {
    institutions: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<I> InstitutionService<I> {
    pub fn new(institutions: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            institutions,
            clock,
        }
    }
}

#[async_trait]
impl<I> InstitutionCommand for InstitutionService<I>
where
    I: InstitutionRepository,
{
    async fn register_institution(
        &self,
        actor: Actor,
        request: RegisterInstitutionRequest,
    ) -> Result<InstitutionPayload, Error> {
        if !actor.is_admin() {
            return Err(Error::forbidden("시스템 관리자만 기관을 등록할 수 있습니다"));
        }
        let (name, address, phone) = zip3(
            InstitutionName::new(&request.name).map_err(|err| invalid_field("name", err)),
            Address::new(
                &request.address,
                request.address_detail.as_deref(),
                request.postal_code.as_deref(),
            )
            .map_err(|err| invalid_field("address", err)),
            request
                .phone
                .as_deref()
                .map(PhoneNumber::new)
                .transpose()
                .map_err(|err| invalid_field("phone", err)),
        )?;

        let institution = Institution::create(
            NewInstitution {
                name,
                address,
                phone,
            },
            self.clock.utc(),
        );
        self.institutions.save(&institution).await?;
        info!(institution_id = %institution.id(), "institution registered");
        Ok(InstitutionPayload::from(&institution))
    }
}

#[async_trait]
impl<I> InstitutionQuery for InstitutionService<I>
where
    I: InstitutionRepository,
{
    async fn get_institution(
        &self,
        institution_id: InstitutionId,
    ) -> Result<InstitutionPayload, Error> {
        self.institutions
            .find_by_id(&institution_id)
            .await?
            .map(|institution| InstitutionPayload::from(&institution))
            .ok_or_else(|| Error::not_found(format!("institution {institution_id} not found")))
    }
}
