//! In-memory institution storage.

use async_trait::async_trait;

use super::{PoisonedStore, Table};
use crate::domain::ports::{InstitutionRepository, InstitutionRepositoryError};
use crate::domain::{Institution, InstitutionId, InstitutionRecord};

/// [`InstitutionRepository`] backed by a [`Table`].
#[derive(Debug)]
pub struct MemoryInstitutionRepository {
    table: Table<InstitutionId, InstitutionRecord>,
}

impl Default for MemoryInstitutionRepository {
    fn default() -> Self {
        Self {
            table: Table::new("institution"),
        }
    }
}

fn record_of(institution: &Institution) -> InstitutionRecord {
    InstitutionRecord {
        id: institution.id(),
        name: institution.name().clone(),
        address: institution.address().clone(),
        phone: institution.phone().cloned(),
        created_at: institution.created_at(),
        updated_at: institution.updated_at(),
    }
}

fn store_error(error: PoisonedStore) -> InstitutionRepositoryError {
    InstitutionRepositoryError::query(error.to_string())
}

#[async_trait]
impl InstitutionRepository for MemoryInstitutionRepository {
    async fn find_by_id(
        &self,
        id: &InstitutionId,
    ) -> Result<Option<Institution>, InstitutionRepositoryError> {
        self.table
            .read(|rows| rows.get(id).cloned().map(Institution::restore))
            .map_err(store_error)
    }

    async fn exists(&self, id: &InstitutionId) -> Result<bool, InstitutionRepositoryError> {
        self.table
            .read(|rows| rows.contains_key(id))
            .map_err(store_error)
    }

    async fn save(&self, institution: &Institution) -> Result<(), InstitutionRepositoryError> {
        let record = record_of(institution);
        self.table
            .write(|rows| {
                rows.insert(record.id, record);
            })
            .map_err(store_error)
    }
}
