//! In-memory counsel request storage.

use async_trait::async_trait;

use super::{PoisonedStore, Table};
use crate::domain::ports::{CounselRequestRepository, CounselRequestRepositoryError};
use crate::domain::{ChildId, CounselRequest, CounselRequestId, CounselRequestRecord};

/// [`CounselRequestRepository`] allowing one open request per child.
#[derive(Debug)]
pub struct MemoryCounselRequestRepository {
    table: Table<CounselRequestId, CounselRequestRecord>,
}

impl Default for MemoryCounselRequestRepository {
    fn default() -> Self {
        Self {
            table: Table::new("counsel request"),
        }
    }
}

fn record_of(request: &CounselRequest) -> CounselRequestRecord {
    CounselRequestRecord {
        id: request.id(),
        child_id: request.child_id(),
        guardian_id: request.guardian_id(),
        reason: request.reason().clone(),
        status: request.status(),
        institution_id: request.institution_id(),
        counselor_id: request.counselor_id(),
        created_at: request.created_at(),
        updated_at: request.updated_at(),
    }
}

fn store_error(error: PoisonedStore) -> CounselRequestRepositoryError {
    CounselRequestRepositoryError::query(error.to_string())
}

#[async_trait]
impl CounselRequestRepository for MemoryCounselRequestRepository {
    async fn find_by_id(
        &self,
        id: &CounselRequestId,
    ) -> Result<Option<CounselRequest>, CounselRequestRepositoryError> {
        self.table
            .read(|rows| rows.get(id).cloned().map(CounselRequest::restore))
            .map_err(store_error)
    }

    async fn has_open_request(
        &self,
        child_id: &ChildId,
    ) -> Result<bool, CounselRequestRepositoryError> {
        self.table
            .read(|rows| {
                rows.values()
                    .any(|row| row.child_id == *child_id && row.status.is_open())
            })
            .map_err(store_error)
    }

    async fn create(&self, request: &CounselRequest) -> Result<(), CounselRequestRepositoryError> {
        let record = record_of(request);
        self.table
            .write(|rows| {
                let open = rows
                    .values()
                    .any(|row| row.child_id == record.child_id && row.status.is_open());
                if open || rows.contains_key(&record.id) {
                    return Err(CounselRequestRepositoryError::duplicate(format!(
                        "child {} already has an open request",
                        record.child_id
                    )));
                }
                rows.insert(record.id, record);
                Ok(())
            })
            .map_err(store_error)?
    }

    async fn update(&self, request: &CounselRequest) -> Result<(), CounselRequestRepositoryError> {
        let record = record_of(request);
        self.table
            .write(|rows| match rows.get_mut(&record.id) {
                Some(row) => {
                    *row = record;
                    Ok(())
                }
                None => Err(CounselRequestRepositoryError::query(format!(
                    "counsel request {} does not exist",
                    record.id
                ))),
            })
            .map_err(store_error)?
    }
}
