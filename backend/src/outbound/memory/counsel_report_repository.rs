//! In-memory counsel report storage.

use async_trait::async_trait;

use super::{PoisonedStore, Table};
use crate::domain::ports::{CounselReportRepository, CounselReportRepositoryError};
use crate::domain::{CounselReport, CounselReportId, CounselReportRecord, CounselRequestId};

/// [`CounselReportRepository`] allowing one report per counsel request.
#[derive(Debug)]
pub struct MemoryCounselReportRepository {
    table: Table<CounselReportId, CounselReportRecord>,
}

impl Default for MemoryCounselReportRepository {
    fn default() -> Self {
        Self {
            table: Table::new("counsel report"),
        }
    }
}

fn record_of(report: &CounselReport) -> CounselReportRecord {
    CounselReportRecord {
        id: report.id(),
        counsel_request_id: report.counsel_request_id(),
        child_id: report.child_id(),
        counselor_id: report.counselor_id(),
        title: report.title().clone(),
        body: report.body().clone(),
        status: report.status(),
        reviewer_comment: report.reviewer_comment().map(str::to_owned),
        created_at: report.created_at(),
        updated_at: report.updated_at(),
        submitted_at: report.submitted_at(),
        approved_at: report.approved_at(),
    }
}

fn store_error(error: PoisonedStore) -> CounselReportRepositoryError {
    CounselReportRepositoryError::query(error.to_string())
}

#[async_trait]
impl CounselReportRepository for MemoryCounselReportRepository {
    async fn find_by_id(
        &self,
        id: &CounselReportId,
    ) -> Result<Option<CounselReport>, CounselReportRepositoryError> {
        self.table
            .read(|rows| rows.get(id).cloned().map(CounselReport::restore))
            .map_err(store_error)
    }

    async fn find_by_request(
        &self,
        request_id: &CounselRequestId,
    ) -> Result<Option<CounselReport>, CounselReportRepositoryError> {
        self.table
            .read(|rows| {
                rows.values()
                    .find(|row| row.counsel_request_id == *request_id)
                    .cloned()
                    .map(CounselReport::restore)
            })
            .map_err(store_error)
    }

    async fn create(&self, report: &CounselReport) -> Result<(), CounselReportRepositoryError> {
        let record = record_of(report);
        self.table
            .write(|rows| {
                let taken = rows
                    .values()
                    .any(|row| row.counsel_request_id == record.counsel_request_id);
                if taken || rows.contains_key(&record.id) {
                    return Err(CounselReportRepositoryError::duplicate(format!(
                        "counsel request {} already has a report",
                        record.counsel_request_id
                    )));
                }
                rows.insert(record.id, record);
                Ok(())
            })
            .map_err(store_error)?
    }

    async fn update(&self, report: &CounselReport) -> Result<(), CounselReportRepositoryError> {
        let record = record_of(report);
        self.table
            .write(|rows| match rows.get_mut(&record.id) {
                Some(row) => {
                    *row = record;
                    Ok(())
                }
                None => Err(CounselReportRepositoryError::query(format!(
                    "counsel report {} does not exist",
                    record.id
                ))),
            })
            .map_err(store_error)?
    }
}
