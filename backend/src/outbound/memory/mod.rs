//! In-process repositories.
//!
//! Each adapter keeps stored records in a [`Table`] and re-hydrates
//! aggregates with `restore` on every read, so queued domain events never
//! leak out of storage. Uniqueness rules are checked and applied inside a
//! single write lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

mod child_repository;
mod counsel_report_repository;
mod counsel_request_repository;
mod institution_repository;
mod review_repository;
mod user_repository;

pub use child_repository::MemoryChildRepository;
pub use counsel_report_repository::MemoryCounselReportRepository;
pub use counsel_request_repository::MemoryCounselRequestRepository;
pub use institution_repository::MemoryInstitutionRepository;
pub use review_repository::MemoryReviewRepository;
pub use user_repository::MemoryUserRepository;

/// A lock was poisoned by a panicking writer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{table} store poisoned")]
pub(crate) struct PoisonedStore {
    table: &'static str,
}

/// Keyed rows behind a read/write lock.
#[derive(Debug)]
pub(crate) struct Table<K, V> {
    name: &'static str,
    rows: RwLock<HashMap<K, V>>,
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash,
{
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&HashMap<K, V>) -> T) -> Result<T, PoisonedStore> {
        let guard = self
            .rows
            .read()
            .map_err(|_| PoisonedStore { table: self.name })?;
        Ok(f(&guard))
    }

    pub(crate) fn write<T>(
        &self,
        f: impl FnOnce(&mut HashMap<K, V>) -> T,
    ) -> Result<T, PoisonedStore> {
        let mut guard = self
            .rows
            .write()
            .map_err(|_| PoisonedStore { table: self.name })?;
        Ok(f(&mut guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn write_then_read_sees_rows() {
        let table: Table<u8, &str> = Table::new("letters");
        table
            .write(|rows| rows.insert(1, "a"))
            .expect("write succeeds");
        let value = table
            .read(|rows| rows.get(&1).copied())
            .expect("read succeeds");
        assert_eq!(value, Some("a"));
    }

    #[rstest]
    fn poisoned_lock_is_reported() {
        let table: std::sync::Arc<Table<u8, u8>> = std::sync::Arc::new(Table::new("numbers"));
        let writer = std::sync::Arc::clone(&table);
        let outcome = std::thread::spawn(move || {
            let _ = writer.write(|_| panic!("writer failed"));
        })
        .join();
        assert!(outcome.is_err());
        let error = table.read(|rows| rows.len()).expect_err("poisoned");
        assert_eq!(error.to_string(), "numbers store poisoned");
    }
}
