//! In-memory child storage.

use async_trait::async_trait;

use super::{PoisonedStore, Table};
use crate::domain::ports::{ChildRepository, ChildRepositoryError};
use crate::domain::{Child, ChildId, ChildRecord, UserId};

/// [`ChildRepository`] over a [`Table`]. `save` upserts.
#[derive(Debug)]
pub struct MemoryChildRepository {
    table: Table<ChildId, ChildRecord>,
}

impl Default for MemoryChildRepository {
    fn default() -> Self {
        Self {
            table: Table::new("child"),
        }
    }
}

fn record_of(child: &Child) -> ChildRecord {
    ChildRecord {
        id: child.id(),
        name: child.name().clone(),
        birth_date: child.birth_date(),
        gender: child.gender(),
        parentage: child.parentage(),
        created_at: child.created_at(),
        updated_at: child.updated_at(),
    }
}

fn store_error(error: PoisonedStore) -> ChildRepositoryError {
    ChildRepositoryError::query(error.to_string())
}

#[async_trait]
impl ChildRepository for MemoryChildRepository {
    async fn find_by_id(&self, id: &ChildId) -> Result<Option<Child>, ChildRepositoryError> {
        self.table
            .read(|rows| rows.get(id).cloned().map(Child::restore))
            .map_err(store_error)
    }

    async fn list_by_guardian(
        &self,
        guardian_id: &UserId,
    ) -> Result<Vec<Child>, ChildRepositoryError> {
        let mut records = self
            .table
            .read(|rows| {
                rows.values()
                    .filter(|row| row.parentage.guardian_id() == Some(*guardian_id))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .map_err(store_error)?;
        records.sort_by(|a, b| a.birth_date.cmp(&b.birth_date));
        Ok(records.into_iter().map(Child::restore).collect())
    }

    async fn save(&self, child: &Child) -> Result<(), ChildRepositoryError> {
        let record = record_of(child);
        self.table
            .write(|rows| {
                rows.insert(record.id, record);
            })
            .map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PersonName;
    use crate::domain::{Gender, InstitutionId, NewChild, Parentage};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
    use rstest::rstest;

    fn child(parentage: Parentage, born: (i32, u32, u32)) -> Child {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        Child::create(
            NewChild {
                name: PersonName::new("김하늘").expect("valid name"),
                birth_date: NaiveDate::from_ymd_opt(born.0, born.1, born.2).expect("valid date"),
                gender: Gender::Male,
                parentage,
            },
            now,
            FixedOffset::east_opt(9 * 3600).expect("valid offset"),
        )
        .expect("valid child")
    }

    #[rstest]
    #[tokio::test]
    async fn lists_only_guardians_children_oldest_first() {
        let repo = MemoryChildRepository::default();
        let guardian = UserId::random();
        let younger = child(Parentage::Guardian(guardian), (2020, 1, 1));
        let older = child(Parentage::Guardian(guardian), (2015, 6, 1));
        for stored in [
            &younger,
            &older,
            &child(Parentage::Guardian(UserId::random()), (2018, 1, 1)),
            &child(Parentage::Institution(InstitutionId::random()), (2017, 1, 1)),
        ] {
            repo.save(stored).await.expect("save");
        }

        let listed = repo.list_by_guardian(&guardian).await.expect("listing");
        let ids: Vec<_> = listed.iter().map(Child::id).collect();
        assert_eq!(ids, vec![older.id(), younger.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn save_overwrites_existing_record() {
        let repo = MemoryChildRepository::default();
        let mut stored = child(Parentage::Guardian(UserId::random()), (2019, 1, 1));
        repo.save(&stored).await.expect("insert");
        stored.rename(
            PersonName::new("김바다").expect("valid name"),
            stored.updated_at(),
        );
        repo.save(&stored).await.expect("update");

        let loaded = repo
            .find_by_id(&stored.id())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(loaded.name().as_str(), "김바다");
    }
}
