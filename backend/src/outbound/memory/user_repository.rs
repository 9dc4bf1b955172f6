//! In-memory account storage.

use async_trait::async_trait;

use super::{PoisonedStore, Table};
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::value_objects::Email;
use crate::domain::{User, UserId, UserRecord};

/// [`UserRepository`] enforcing unique email addresses.
#[derive(Debug)]
pub struct MemoryUserRepository {
    table: Table<UserId, UserRecord>,
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self {
            table: Table::new("user"),
        }
    }
}

fn record_of(user: &User) -> UserRecord {
    UserRecord {
        id: user.id(),
        email: user.email().clone(),
        name: user.name().clone(),
        phone: user.phone().cloned(),
        role: user.role(),
        institution_id: user.institution_id(),
        password_hash: user.password_hash().clone(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn store_error(error: PoisonedStore) -> UserRepositoryError {
    UserRepositoryError::query(error.to_string())
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        self.table
            .read(|rows| rows.get(id).cloned().map(User::restore))
            .map_err(store_error)
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserRepositoryError> {
        self.table
            .read(|rows| rows.values().any(|row| row.email == *email))
            .map_err(store_error)
    }

    async fn create(&self, user: &User) -> Result<(), UserRepositoryError> {
        let record = record_of(user);
        self.table
            .write(|rows| {
                let taken = rows.values().any(|row| row.email == record.email);
                if taken || rows.contains_key(&record.id) {
                    return Err(UserRepositoryError::duplicate(record.email.as_str()));
                }
                rows.insert(record.id, record);
                Ok(())
            })
            .map_err(store_error)?
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let record = record_of(user);
        self.table
            .write(|rows| match rows.get_mut(&record.id) {
                Some(row) => {
                    *row = record;
                    Ok(())
                }
                None => Err(UserRepositoryError::query(format!(
                    "user {} does not exist",
                    record.id
                ))),
            })
            .map_err(store_error)?
    }
}
