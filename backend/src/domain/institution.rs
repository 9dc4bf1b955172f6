//! Care institution aggregate.

use chrono::{DateTime, Utc};

use super::InstitutionId;
use super::value_objects::{Address, InstitutionName, PhoneNumber};

/// Validated input for [`Institution::create`].
#[derive(Debug, Clone)]
pub struct NewInstitution {
    pub name: InstitutionName,
    pub address: Address,
    pub phone: Option<PhoneNumber>,
}

/// Stored shape used to re-hydrate an [`Institution`].
#[derive(Debug, Clone)]
pub struct InstitutionRecord {
    pub id: InstitutionId,
    pub name: InstitutionName,
    pub address: Address,
    pub phone: Option<PhoneNumber>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A foster or group-care institution.
#[derive(Debug, Clone)]
pub struct Institution {
    id: InstitutionId,
    name: InstitutionName,
    address: Address,
    phone: Option<PhoneNumber>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Institution {
    pub fn create(new: NewInstitution, now: DateTime<Utc>) -> Self {
        Self {
            id: InstitutionId::random(),
            name: new.name,
            address: new.address,
            phone: new.phone,
            created_at: now,
            updated_at: now,
        }
    }

    /// Re-hydrate a stored institution without validation.
    pub fn restore(record: InstitutionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            address: record.address,
            phone: record.phone,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn id(&self) -> InstitutionId {
        self.id
    }

    pub fn name(&self) -> &InstitutionName {
        &self.name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn rename(&mut self, name: InstitutionName, now: DateTime<Utc>) {
        self.name = name;
        self.updated_at = now;
    }

    pub fn relocate(&mut self, address: Address, now: DateTime<Utc>) {
        self.address = address;
        self.updated_at = now;
    }
}
