//! Child aggregate.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::PersonName;
use super::{ChildId, InstitutionId, UnknownVariant, UserId};

/// Who is responsible for a child. Exactly one party, by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parentage {
    /// Cared for by a guardian at home.
    Guardian(UserId),
    /// Cared for by an institution.
    Institution(InstitutionId),
}

/// Failures raised by child rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChildError {
    #[error("보호자 또는 기관 중 하나를 지정해야 합니다")]
    ParentageMissing,
    #[error("보호자와 기관을 동시에 지정할 수 없습니다")]
    ParentageConflict,
    #[error("생년월일은 오늘 이후일 수 없습니다")]
    BirthDateInFuture,
}

impl Parentage {
    /// Build from the two optional inbound identifiers.
    ///
    /// # Examples
    /// ```
    /// use carebridge::domain::{ChildError, InstitutionId, Parentage, UserId};
    ///
    /// let guardian = UserId::random();
    /// assert_eq!(
    ///     Parentage::from_options(Some(guardian), None),
    ///     Ok(Parentage::Guardian(guardian))
    /// );
    /// assert_eq!(
    ///     Parentage::from_options(Some(guardian), Some(InstitutionId::random())),
    ///     Err(ChildError::ParentageConflict)
    /// );
    /// ```
    pub fn from_options(
        guardian_id: Option<UserId>,
        institution_id: Option<InstitutionId>,
    ) -> Result<Self, ChildError> {
        match (guardian_id, institution_id) {
            (Some(guardian), None) => Ok(Self::Guardian(guardian)),
            (None, Some(institution)) => Ok(Self::Institution(institution)),
            (Some(_), Some(_)) => Err(ChildError::ParentageConflict),
            (None, None) => Err(ChildError::ParentageMissing),
        }
    }

    pub fn guardian_id(&self) -> Option<UserId> {
        match self {
            Self::Guardian(id) => Some(*id),
            Self::Institution(_) => None,
        }
    }

    pub fn institution_id(&self) -> Option<InstitutionId> {
        match self {
            Self::Guardian(_) => None,
            Self::Institution(id) => Some(*id),
        }
    }
}

/// Recorded gender of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// Validated input for [`Child::create`].
#[derive(Debug, Clone)]
pub struct NewChild {
    pub name: PersonName,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub parentage: Parentage,
}

/// Stored shape used to re-hydrate a [`Child`].
#[derive(Debug, Clone)]
pub struct ChildRecord {
    pub id: ChildId,
    pub name: PersonName,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub parentage: Parentage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A child under care.
#[derive(Debug, Clone)]
pub struct Child {
    id: ChildId,
    name: PersonName,
    birth_date: NaiveDate,
    gender: Gender,
    parentage: Parentage,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Child {
    /// Register a child. `tz` decides which calendar day "today" is.
    pub fn create(
        new: NewChild,
        now: DateTime<Utc>,
        tz: FixedOffset,
    ) -> Result<Self, ChildError> {
        let today = now.with_timezone(&tz).date_naive();
        if new.birth_date > today {
            return Err(ChildError::BirthDateInFuture);
        }
        Ok(Self {
            id: ChildId::random(),
            name: new.name,
            birth_date: new.birth_date,
            gender: new.gender,
            parentage: new.parentage,
            created_at: now,
            updated_at: now,
        })
    }

    /// Re-hydrate a stored child without validation.
    pub fn restore(record: ChildRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            birth_date: record.birth_date,
            gender: record.gender,
            parentage: record.parentage,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn id(&self) -> ChildId {
        self.id
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn parentage(&self) -> Parentage {
        self.parentage
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Completed years on `date`; zero before the first birthday.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        let mut years = date.year() - self.birth_date.year();
        if (date.month(), date.day()) < (self.birth_date.month(), self.birth_date.day()) {
            years -= 1;
        }
        u32::try_from(years).unwrap_or(0)
    }

    /// Age at the instant `now`, as observed on the calendar of `tz`.
    pub fn age_at(&self, now: DateTime<Utc>, tz: FixedOffset) -> u32 {
        self.age_on(now.with_timezone(&tz).date_naive())
    }

    pub fn is_guardian(&self, user: UserId) -> bool {
        self.parentage == Parentage::Guardian(user)
    }

    pub fn belongs_to_institution(&self, institution: InstitutionId) -> bool {
        self.parentage == Parentage::Institution(institution)
    }

    pub fn rename(&mut self, name: PersonName, now: DateTime<Utc>) {
        self.name = name;
        self.updated_at = now;
    }

    /// Move the child to a different guardian or institution.
    pub fn transfer_to(&mut self, parentage: Parentage, now: DateTime<Utc>) {
        self.parentage = parentage;
        self.updated_at = now;
    }
}
