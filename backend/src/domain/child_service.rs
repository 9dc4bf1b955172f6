//! Child registration and lookup.
//!
//! Every child is cared for either by a guardian account or by an
//! institution. Guardians see their own children; institution staff see the
//! children their institution cares for; administrators see everything.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::FixedOffset;
use mockable::Clock;

use crate::domain::ports::{
    ChildCommand, ChildPayload, ChildQuery, ChildRepository, InstitutionRepository,
    RegisterChildRequest, RenameChildRequest, UserRepository,
};
use crate::domain::value_objects::{PersonName, invalid_field};
use crate::domain::{Actor, Child, ChildId, Error, NewChild, Parentage, UserId, UserRole};

/// Child service implementing [`ChildCommand`] and [`ChildQuery`].
#[derive(Clone)]
pub struct ChildService<C, U, I> {
    children: Arc<C>,
    users: Arc<U>,
    institutions: Arc<I>,
    clock: Arc<dyn Clock>,
    timezone: FixedOffset,
}

impl<C, U, I> ChildService<C, U, I> {
    /// `timezone` fixes the calendar used for birth dates and ages.
    pub fn new(
        children: Arc<C>,
        users: Arc<U>,
        institutions: Arc<I>,
        clock: Arc<dyn Clock>,
        timezone: FixedOffset,
    ) -> Self {
        Self {
            children,
            users,
            institutions,
            clock,
            timezone,
        }
    }

    fn payload(&self, child: &Child) -> ChildPayload {
        let parentage = child.parentage();
        ChildPayload {
            id: child.id(),
            name: child.name().as_str().to_owned(),
            birth_date: child.birth_date(),
            age: child.age_at(self.clock.utc(), self.timezone),
            gender: child.gender(),
            guardian_id: parentage.guardian_id(),
            institution_id: parentage.institution_id(),
            created_at: child.created_at(),
            updated_at: child.updated_at(),
        }
    }
}

/// Whether `actor` may read the child's record.
fn can_view(actor: &Actor, child: &Child) -> bool {
    if actor.is_admin() || child.is_guardian(actor.user_id) {
        return true;
    }
    actor
        .institution_id
        .is_some_and(|institution| child.belongs_to_institution(institution))
}

/// Whether `actor` may register or change a child with this parentage.
fn can_manage(actor: &Actor, parentage: Parentage) -> bool {
    match parentage {
        _ if actor.is_admin() => true,
        Parentage::Guardian(guardian) => actor.user_id == guardian,
        Parentage::Institution(institution) => actor.administers(institution),
    }
}

impl<C, U, I> ChildService<C, U, I>
where
    C: ChildRepository,
    U: UserRepository,
    I: InstitutionRepository,
{
    async fn load(&self, id: &ChildId) -> Result<Child, Error> {
        self.children
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("child {id} not found")))
    }

    async fn check_parentage_exists(&self, parentage: Parentage) -> Result<(), Error> {
        match parentage {
            Parentage::Guardian(guardian_id) => {
                let is_guardian = self
                    .users
                    .find_by_id(&guardian_id)
                    .await?
                    .is_some_and(|user| user.role() == UserRole::Guardian);
                if is_guardian {
                    Ok(())
                } else {
                    Err(Error::not_found(format!("guardian {guardian_id} not found")))
                }
            }
            Parentage::Institution(institution_id) => {
                if self.institutions.exists(&institution_id).await? {
                    Ok(())
                } else {
                    Err(Error::not_found(format!(
                        "institution {institution_id} not found"
                    )))
                }
            }
        }
    }
}

#[async_trait]
impl<C, U, I> ChildCommand for ChildService<C, U, I>
where
    C: ChildRepository,
    U: UserRepository,
    I: InstitutionRepository,
{
    async fn register_child(
        &self,
        actor: Actor,
        request: RegisterChildRequest,
    ) -> Result<ChildPayload, Error> {
        let parentage = Parentage::from_options(request.guardian_id, request.institution_id)?;
        let name = PersonName::new(&request.name).map_err(|err| invalid_field("name", err))?;
        if !can_manage(&actor, parentage) {
            return Err(Error::forbidden("아동을 등록할 권한이 없습니다"));
        }
        self.check_parentage_exists(parentage).await?;

        let child = Child::create(
            NewChild {
                name,
                birth_date: request.birth_date,
                gender: request.gender,
                parentage,
            },
            self.clock.utc(),
            self.timezone,
        )?;
        self.children.save(&child).await?;
        Ok(self.payload(&child))
    }

    async fn rename_child(
        &self,
        actor: Actor,
        child_id: ChildId,
        request: RenameChildRequest,
    ) -> Result<ChildPayload, Error> {
        let name = PersonName::new(&request.name).map_err(|err| invalid_field("name", err))?;
        let mut child = self.load(&child_id).await?;
        if !can_manage(&actor, child.parentage()) {
            return Err(Error::forbidden("아동 정보를 수정할 권한이 없습니다"));
        }
        child.rename(name, self.clock.utc());
        self.children.save(&child).await?;
        Ok(self.payload(&child))
    }
}

#[async_trait]
impl<C, U, I> ChildQuery for ChildService<C, U, I>
where
    C: ChildRepository,
    U: UserRepository,
    I: InstitutionRepository,
{
    async fn get_child(&self, actor: Actor, child_id: ChildId) -> Result<ChildPayload, Error> {
        let child = self.load(&child_id).await?;
        if !can_view(&actor, &child) {
            return Err(Error::forbidden("아동 정보를 조회할 권한이 없습니다"));
        }
        Ok(self.payload(&child))
    }

    async fn list_children(
        &self,
        actor: Actor,
        guardian_id: UserId,
    ) -> Result<Vec<ChildPayload>, Error> {
        if !actor.is_admin() && actor.user_id != guardian_id {
            return Err(Error::forbidden("다른 보호자의 아동 목록은 볼 수 없습니다"));
        }
        let children = self.children.list_by_guardian(&guardian_id).await?;
        Ok(children.iter().map(|child| self.payload(child)).collect())
    }
}

#[cfg(test)]
#[path = "child_service_tests.rs"]
mod tests;
