//! Account registration, profiles and password changes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ChangePasswordRequest, InstitutionRepository, PasswordHasher, RegisterUserRequest,
    UserCommand, UserProfilePayload, UserQuery, UserRepository, UserRepositoryError,
};
use crate::domain::railway::zip3;
use crate::domain::value_objects::{Email, Password, PersonName, PhoneNumber, invalid_field};
use crate::domain::{Actor, Error, NewUser, User, UserId, UserRole};

/// Account service implementing [`UserCommand`] and [`UserQuery`].
#[derive(Clone)]
pub struct UserService<U, I, H> {
    users: Arc<U>,
    institutions: Arc<I>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, I, H> UserService<U, I, H> {
    pub fn new(users: Arc<U>, institutions: Arc<I>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            institutions,
            hasher,
            clock,
        }
    }
}

fn email_taken() -> Error {
    Error::conflict("이미 가입된 이메일입니다")
}

fn map_create_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Duplicate { .. } => email_taken(),
        other => other.into(),
    }
}

fn wrong_password() -> Error {
    Error::unauthorized("현재 비밀번호가 일치하지 않습니다")
}

/// Check that `actor` may create an account with the requested role.
///
/// Guardians self-register. Staff accounts need a system admin or an admin
/// of the same institution; admin accounts need a system admin.
fn authorize_registration(
    actor: Option<&Actor>,
    request: &RegisterUserRequest,
) -> Result<(), Error> {
    let allowed = match (request.role, actor) {
        (UserRole::Guardian, _) => true,
        (_, None) => return Err(Error::unauthorized("로그인이 필요합니다")),
        (_, Some(actor)) if actor.is_admin() => true,
        (UserRole::Counselor | UserRole::InstitutionAdmin, Some(actor)) => request
            .institution_id
            .is_some_and(|institution| actor.administers(institution)),
        (UserRole::Admin, Some(_)) => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(Error::forbidden(format!(
            "{} 계정을 만들 권한이 없습니다",
            request.role
        )))
    }
}

impl<U, I, H> UserService<U, I, H>
where
    U: UserRepository,
    I: InstitutionRepository,
    H: PasswordHasher,
{
    async fn load(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl<U, I, H> UserCommand for UserService<U, I, H>
where
    U: UserRepository,
    I: InstitutionRepository,
    H: PasswordHasher,
{
    async fn register_user(
        &self,
        actor: Option<Actor>,
        request: RegisterUserRequest,
    ) -> Result<UserProfilePayload, Error> {
        authorize_registration(actor.as_ref(), &request)?;

        let (email, name, password) = zip3(
            Email::new(&request.email).map_err(|err| invalid_field("email", err)),
            PersonName::new(&request.name).map_err(|err| invalid_field("name", err)),
            Password::new_strong(request.password.as_str())
                .map_err(|err| invalid_field("password", err)),
        )?;
        let phone = request
            .phone
            .as_deref()
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|err| invalid_field("phone", err))?;
        request.role.check_affiliation(request.institution_id)?;

        let institution_known = match request.institution_id {
            Some(institution_id) => self.institutions.exists(&institution_id).await?,
            None => true,
        };
        if !institution_known {
            return Err(Error::not_found("소속 기관을 찾을 수 없습니다"));
        }
        if self.users.exists_by_email(&email).await? {
            return Err(email_taken());
        }

        let password_hash = self.hasher.hash(&password)?;
        let user = User::create(
            NewUser {
                email,
                name,
                phone,
                role: request.role,
                institution_id: request.institution_id,
                password_hash,
            },
            self.clock.utc(),
        )?;
        self.users.create(&user).await.map_err(map_create_error)?;
        info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(UserProfilePayload::from(&user))
    }

    async fn change_password(
        &self,
        user_id: UserId,
        request: ChangePasswordRequest,
    ) -> Result<(), Error> {
        let mut user = self.load(&user_id).await?;
        let current = Password::new(request.current_password).map_err(|_| wrong_password())?;
        if !self.hasher.verify(&current, user.password_hash())? {
            return Err(wrong_password());
        }
        let replacement = Password::new_strong(request.new_password)
            .map_err(|err| invalid_field("newPassword", err))?;

        let hash = self.hasher.hash(&replacement)?;
        user.change_password(hash, self.clock.utc());
        self.users.update(&user).await?;
        info!(%user_id, "password changed");
        Ok(())
    }
}

#[async_trait]
impl<U, I, H> UserQuery for UserService<U, I, H>
where
    U: UserRepository,
    I: InstitutionRepository,
    H: PasswordHasher,
{
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfilePayload, Error> {
        let user = self.load(&user_id).await?;
        Ok(UserProfilePayload::from(&user))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
