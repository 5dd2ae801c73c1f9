//! User service
//!
//! Performs the primary user mutations and invokes the cascade coordinator
//! explicitly after each write. The HTTP layer, credential checks, and
//! password hashing live outside this crate; this service receives already
//! validated identities and precomputed hashes.

use tracing::{info, instrument};
use uuid::Uuid;
use validator::ValidateEmail;

use account_core::{ChangeOp, User, UserFlags};

use super::cascade::CascadeCoordinator;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn coordinator(&self) -> CascadeCoordinator<'a> {
        CascadeCoordinator::new(self.ctx)
    }

    /// Get user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Uuid) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Register a new user
    ///
    /// The email is validated and lowercased; `password_hash` is stored
    /// opaquely. Emits a `create` change event.
    #[instrument(skip(self, password_hash))]
    pub async fn register(&self, email: &str, password_hash: String) -> ServiceResult<User> {
        let email = email.trim().to_lowercase();
        if !email.validate_email() {
            return Err(account_core::DomainError::InvalidEmail.into());
        }

        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(account_core::DomainError::EmailAlreadyExists.into());
        }

        let user = User::new(Uuid::new_v4(), email, password_hash);
        self.ctx.user_repo().create(&user).await?;
        info!(user_id = %user.id, "User registered");

        self.coordinator().emit(ChangeOp::Create, &user);
        Ok(user)
    }

    /// Update the lifecycle flags of a user
    ///
    /// Applies the primary write, then hands the before/after flag
    /// snapshots to the cascade coordinator. Cascade and publish outcomes
    /// do not affect the result of this call.
    #[instrument(skip(self))]
    pub async fn update_flags(
        &self,
        user_id: Uuid,
        flags: UserFlags,
        updated_by: Option<Uuid>,
    ) -> ServiceResult<User> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let previous = user.flags();
        self.ctx
            .user_repo()
            .update_flags(user_id, flags, updated_by)
            .await?;
        user.set_flags(flags, updated_by);
        info!(user_id = %user_id, "User flags updated");

        self.coordinator().on_user_updated(&user, previous).await;
        Ok(user)
    }

    /// Hard-delete a user account
    ///
    /// Dependent records are cascaded first; the primary row is removed
    /// only after the cascade completes.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: Uuid) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        self.coordinator().on_user_deleted(&user).await;
        self.ctx.user_repo().delete(user_id).await?;
        info!(user_id = %user_id, "User account deleted");

        Ok(user)
    }

    /// Re-activate a soft-deleted user
    ///
    /// Invoked by the auth layer after a successful sign-in. Banned users
    /// cannot re-activate. Emits a `create`-labeled event; dependent
    /// records keep their soft-deleted flags.
    #[instrument(skip(self))]
    pub async fn reactivate(&self, user_id: Uuid) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if user.is_banned {
            return Err(account_core::DomainError::UserBanned.into());
        }
        if !user.is_deleted {
            return Ok(user);
        }

        let flags = UserFlags { is_deleted: false, ..user.flags() };
        self.update_flags(user_id, flags, Some(user_id)).await
    }
}
