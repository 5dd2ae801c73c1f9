//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use account_core::traits::{RepoResult, UserRepository};
use account_core::{User, UserFlags};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, password_hash, is_deleted, is_banned, is_admin,
                   email_confirmed, last_update_from_user_id, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, password_hash, is_deleted, is_banned, is_admin,
                   email_confirmed, last_update_from_user_id, created_at, updated_at
            FROM users
            WHERE email = LOWER($1)
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = LOWER($1))
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, user))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, is_deleted, is_banned,
                               is_admin, email_confirmed, last_update_from_user_id,
                               created_at, updated_at)
            VALUES ($1, LOWER($2), $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_deleted)
        .bind(user.is_banned)
        .bind(user.is_admin)
        .bind(user.email_confirmed)
        .bind(user.last_update_from_user_id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || account_core::DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_flags(
        &self,
        id: Uuid,
        flags: UserFlags,
        updated_by: Option<Uuid>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET is_deleted = $2,
                is_banned = $3,
                is_admin = $4,
                email_confirmed = $5,
                last_update_from_user_id = $6,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(flags.is_deleted)
        .bind(flags.is_banned)
        .bind(flags.is_admin)
        .bind(flags.email_confirmed)
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}
