//! PostgreSQL implementation of the post adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use account_core::traits::{OwnedRecordRepository, PostRepository, RepoResult};
use account_core::{OwnerPatch, Post};

use crate::models::PostModel;

use super::error::map_db_error;

/// PostgreSQL implementation of the post bulk adapter
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnedRecordRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn bulk_update_by_owner(&self, owner_id: Uuid, patch: &OwnerPatch) -> RepoResult<u64> {
        if patch.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r"
            UPDATE posts
            SET is_deleted = COALESCE($2, is_deleted),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
            WHERE user_id = $1
            ",
        )
        .bind(owner_id)
        .bind(patch.is_deleted)
        .bind(patch.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn bulk_delete_by_owner(&self, owner_id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM posts WHERE user_id = $1
            ",
        )
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

impl PostRepository for PgPostRepository {}

/// Extended operations used by seeding and integration tests
impl PgPostRepository {
    /// Insert a post row
    pub async fn insert(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, user_id, is_deleted, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(post.is_deleted)
        .bind(post.is_active)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    /// Fetch all posts for an owner
    pub async fn find_by_owner(&self, owner_id: Uuid) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, user_id, is_deleted, is_active, created_at, updated_at
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at
            ",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }
}
