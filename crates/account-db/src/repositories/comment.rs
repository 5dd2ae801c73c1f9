//! PostgreSQL implementation of the comment adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use account_core::traits::{CommentRepository, OwnedRecordRepository, RepoResult};
use account_core::{Comment, OwnerPatch};

use crate::models::CommentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of the comment bulk adapter
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnedRecordRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn bulk_update_by_owner(&self, owner_id: Uuid, patch: &OwnerPatch) -> RepoResult<u64> {
        if patch.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r"
            UPDATE comments
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
            DELETE FROM comments WHERE user_id = $1
            ",
        )
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

impl CommentRepository for PgCommentRepository {}

/// Extended operations used by seeding and integration tests
impl PgCommentRepository {
    /// Insert a comment row
    pub async fn insert(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (id, user_id, is_deleted, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(comment.id)
        .bind(comment.user_id)
        .bind(comment.is_deleted)
        .bind(comment.is_active)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    /// Fetch all comments for an owner
    pub async fn find_by_owner(&self, owner_id: Uuid) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, user_id, is_deleted, is_active, created_at, updated_at
            FROM comments
            WHERE user_id = $1
            ORDER BY created_at
            ",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }
}
