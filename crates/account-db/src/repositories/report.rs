//! PostgreSQL implementation of the report adapter
//!
//! Reports are keyed by `reported_user_id` rather than `user_id`: the
//! cascade targets reports filed against the transitioning user.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use account_core::traits::{OwnedRecordRepository, RepoResult, ReportRepository};
use account_core::{OwnerPatch, Report};

use crate::models::ReportModel;

use super::error::map_db_error;

/// PostgreSQL implementation of the report bulk adapter
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    /// Create a new PgReportRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnedRecordRepository for PgReportRepository {
    #[instrument(skip(self))]
    async fn bulk_update_by_owner(&self, owner_id: Uuid, patch: &OwnerPatch) -> RepoResult<u64> {
        if patch.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r"
            UPDATE reports
            SET is_deleted = COALESCE($2, is_deleted),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
            WHERE reported_user_id = $1
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
            DELETE FROM reports WHERE reported_user_id = $1
            ",
        )
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

impl ReportRepository for PgReportRepository {}

/// Extended operations used by seeding and integration tests
impl PgReportRepository {
    /// Insert a report row
    pub async fn insert(&self, report: &Report) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reports (id, reported_user_id, is_deleted, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(report.id)
        .bind(report.reported_user_id)
        .bind(report.is_deleted)
        .bind(report.is_active)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    /// Fetch all reports filed against a user
    pub async fn find_by_owner(&self, owner_id: Uuid) -> RepoResult<Vec<Report>> {
        let results = sqlx::query_as::<_, ReportModel>(
            r"
            SELECT id, reported_user_id, is_deleted, is_active, created_at, updated_at
            FROM reports
            WHERE reported_user_id = $1
            ORDER BY created_at
            ",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Report::from).collect())
    }
}
