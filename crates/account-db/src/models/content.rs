//! Dependent-record database models

use account_core::{Comment, Post, Report};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_deleted: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_deleted: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the reports table
#[derive(Debug, Clone, FromRow)]
pub struct ReportModel {
    pub id: Uuid,
    pub reported_user_id: Uuid,
    pub is_deleted: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: model.id,
            user_id: model.user_id,
            is_deleted: model.is_deleted,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: model.id,
            user_id: model.user_id,
            is_deleted: model.is_deleted,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ReportModel> for Report {
    fn from(model: ReportModel) -> Self {
        Report {
            id: model.id,
            reported_user_id: model.reported_user_id,
            is_deleted: model.is_deleted,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
