//! User database model

use account_core::User;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_deleted: bool,
    pub is_banned: bool,
    pub is_admin: bool,
    pub email_confirmed: bool,
    pub last_update_from_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            is_deleted: model.is_deleted,
            is_banned: model.is_banned,
            is_admin: model.is_admin,
            email_confirmed: model.email_confirmed,
            last_update_from_user_id: model.last_update_from_user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
