//! User entity - the primary account record

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User account entity
///
/// The lifecycle flags on this entity drive the state of every dependent
/// record (posts, comments, reports) owned by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Opaque hash produced by the external auth layer; never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_deleted: bool,
    pub is_banned: bool,
    pub is_admin: bool,
    pub email_confirmed: bool,
    /// Id of the user that performed the last mutation (audit trail).
    pub last_update_from_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Snapshot of the four lifecycle flags, used to diff transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserFlags {
    pub is_deleted: bool,
    pub is_banned: bool,
    pub is_admin: bool,
    pub email_confirmed: bool,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Uuid, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            password_hash,
            is_deleted: false,
            is_banned: false,
            is_admin: false,
            email_confirmed: false,
            last_update_from_user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Current lifecycle flags
    pub fn flags(&self) -> UserFlags {
        UserFlags {
            is_deleted: self.is_deleted,
            is_banned: self.is_banned,
            is_admin: self.is_admin,
            email_confirmed: self.email_confirmed,
        }
    }

    /// Apply a flags snapshot, touching `updated_at`
    pub fn set_flags(&mut self, flags: UserFlags, updated_by: Option<Uuid>) {
        self.is_deleted = flags.is_deleted;
        self.is_banned = flags.is_banned;
        self.is_admin = flags.is_admin;
        self.email_confirmed = flags.email_confirmed;
        self.last_update_from_user_id = updated_by;
        self.updated_at = Utc::now();
    }
}

impl UserFlags {
    /// Soft-delete transition: `is_deleted` flipped false -> true
    pub fn soft_deleted(self, after: UserFlags) -> bool {
        !self.is_deleted && after.is_deleted
    }

    /// Un-delete transition: `is_deleted` flipped true -> false
    pub fn undeleted(self, after: UserFlags) -> bool {
        self.is_deleted && !after.is_deleted
    }

    /// Ban transition: `is_banned` flipped false -> true
    pub fn banned(self, after: UserFlags) -> bool {
        !self.is_banned && after.is_banned
    }

    /// Unban transition: `is_banned` flipped true -> false
    pub fn unbanned(self, after: UserFlags) -> bool {
        self.is_banned && !after.is_banned
    }
}
