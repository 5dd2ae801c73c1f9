//! Dependent record entities - posts, comments, reports
//!
//! The `is_deleted` / `is_active` flags on these records are projections of
//! the owning user's lifecycle state, not independently authoritative: the
//! cascade coordinator rewrites them in bulk when the owner transitions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Post entity, owned via `user_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_deleted: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment entity, owned via `user_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_deleted: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Report entity, owned via `reported_user_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub reported_user_id: Uuid,
    pub is_deleted: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: Uuid, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self { id, user_id, is_deleted: false, is_active: false, created_at: now, updated_at: now }
    }
}

impl Comment {
    pub fn new(id: Uuid, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self { id, user_id, is_deleted: false, is_active: false, created_at: now, updated_at: now }
    }
}

impl Report {
    pub fn new(id: Uuid, reported_user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            reported_user_id,
            is_deleted: false,
            is_active: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Bulk-update patch for dependent records
///
/// Restricted to the two projection fields; a `None` field is left untouched
/// by the update. Applying the same patch twice is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OwnerPatch {
    pub is_deleted: Option<bool>,
    pub is_active: Option<bool>,
}

impl OwnerPatch {
    /// Patch applied when the owner is soft-deleted
    pub fn soft_delete() -> Self {
        Self { is_deleted: Some(true), is_active: None }
    }

    /// Patch applied when the owner is banned
    pub fn ban() -> Self {
        Self { is_deleted: None, is_active: Some(true) }
    }

    /// True if the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.is_deleted.is_none() && self.is_active.is_none()
    }
}
