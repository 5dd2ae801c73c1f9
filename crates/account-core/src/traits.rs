//! Repository and publisher traits (ports) - define the interface for
//! data access and event propagation
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{OwnerPatch, User, UserFlags};
use crate::error::DomainError;
use crate::events::ChangeEvent;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Update the lifecycle flags of an existing user
    async fn update_flags(
        &self,
        id: Uuid,
        flags: UserFlags,
        updated_by: Option<Uuid>,
    ) -> RepoResult<()>;

    /// Hard-delete a user row
    ///
    /// Callers must have run the dependent-record cascade first; the row
    /// is never removed before its dependents have been processed.
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Dependent-Collection Adapter
// ============================================================================

/// Bulk data access for one dependent collection, keyed by owner reference
///
/// For posts and comments the owner reference is `user_id`; for reports it
/// is `reported_user_id`. Both operations are idempotent.
#[async_trait]
pub trait OwnedRecordRepository: Send + Sync {
    /// Apply `patch` to every record owned by `owner_id`, returning the
    /// number of rows touched
    async fn bulk_update_by_owner(&self, owner_id: Uuid, patch: &OwnerPatch) -> RepoResult<u64>;

    /// Remove every record owned by `owner_id`, returning the number of
    /// rows removed
    async fn bulk_delete_by_owner(&self, owner_id: Uuid) -> RepoResult<u64>;
}

/// Marker traits so the three collections stay distinct at injection sites
pub trait PostRepository: OwnedRecordRepository {}
pub trait CommentRepository: OwnedRecordRepository {}
pub trait ReportRepository: OwnedRecordRepository {}

// ============================================================================
// Change Event Publisher
// ============================================================================

/// Hand-off point for change events
///
/// `publish` must not block business logic: implementations accept the
/// event immediately (buffering it if the broker connection is not ready)
/// and deliver asynchronously. A `QueueError` means the event was not
/// accepted at all, e.g. the buffer is full or the publisher has shut down.
pub trait ChangeEventPublisher: Send + Sync {
    fn publish(&self, event: ChangeEvent) -> Result<(), DomainError>;
}
