//! Cascade coordinator
//!
//! Fans a user lifecycle transition out to every dependent collection and
//! hands the resulting change event to the queue publisher. Invoked
//! explicitly by the mutation service, not by a persistence-layer hook:
//! for a hard delete the coordinator runs before the primary row is
//! removed, so dependents are always processed first.
//!
//! Within one transition the adapters are applied in the fixed order
//! posts, comments, reports. A failing adapter is logged and counted but
//! neither rolls back prior updates nor aborts the remaining ones; the
//! cascade is best-effort, not transactional, and none of its failures are
//! surfaced to the caller of the triggering mutation.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, error, instrument};
use uuid::Uuid;

use account_core::traits::OwnedRecordRepository;
use account_core::{ChangeEvent, ChangeOp, OwnerPatch, User, UserFlags};

use super::context::ServiceContext;

/// Counters for swallowed cascade and publish failures
///
/// The cascade deliberately trades strict consistency for availability;
/// these counters are how that trade-off stays observable.
#[derive(Debug, Default)]
pub struct CascadeMetrics {
    adapter_failures: AtomicU64,
    publish_failures: AtomicU64,
}

impl CascadeMetrics {
    /// Dependent-collection operations that failed and were skipped over
    pub fn adapter_failures(&self) -> u64 {
        self.adapter_failures.load(Ordering::Relaxed)
    }

    /// Change events that could not be handed to the publisher
    pub fn publish_failures(&self) -> u64 {
        self.publish_failures.load(Ordering::Relaxed)
    }

    fn record_adapter_failure(&self) {
        self.adapter_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn record_publish_failure(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }
}

/// Cascade coordinator
pub struct CascadeCoordinator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CascadeCoordinator<'a> {
    /// Create a new CascadeCoordinator
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle a hard delete of `user`
    ///
    /// Bulk-deletes every dependent record, then emits a `delete` change
    /// event carrying the user snapshot. The caller removes the primary
    /// row after this returns.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn on_user_deleted(&self, user: &User) {
        let owner = user.id;

        self.delete_one("posts", self.ctx.post_repo(), owner).await;
        self.delete_one("comments", self.ctx.comment_repo(), owner).await;
        self.delete_one("reports", self.ctx.report_repo(), owner).await;

        self.emit(ChangeOp::Delete, user);
    }

    /// Handle a flag update on `user`, given the flags before the write
    ///
    /// Diffs the flag snapshots, applies the matching bulk patches, and
    /// emits the convention-labeled event: `update` for every flag change
    /// except un-delete, which reuses the `create` label (re-activation
    /// quirk). Unban and un-delete leave dependent records un-reverted by
    /// design; only the user's own flag flips back.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn on_user_updated(&self, user: &User, previous: UserFlags) {
        let current = user.flags();

        if previous.soft_deleted(current) {
            self.apply_patch(user.id, &OwnerPatch::soft_delete()).await;
        }
        if previous.banned(current) {
            self.apply_patch(user.id, &OwnerPatch::ban()).await;
        }

        let op = if previous.undeleted(current) {
            ChangeOp::Create
        } else {
            ChangeOp::Update
        };
        self.emit(op, user);
    }

    /// Apply one patch across the three collections in fixed order
    async fn apply_patch(&self, owner: Uuid, patch: &OwnerPatch) {
        self.patch_one("posts", self.ctx.post_repo(), owner, patch).await;
        self.patch_one("comments", self.ctx.comment_repo(), owner, patch).await;
        self.patch_one("reports", self.ctx.report_repo(), owner, patch).await;
    }

    async fn patch_one<R>(&self, collection: &'static str, repo: &R, owner: Uuid, patch: &OwnerPatch)
    where
        R: OwnedRecordRepository + ?Sized,
    {
        match repo.bulk_update_by_owner(owner, patch).await {
            Ok(count) => {
                debug!(collection, owner_id = %owner, rows = count, "Cascade update applied");
            }
            Err(e) => {
                error!(collection, owner_id = %owner, error = %e, "Cascade update failed; continuing");
                self.ctx.cascade_metrics().record_adapter_failure();
            }
        }
    }

    async fn delete_one<R>(&self, collection: &'static str, repo: &R, owner: Uuid)
    where
        R: OwnedRecordRepository + ?Sized,
    {
        match repo.bulk_delete_by_owner(owner).await {
            Ok(count) => {
                debug!(collection, owner_id = %owner, rows = count, "Cascade delete applied");
            }
            Err(e) => {
                error!(collection, owner_id = %owner, error = %e, "Cascade delete failed; continuing");
                self.ctx.cascade_metrics().record_adapter_failure();
            }
        }
    }

    /// Emit one change event, fire-and-forget
    pub(crate) fn emit(&self, op: ChangeOp, user: &User) {
        let event = match ChangeEvent::for_entity(op, user) {
            Ok(event) => event,
            Err(e) => {
                error!(user_id = %user.id, error = %e, "Failed to build change event");
                self.ctx.cascade_metrics().record_publish_failure();
                return;
            }
        };

        if let Err(e) = self.ctx.publisher().publish(event) {
            error!(user_id = %user.id, operation = %op, error = %e, "Failed to enqueue change event");
            self.ctx.cascade_metrics().record_publish_failure();
        }
    }
}
