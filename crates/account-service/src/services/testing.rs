//! In-memory fakes shared by service-layer unit tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use account_core::traits::{
    ChangeEventPublisher, CommentRepository, OwnedRecordRepository, PostRepository, RepoResult,
    ReportRepository, UserRepository,
};
use account_core::{ChangeEvent, ChangeOp, DomainError, OwnerPatch, User, UserFlags};

use super::context::ServiceContext;

/// One dependent record as the fakes store it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockRecord {
    pub is_deleted: bool,
    pub is_active: bool,
}

/// In-memory dependent collection keyed by owner id
#[derive(Default)]
pub struct MemoryOwnedRepo {
    records: Mutex<Vec<(Uuid, MockRecord)>>,
    fail_with: Option<String>,
}

impl MemoryOwnedRepo {
    /// All records, regardless of owner
    pub fn records(&self) -> Vec<MockRecord> {
        self.records.lock().unwrap().iter().map(|(_, r)| *r).collect()
    }

    /// Overwrite the flags on every stored record
    pub fn set_all(&self, is_deleted: bool, is_active: bool) {
        for (_, record) in self.records.lock().unwrap().iter_mut() {
            record.is_deleted = is_deleted;
            record.is_active = is_active;
        }
    }
}

#[async_trait]
impl OwnedRecordRepository for MemoryOwnedRepo {
    async fn bulk_update_by_owner(&self, owner_id: Uuid, patch: &OwnerPatch) -> RepoResult<u64> {
        if let Some(msg) = &self.fail_with {
            return Err(DomainError::DatabaseError(msg.clone()));
        }
        let mut records = self.records.lock().unwrap();
        let mut touched = 0;
        for (_, record) in records.iter_mut().filter(|(owner, _)| *owner == owner_id) {
            if let Some(is_deleted) = patch.is_deleted {
                record.is_deleted = is_deleted;
            }
            if let Some(is_active) = patch.is_active {
                record.is_active = is_active;
            }
            touched += 1;
        }
        Ok(touched)
    }

    async fn bulk_delete_by_owner(&self, owner_id: Uuid) -> RepoResult<u64> {
        if let Some(msg) = &self.fail_with {
            return Err(DomainError::DatabaseError(msg.clone()));
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|(owner, _)| *owner != owner_id);
        Ok((before - records.len()) as u64)
    }
}

impl PostRepository for MemoryOwnedRepo {}
impl CommentRepository for MemoryOwnedRepo {}
impl ReportRepository for MemoryOwnedRepo {}

/// Collection pre-seeded with `count` clean records for `owner`
pub fn owned_with(owner: Uuid, count: usize) -> Arc<MemoryOwnedRepo> {
    let repo = MemoryOwnedRepo::default();
    {
        let mut records = repo.records.lock().unwrap();
        for _ in 0..count {
            records.push((owner, MockRecord { is_deleted: false, is_active: false }));
        }
    }
    Arc::new(repo)
}

/// Collection whose bulk operations always fail
pub fn failing_owned(err: DomainError) -> Arc<MemoryOwnedRepo> {
    Arc::new(MemoryOwnedRepo {
        records: Mutex::new(Vec::new()),
        fail_with: Some(err.to_string()),
    })
}

/// In-memory user store
#[derive(Default)]
pub struct MemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepo {
    pub fn with_user(user: User) -> Arc<Self> {
        Arc::new(Self { users: Mutex::new(vec![user]) })
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update_flags(
        &self,
        id: Uuid,
        flags: UserFlags,
        updated_by: Option<Uuid>,
    ) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.set_flags(flags, updated_by);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(DomainError::UserNotFound(id));
        }
        Ok(())
    }
}

/// Publisher that records every accepted event
pub struct CapturingPublisher {
    pub events: Arc<Mutex<Vec<ChangeEvent>>>,
}

impl ChangeEventPublisher for CapturingPublisher {
    fn publish(&self, event: ChangeEvent) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Publisher that rejects every event, as a full buffer would
pub struct RejectingPublisher;

impl ChangeEventPublisher for RejectingPublisher {
    fn publish(&self, _event: ChangeEvent) -> Result<(), DomainError> {
        Err(DomainError::QueueError("publish buffer full".to_string()))
    }
}

/// A fresh user with unconfirmed defaults
pub fn test_user() -> User {
    User::new(Uuid::new_v4(), "test@example.com".to_string(), "hash".to_string())
}

/// Build a context over in-memory collections and a capturing publisher
#[allow(clippy::type_complexity)]
pub fn test_context(
    posts: Arc<MemoryOwnedRepo>,
    comments: Arc<MemoryOwnedRepo>,
    reports: Arc<MemoryOwnedRepo>,
) -> (
    ServiceContext,
    (Arc<MemoryOwnedRepo>, Arc<MemoryOwnedRepo>, Arc<MemoryOwnedRepo>),
    Arc<Mutex<Vec<ChangeEvent>>>,
) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let ctx = ServiceContext::new(
        Arc::new(MemoryUserRepo::default()),
        Arc::clone(&posts) as _,
        Arc::clone(&comments) as _,
        Arc::clone(&reports) as _,
        Arc::new(CapturingPublisher { events: Arc::clone(&events) }),
    );
    (ctx, (posts, comments, reports), events)
}

/// The operation labels of every published event, in order
pub fn published_ops(events: &Arc<Mutex<Vec<ChangeEvent>>>) -> Vec<ChangeOp> {
    events.lock().unwrap().iter().map(|e| e.operation).collect()
}
