//! In-memory stores and transports for integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use account_core::traits::{
    CommentRepository, OwnedRecordRepository, PostRepository, RepoResult, ReportRepository,
    UserRepository,
};
use account_core::{DomainError, OwnerPatch, User, UserFlags};
use account_queue::{QueueTransport, TransportError};

/// One dependent record as the in-memory collections store it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredRecord {
    pub owner: Uuid,
    pub is_deleted: bool,
    pub is_active: bool,
}

/// In-memory dependent collection
#[derive(Default)]
pub struct InMemoryCollection {
    records: Mutex<Vec<StoredRecord>>,
}

impl InMemoryCollection {
    pub fn seed(&self, owner: Uuid, count: usize) {
        let mut records = self.records.lock().unwrap();
        for _ in 0..count {
            records.push(StoredRecord { owner, is_deleted: false, is_active: false });
        }
    }

    pub fn by_owner(&self, owner: Uuid) -> Vec<StoredRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner == owner)
            .copied()
            .collect()
    }
}

#[async_trait]
impl OwnedRecordRepository for InMemoryCollection {
    async fn bulk_update_by_owner(&self, owner_id: Uuid, patch: &OwnerPatch) -> RepoResult<u64> {
        let mut records = self.records.lock().unwrap();
        let mut touched = 0;
        for record in records.iter_mut().filter(|r| r.owner == owner_id) {
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
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.owner != owner_id);
        Ok((before - records.len()) as u64)
    }
}

impl PostRepository for InMemoryCollection {}
impl CommentRepository for InMemoryCollection {}
impl ReportRepository for InMemoryCollection {}

/// In-memory user store
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
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

/// In-memory queue transport with a configurable warm-up delay
///
/// Every delivered payload lands in `delivered`, in order, as the raw JSON
/// the broker would have received.
pub struct InMemoryQueue {
    fail_connects: usize,
    delivered: Arc<Mutex<Vec<String>>>,
}

impl InMemoryQueue {
    /// Transport that refuses the first `fail_connects` connection attempts
    pub fn new(fail_connects: usize) -> (Self, Arc<Mutex<Vec<String>>>) {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        (
            Self { fail_connects, delivered: Arc::clone(&delivered) },
            delivered,
        )
    }
}

#[async_trait]
impl QueueTransport for InMemoryQueue {
    async fn connect(&mut self) -> Result<(), TransportError> {
        if self.fail_connects > 0 {
            self.fail_connects -= 1;
            return Err(TransportError::Connect("broker warming up".to_string()));
        }
        Ok(())
    }

    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.delivered
            .lock()
            .unwrap()
            .push(String::from_utf8(payload.to_vec()).map_err(|e| TransportError::Send(e.to_string()))?);
        Ok(())
    }
}
