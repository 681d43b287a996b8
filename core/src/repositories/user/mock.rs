//! In-memory implementation of UserRepository and TransactionManager
//!
//! Writes made through a `MockTx` are staged on the handle and only applied
//! on commit, so a rolled back or dropped handle leaves no trace. The email
//! uniqueness check runs both at insert and at commit, mirroring a UNIQUE
//! index. Emails compare case-insensitively, as under the table's `_ci`
//! collation.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User, UserStatus};
use crate::errors::DomainError;
use crate::repositories::transaction::TransactionManager;

use super::trait_::UserRepository;

#[derive(Debug)]
enum StagedWrite {
    Insert(User),
    Activate(String),
}

#[derive(Debug, Default)]
struct TxCounters {
    begun: AtomicUsize,
    committed: AtomicUsize,
    rolled_back: AtomicUsize,
    dropped: AtomicUsize,
}

/// Point-in-time view of the transaction counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxStats {
    pub begun: usize,
    pub committed: usize,
    /// Explicit rollbacks
    pub rolled_back: usize,
    /// Handles dropped without commit or rollback
    pub dropped: usize,
}

/// Transaction handle for the mock store
#[derive(Debug)]
pub struct MockTx {
    staged: Vec<StagedWrite>,
    counters: Arc<TxCounters>,
    settled: bool,
}

impl Drop for MockTx {
    fn drop(&mut self) {
        if !self.settled {
            self.counters.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Mock user repository for testing
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
    counters: Arc<TxCounters>,
    fail_reads: Arc<AtomicBool>,
    fail_commit: Arc<AtomicBool>,
    fail_ping: Arc<AtomicBool>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            counters: Arc::new(TxCounters::default()),
            fail_reads: Arc::new(AtomicBool::new(false)),
            fail_commit: Arc::new(AtomicBool::new(false)),
            fail_ping: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Number of committed users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Committed user with this email, bypassing any transaction
    pub async fn find_committed(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| same_email(&u.email, email))
            .cloned()
    }

    /// Make lookups fail with an internal error
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make commits fail with an internal error
    pub fn set_fail_commit(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    /// Make the store report itself unreachable
    pub fn set_fail_ping(&self, fail: bool) {
        self.fail_ping.store(fail, Ordering::SeqCst);
    }

    pub fn tx_stats(&self) -> TxStats {
        TxStats {
            begun: self.counters.begun.load(Ordering::SeqCst),
            committed: self.counters.committed.load(Ordering::SeqCst),
            rolled_back: self.counters.rolled_back.load(Ordering::SeqCst),
            dropped: self.counters.dropped.load(Ordering::SeqCst),
        }
    }

    fn check_reads(&self) -> Result<(), DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock read failure"));
        }
        Ok(())
    }

    /// Committed rows with the handle's staged writes applied on top
    fn view(committed: &HashMap<i64, User>, tx: Option<&MockTx>) -> HashMap<i64, User> {
        let mut view = committed.clone();
        if let Some(tx) = tx {
            for write in &tx.staged {
                apply(&mut view, write);
            }
        }
        view
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn apply(users: &mut HashMap<i64, User>, write: &StagedWrite) {
    match write {
        StagedWrite::Insert(user) => {
            users.insert(user.id, user.clone());
        }
        StagedWrite::Activate(email) => {
            if let Some(user) = users
                .values_mut()
                .find(|u| same_email(&u.email, email) && u.status == UserStatus::Pending)
            {
                user.activate();
            }
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    type Tx = MockTx;

    async fn create(&self, tx: Option<&mut MockTx>, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let view = Self::view(&users, tx.as_deref());

        if view.values().any(|u| same_email(&u.email, &user.email)) {
            return Err(DomainError::conflict("user already exists"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = user.into_user(id, Utc::now());

        match tx {
            Some(tx) => tx.staged.push(StagedWrite::Insert(created.clone())),
            None => {
                users.insert(id, created.clone());
            }
        }
        Ok(created)
    }

    async fn get_by_email(
        &self,
        tx: Option<&mut MockTx>,
        email: &str,
    ) -> Result<Option<User>, DomainError> {
        self.check_reads()?;
        let users = self.users.read().await;
        Ok(Self::view(&users, tx.as_deref())
            .into_values()
            .find(|u| same_email(&u.email, email)))
    }

    async fn get_by_id(&self, tx: Option<&mut MockTx>, id: i64) -> Result<Option<User>, DomainError> {
        self.check_reads()?;
        let users = self.users.read().await;
        Ok(Self::view(&users, tx.as_deref()).remove(&id))
    }

    async fn activate_by_email(
        &self,
        tx: Option<&mut MockTx>,
        email: &str,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let view = Self::view(&users, tx.as_deref());

        let pending = view
            .values()
            .any(|u| same_email(&u.email, email) && u.status == UserStatus::Pending);
        if !pending {
            return Err(DomainError::not_found("user"));
        }

        let write = StagedWrite::Activate(email.to_string());
        match tx {
            Some(tx) => tx.staged.push(write),
            None => apply(&mut users, &write),
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionManager for MockUserRepository {
    type Tx = MockTx;

    async fn begin(&self) -> Result<MockTx, DomainError> {
        self.counters.begun.fetch_add(1, Ordering::SeqCst);
        Ok(MockTx {
            staged: Vec::new(),
            counters: self.counters.clone(),
            settled: false,
        })
    }

    async fn commit(&self, mut tx: MockTx) -> Result<(), DomainError> {
        tx.settled = true;
        if self.fail_commit.load(Ordering::SeqCst) {
            self.counters.rolled_back.fetch_add(1, Ordering::SeqCst);
            return Err(DomainError::internal("mock commit failure"));
        }

        let mut users = self.users.write().await;
        let mut next = users.clone();
        for write in tx.staged.drain(..) {
            if let StagedWrite::Insert(user) = &write {
                if next.values().any(|u| same_email(&u.email, &user.email)) {
                    self.counters.rolled_back.fetch_add(1, Ordering::SeqCst);
                    return Err(DomainError::conflict("user already exists"));
                }
            }
            apply(&mut next, &write);
        }
        *users = next;

        self.counters.committed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(&self, mut tx: MockTx) -> Result<(), DomainError> {
        tx.settled = true;
        tx.staged.clear();
        self.counters.rolled_back.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock store unreachable"));
        }
        Ok(())
    }
}
