//! In-memory port implementations for controller tests
//!
//! Network IO is replaced at the trait level. Each fake records the calls it
//! receives so tests can assert that an action never reached the remote side.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::domain::result::{Error, Result};
use crate::domain::{ClusterTopologySnapshot, User, UserDraft, UserPatch};
use crate::ports::{ClusterTopologyService, RemoteUserService};

pub(crate) struct FakeUserService {
    users: Mutex<Vec<User>>,
    next_id: AtomicU64,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    update_gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl FakeUserService {
    pub(crate) fn new(initial: Vec<User>) -> Self {
        Self {
            users: Mutex::new(initial),
            next_id: AtomicU64::new(100),
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            update_gate: Mutex::new(None),
        }
    }

    /// Make every call to `op` ("list", "create", "update", ...) fail with a 500
    pub(crate) fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub(crate) fn succeed(&self, op: &'static str) {
        self.failing.lock().unwrap().remove(op);
    }

    /// Calls received so far, formatted as "op" or "op:id"
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Hold the next `update` until the returned sender fires
    pub(crate) fn gate_update(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.update_gate.lock().unwrap() = Some(rx);
        tx
    }

    fn record(&self, op: &'static str, id: Option<&str>) -> Result<()> {
        let entry = match id {
            Some(id) => format!("{}:{}", op, id),
            None => op.to_string(),
        };
        self.calls.lock().unwrap().push(entry);

        if self.failing.lock().unwrap().contains(op) {
            return Err(Error::status(500, format!("{} failed", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteUserService for FakeUserService {
    async fn list(&self) -> Result<Vec<User>> {
        self.record("list", None)?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<User> {
        self.record("get", Some(id))?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("User {}", id)))
    }

    async fn create(&self, draft: &UserDraft) -> Result<User> {
        self.record("create", None)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let user = User::new(id, draft.name.clone(), draft.email.clone());
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &str, patch: &UserPatch) -> Result<()> {
        let gate = self.update_gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        self.record("update", Some(id))?;
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.name = patch.name.clone();
            user.email = patch.email.clone();
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.record("remove", Some(id))?;
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }
}

/// Topology fake; `None` makes every fetch fail
pub(crate) struct FakeTopologyService {
    snapshot: Mutex<Option<ClusterTopologySnapshot>>,
    fetches: AtomicUsize,
}

impl FakeTopologyService {
    pub(crate) fn new(snapshot: Option<ClusterTopologySnapshot>) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn set(&self, snapshot: Option<ClusterTopologySnapshot>) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    pub(crate) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClusterTopologyService for FakeTopologyService {
    async fn fetch_topology(&self) -> Result<ClusterTopologySnapshot> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.snapshot
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::transport("connection refused"))
    }
}
