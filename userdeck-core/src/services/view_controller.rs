//! View controller - orchestrates remote calls and local state
//!
//! Every action follows the same shape: read what it needs from local state,
//! release the borrow, suspend on one remote call, then apply the result
//! synchronously. Local state only changes after a successful response.
//!
//! The controller is meant to be driven from a single task. Several actions
//! may be in flight at once (e.g. via `tokio::join!`), and nothing serializes
//! operations on the same record: whichever response resolves last is
//! applied last.

use std::cell::RefCell;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::result::Result;
use crate::domain::{ClusterTopologySnapshot, User, UserDraft, UserField};
use crate::ports::{ClusterTopologyService, RemoteUserService};
use crate::services::outcome::{failed, ActionOutcome};
use crate::services::render::RenderedView;
use crate::state::{EditSession, UserCollectionState};

/// Outcomes of the two independent startup loads
#[derive(Debug)]
pub struct StartupReport {
    pub users: ActionOutcome,
    pub topology: ActionOutcome,
}

/// Owner of all client-side state for the user-management page
pub struct ViewController {
    user_service: Arc<dyn RemoteUserService>,
    topology_service: Arc<dyn ClusterTopologyService>,
    users: RefCell<UserCollectionState>,
    topology: RefCell<Option<ClusterTopologySnapshot>>,
    draft: RefCell<UserDraft>,
    session: RefCell<EditSession>,
}

impl ViewController {
    pub fn new(
        user_service: Arc<dyn RemoteUserService>,
        topology_service: Arc<dyn ClusterTopologyService>,
    ) -> Self {
        Self {
            user_service,
            topology_service,
            users: RefCell::new(UserCollectionState::new()),
            topology: RefCell::new(None),
            draft: RefCell::new(UserDraft::default()),
            session: RefCell::new(EditSession::Empty),
        }
    }

    // === Startup ===

    /// Load users and topology concurrently
    ///
    /// Neither load waits for the other, and a failure in one leaves the
    /// other's result in place.
    pub async fn start(&self) -> StartupReport {
        let (users, topology) = tokio::join!(self.load_users(), self.refresh_topology());
        StartupReport { users, topology }
    }

    async fn load_users(&self) -> ActionOutcome {
        match self.user_service.list().await {
            Ok(users) => {
                info!(count = users.len(), "loaded users");
                self.users.borrow_mut().replace_all(users);
                ActionOutcome::Applied
            }
            Err(e) => failed("list users", e),
        }
    }

    /// Fetch the topology and replace the held snapshot wholesale
    pub async fn refresh_topology(&self) -> ActionOutcome {
        match self.topology_service.fetch_topology().await {
            Ok(snapshot) => {
                info!(
                    node_count = snapshot.node_count,
                    nodes = snapshot.nodes.len(),
                    "loaded cluster topology"
                );
                *self.topology.borrow_mut() = Some(snapshot);
                ActionOutcome::Applied
            }
            Err(e) => failed("fetch topology", e),
        }
    }

    // === Creation form ===

    pub fn draft_field(&self, field: UserField, value: impl Into<String>) {
        self.draft.borrow_mut().set(field, value);
    }

    /// Submit the creation form
    ///
    /// On success the server's record is appended and the form is cleared.
    /// On failure the draft stays as typed.
    pub async fn create_user(&self) -> ActionOutcome {
        let draft = self.draft.borrow().clone();
        if let Err(e) = draft.validate() {
            warn!(error = %e, "create skipped");
            return ActionOutcome::Skipped(e.to_string());
        }

        match self.user_service.create(&draft).await {
            Ok(user) => {
                info!(id = %user.id, "created user");
                self.users.borrow_mut().append(user);
                *self.draft.borrow_mut() = UserDraft::default();
                ActionOutcome::Applied
            }
            Err(e) => failed("create user", e),
        }
    }

    // === Edit session ===

    /// Start editing a detached copy of `user`
    pub fn begin_edit(&self, user: &User) -> ActionOutcome {
        debug!(id = %user.id, "begin edit");
        self.session.borrow_mut().begin(user);
        ActionOutcome::Applied
    }

    pub fn edit_field(&self, field: UserField, value: impl Into<String>) -> ActionOutcome {
        if self.session.borrow_mut().change_field(field, value) {
            ActionOutcome::Applied
        } else {
            ActionOutcome::Skipped("no edit in progress".to_string())
        }
    }

    /// Drop the session without contacting the server
    pub fn cancel_edit(&self) -> ActionOutcome {
        let mut session = self.session.borrow_mut();
        if !session.is_editing() {
            return ActionOutcome::Skipped("no edit in progress".to_string());
        }
        session.cancel();
        ActionOutcome::Applied
    }

    /// Send the edited snapshot to the server
    ///
    /// On success the session closes and the snapshot taken at submit time
    /// replaces the collection entry; the server's echoed body is not used.
    /// On failure the session keeps the edit so it can be retried.
    pub async fn submit_edit(&self) -> ActionOutcome {
        let snapshot = match self.session.borrow().editing() {
            Some(user) => user.clone(),
            None => return ActionOutcome::Skipped("no edit in progress".to_string()),
        };

        let patch = snapshot.patch();
        if let Err(e) = patch.validate() {
            warn!(id = %snapshot.id, error = %e, "update skipped");
            return ActionOutcome::Skipped(e.to_string());
        }

        match self.user_service.update(&snapshot.id, &patch).await {
            Ok(()) => {
                info!(id = %snapshot.id, "updated user");
                self.session.borrow_mut().finish();
                if !self.users.borrow_mut().apply_update(snapshot) {
                    debug!("updated user is no longer in the collection");
                }
                ActionOutcome::Applied
            }
            Err(e) => failed("update user", e),
        }
    }

    // === Deletion ===

    pub async fn delete_user(&self, id: &str) -> ActionOutcome {
        match self.user_service.remove(id).await {
            Ok(()) => {
                info!(id, "deleted user");
                if !self.users.borrow_mut().remove(id) {
                    debug!(id, "deleted user was already absent locally");
                }
                ActionOutcome::Applied
            }
            Err(e) => failed("delete user", e),
        }
    }

    // === Lookups ===

    /// Fetch one user straight from the server; local state is not touched
    pub async fn lookup_user(&self, id: &str) -> Result<User> {
        self.user_service.get(id).await
    }

    // === Read-only snapshots ===

    pub fn users(&self) -> Vec<User> {
        self.users.borrow().users().to_vec()
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.users.borrow().get(id).cloned()
    }

    pub fn topology(&self) -> Option<ClusterTopologySnapshot> {
        self.topology.borrow().clone()
    }

    pub fn draft(&self) -> UserDraft {
        self.draft.borrow().clone()
    }

    pub fn edit_session(&self) -> EditSession {
        self.session.borrow().clone()
    }

    pub fn view(&self) -> RenderedView {
        RenderedView::build(
            &self.users.borrow(),
            self.topology.borrow().as_ref(),
            &self.draft.borrow(),
            &self.session.borrow(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::Error;
    use crate::domain::ClusterNode;
    use crate::ports::fakes::{FakeTopologyService, FakeUserService};

    fn two_node_topology() -> ClusterTopologySnapshot {
        ClusterTopologySnapshot {
            node_count: 2,
            nodes: vec![
                ClusterNode::new("10.0.0.1", "dc1", "r1"),
                ClusterNode::new("10.0.0.2", "dc1", "r2"),
            ],
        }
    }

    fn setup(
        users: Vec<User>,
        topology: Option<ClusterTopologySnapshot>,
    ) -> (ViewController, Arc<FakeUserService>, Arc<FakeTopologyService>) {
        let user_service = Arc::new(FakeUserService::new(users));
        let topology_service = Arc::new(FakeTopologyService::new(topology));
        let controller = ViewController::new(user_service.clone(), topology_service.clone());
        (controller, user_service, topology_service)
    }

    fn ana() -> User {
        User::new("1", "Ana", "a@x.com")
    }

    #[tokio::test]
    async fn test_startup_renders_users_and_topology() {
        let (controller, _, _) = setup(vec![ana()], Some(two_node_topology()));

        let report = controller.start().await;
        assert!(report.users.is_applied());
        assert!(report.topology.is_applied());

        let view = controller.view();
        assert_eq!(view.user_lines, vec!["Ana — a@x.com".to_string()]);
        assert_eq!(view.topology_header, "Número de nós: 2");
        assert_eq!(view.node_lines.len(), 2);
    }

    #[tokio::test]
    async fn test_startup_loads_are_independent() {
        let (controller, users, _) = setup(vec![ana()], Some(two_node_topology()));
        users.fail("list");

        let report = controller.start().await;
        assert!(report.users.is_failed());
        assert!(report.topology.is_applied());
        assert!(controller.users().is_empty());
        assert_eq!(controller.topology().unwrap().node_count, 2);

        let (controller, _, _) = setup(vec![ana()], None);
        let report = controller.start().await;
        assert!(report.users.is_applied());
        assert!(report.topology.is_failed());
        assert!(controller.topology().is_none());
        assert_eq!(controller.users().len(), 1);
    }

    #[tokio::test]
    async fn test_creates_append_server_ids_in_call_order() {
        let (controller, _, _) = setup(vec![ana()], None);
        controller.start().await;

        let mut expected = vec!["1".to_string()];
        for i in 0..3 {
            controller.draft_field(UserField::Name, format!("User {}", i));
            controller.draft_field(UserField::Email, format!("u{}@x.com", i));
            assert!(controller.create_user().await.is_applied());
            // Fake assigns ids from 100 upward
            expected.push((100 + i).to_string());
            assert_eq!(controller.draft(), UserDraft::default());
        }

        let ids: Vec<_> = controller.users().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_failed_create_keeps_draft() {
        let (controller, users, _) = setup(vec![], None);
        users.fail("create");

        controller.draft_field(UserField::Name, "Ana");
        controller.draft_field(UserField::Email, "a@x.com");
        let outcome = controller.create_user().await;

        assert!(matches!(outcome, ActionOutcome::Failed(Error::Transport { .. })));
        assert_eq!(controller.draft(), UserDraft::new("Ana", "a@x.com"));
        assert!(controller.users().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_service() {
        let (controller, users, _) = setup(vec![], None);
        controller.draft_field(UserField::Name, "Ana");
        controller.draft_field(UserField::Email, "nope");

        let outcome = controller.create_user().await;
        assert!(matches!(outcome, ActionOutcome::Skipped(_)));
        assert!(users.calls().is_empty());
    }

    #[tokio::test]
    async fn test_begin_then_cancel_makes_no_remote_call() {
        let (controller, users, _) = setup(vec![ana()], None);
        controller.start().await;
        let before = controller.users();
        let calls_before = users.calls();

        controller.begin_edit(&ana());
        assert!(controller.edit_session().is_editing());
        assert!(controller.cancel_edit().is_applied());

        assert_eq!(controller.edit_session(), EditSession::Empty);
        assert_eq!(controller.users(), before);
        assert_eq!(users.calls(), calls_before);
        assert!(!controller.cancel_edit().is_applied());
    }

    #[tokio::test]
    async fn test_edit_does_not_touch_collection_until_confirmed() {
        let (controller, _, _) = setup(vec![ana()], None);
        controller.start().await;

        controller.begin_edit(&ana());
        controller.edit_field(UserField::Name, "X");
        assert_eq!(controller.user("1").unwrap().name, "Ana");

        assert!(controller.submit_edit().await.is_applied());
        assert_eq!(controller.user("1").unwrap().name, "X");
        assert_eq!(controller.edit_session(), EditSession::Empty);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_edit() {
        let (controller, users, _) = setup(vec![ana()], None);
        controller.start().await;
        users.fail("update");

        controller.begin_edit(&ana());
        controller.edit_field(UserField::Name, "X");
        let outcome = controller.submit_edit().await;

        assert!(outcome.is_failed());
        match controller.edit_session() {
            EditSession::Editing(user) => assert_eq!(user.name, "X"),
            EditSession::Empty => panic!("edit was lost"),
        }
        assert_eq!(controller.user("1").unwrap().name, "Ana");

        // Retry once the backend recovers
        users.succeed("update");
        assert!(controller.submit_edit().await.is_applied());
        assert_eq!(controller.user("1").unwrap().name, "X");
    }

    #[tokio::test]
    async fn test_submit_without_session_is_skipped() {
        let (controller, users, _) = setup(vec![ana()], None);
        assert!(matches!(controller.submit_edit().await, ActionOutcome::Skipped(_)));
        assert!(matches!(
            controller.edit_field(UserField::Email, "z@x.com"),
            ActionOutcome::Skipped(_)
        ));
        assert!(users.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_applies_submitted_snapshot_for_unknown_id_as_noop() {
        let (controller, _, _) = setup(vec![ana()], None);
        controller.start().await;
        let before = controller.users();

        controller.begin_edit(&User::new("404", "Ghost", "g@x.com"));
        assert!(controller.submit_edit().await.is_applied());
        assert_eq!(controller.users(), before);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_record() {
        let (controller, users, _) = setup(vec![ana()], None);
        controller.start().await;
        users.fail("remove");

        assert!(controller.delete_user("1").await.is_failed());
        assert_eq!(controller.users().len(), 1);

        users.succeed("remove");
        assert!(controller.delete_user("1").await.is_applied());
        assert!(controller.users().is_empty());
        // Second delete of the same id leaves the collection unchanged
        assert!(controller.delete_user("1").await.is_applied());
        assert!(controller.users().is_empty());
    }

    #[tokio::test]
    async fn test_delete_during_inflight_update_last_response_wins() {
        let (controller, users, _) = setup(
            vec![ana(), User::new("2", "Bruno", "b@x.com")],
            None,
        );
        controller.start().await;

        controller.begin_edit(&ana());
        controller.edit_field(UserField::Email, "ana@x.com");
        let release = users.gate_update();

        let (update, delete) = tokio::join!(controller.submit_edit(), async {
            let outcome = controller.delete_user("1").await;
            let _ = release.send(());
            outcome
        });

        // Delete resolved first; the later update finds nothing to replace
        assert!(delete.is_applied());
        assert!(update.is_applied());
        let ids: Vec<_> = controller.users().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["2".to_string()]);
        assert_eq!(controller.edit_session(), EditSession::Empty);
    }

    #[tokio::test]
    async fn test_refresh_topology_replaces_snapshot() {
        let (controller, _, topology) = setup(vec![], Some(two_node_topology()));
        controller.start().await;
        assert_eq!(topology.fetches(), 1);

        topology.set(Some(ClusterTopologySnapshot {
            node_count: 1,
            nodes: vec![ClusterNode::new("10.0.0.9", "dc2", "r9")],
        }));
        assert!(controller.refresh_topology().await.is_applied());
        let snapshot = controller.topology().unwrap();
        assert_eq!(snapshot.node_count, 1);
        assert_eq!(snapshot.nodes[0].address, "10.0.0.9");

        // A failed refresh keeps the previous snapshot
        topology.set(None);
        assert!(controller.refresh_topology().await.is_failed());
        assert_eq!(controller.topology().unwrap().node_count, 1);
        assert_eq!(topology.fetches(), 3);
    }

    #[tokio::test]
    async fn test_lookup_user_leaves_collection_alone() {
        let (controller, _, _) = setup(vec![ana()], None);
        let found = controller.lookup_user("1").await.unwrap();
        assert_eq!(found, ana());
        assert!(controller.users().is_empty());
        assert!(matches!(
            controller.lookup_user("2").await,
            Err(Error::NotFound(_))
        ));
    }
}
