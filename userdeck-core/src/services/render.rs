//! Plain-text projection of controller state

use std::fmt;

use serde::Serialize;

use crate::domain::{ClusterNode, ClusterTopologySnapshot, User, UserDraft};
use crate::state::{EditSession, UserCollectionState};

pub const TOPOLOGY_TITLE: &str = "Informações do Cluster";
pub const TOPOLOGY_LOADING: &str = "Carregando informações do cluster...";
pub const USERS_TITLE: &str = "Lista de Usuários";
pub const NO_USERS: &str = "Nenhum usuário encontrado.";

/// Everything a frontend needs to draw the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    /// `"Número de nós: N"`, or the loading text while no snapshot exists
    pub topology_header: String,
    pub node_lines: Vec<String>,
    /// One line per user; empty when there are none
    pub user_lines: Vec<String>,
    pub draft: UserDraft,
    /// Snapshot under edit, if any
    pub editing: Option<User>,
}

impl RenderedView {
    pub fn build(
        users: &UserCollectionState,
        topology: Option<&ClusterTopologySnapshot>,
        draft: &UserDraft,
        session: &EditSession,
    ) -> Self {
        let (topology_header, node_lines) = match topology {
            Some(snapshot) => (
                node_count_line(snapshot),
                snapshot.nodes.iter().map(node_line).collect(),
            ),
            None => (TOPOLOGY_LOADING.to_string(), Vec::new()),
        };

        Self {
            topology_header,
            node_lines,
            user_lines: users.users().iter().map(user_line).collect(),
            draft: draft.clone(),
            editing: session.editing().cloned(),
        }
    }
}

/// Uses the reported count, never `nodes.len()`
pub fn node_count_line(snapshot: &ClusterTopologySnapshot) -> String {
    format!("Número de nós: {}", snapshot.node_count)
}

pub fn node_line(node: &ClusterNode) -> String {
    format!(
        "Endereço: {}, Data Center: {}, Rack: {}",
        node.address, node.datacenter, node.rack
    )
}

pub fn user_line(user: &User) -> String {
    format!("{} — {}", user.name, user.email)
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TOPOLOGY_TITLE)?;
        writeln!(f, "{}", self.topology_header)?;
        for line in &self.node_lines {
            writeln!(f, "  • {}", line)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", USERS_TITLE)?;
        if self.user_lines.is_empty() {
            writeln!(f, "{}", NO_USERS)?;
        }
        for line in &self.user_lines {
            writeln!(f, "  • {}", line)?;
        }

        if let Some(user) = &self.editing {
            writeln!(f)?;
            writeln!(f, "Atualizar Usuário [{}]: {}", user.id, user_line(user))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_and_empty_placeholders() {
        let view = RenderedView::build(
            &UserCollectionState::new(),
            None,
            &UserDraft::default(),
            &EditSession::Empty,
        );
        assert_eq!(view.topology_header, TOPOLOGY_LOADING);
        assert!(view.node_lines.is_empty());
        assert!(view.user_lines.is_empty());

        let text = view.to_string();
        assert!(text.contains(NO_USERS));
        assert!(!text.contains("Atualizar"));
    }

    #[test]
    fn test_count_line_is_not_derived_from_nodes() {
        let snapshot = ClusterTopologySnapshot {
            node_count: 7,
            nodes: vec![ClusterNode::new("10.0.0.1", "dc1", "r1")],
        };
        let view = RenderedView::build(
            &UserCollectionState::new(),
            Some(&snapshot),
            &UserDraft::default(),
            &EditSession::Empty,
        );
        assert_eq!(view.topology_header, "Número de nós: 7");
        assert_eq!(
            view.node_lines,
            vec!["Endereço: 10.0.0.1, Data Center: dc1, Rack: r1".to_string()]
        );
    }

    #[test]
    fn test_editing_section() {
        let user = User::new("1", "Ana", "a@x.com");
        let mut users = UserCollectionState::new();
        users.replace_all(vec![user.clone()]);
        let view = RenderedView::build(
            &users,
            None,
            &UserDraft::default(),
            &EditSession::Editing(user.with_field(crate::domain::UserField::Name, "Ana B")),
        );

        assert_eq!(view.user_lines, vec!["Ana — a@x.com".to_string()]);
        assert!(view.to_string().contains("Atualizar Usuário [1]: Ana B — a@x.com"));
    }
}
