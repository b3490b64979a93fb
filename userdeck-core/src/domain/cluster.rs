//! Cluster topology domain model

use serde::{Deserialize, Serialize};

/// One node as reported by the cluster metadata endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterNode {
    pub address: String,
    pub datacenter: String,
    pub rack: String,
}

/// Point-in-time read of the cluster's nodes
///
/// `node_count` is reported by the server independently of `nodes` and is
/// never recomputed locally, even when the two disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterTopologySnapshot {
    pub node_count: u64,
    pub nodes: Vec<ClusterNode>,
}

impl ClusterNode {
    pub fn new(
        address: impl Into<String>,
        datacenter: impl Into<String>,
        rack: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            datacenter: datacenter.into(),
            rack: rack.into(),
        }
    }
}
