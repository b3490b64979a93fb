//! Cluster topology port - read-only node listing

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::ClusterTopologySnapshot;

/// Read accessor for cluster node metadata
#[async_trait]
pub trait ClusterTopologyService: Send + Sync {
    /// Fetch the current node listing. No caching.
    async fn fetch_topology(&self) -> Result<ClusterTopologySnapshot>;
}
