//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for RemoteUserService and ClusterTopologyService
//! - an in-process mock backend for tests (`test-support` feature)

pub mod http;
#[cfg(any(test, feature = "test-support"))]
pub mod mock_server;

pub use http::{ApiClient, HttpTopologyService, HttpUserService};
