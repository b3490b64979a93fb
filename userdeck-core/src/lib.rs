//! Userdeck Core - client-side state for a user-management page
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Users, drafts, cluster nodes and the error type
//! - **ports**: Traits for the remote user store and cluster topology
//! - **adapters**: reqwest HTTP client and a mock backend
//! - **state**: Local user collection and edit session
//! - **services**: The view controller that ties them together

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod state;

use std::sync::Arc;

use adapters::{ApiClient, HttpTopologyService, HttpUserService};
use config::Config;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{ClusterNode, ClusterTopologySnapshot, User, UserDraft, UserField, UserPatch};
pub use services::{ActionOutcome, RenderedView, StartupReport, ViewController};
pub use state::{EditSession, UserCollectionState};

/// Main context for Userdeck operations
///
/// Builds the HTTP services from configuration and hands them to a fresh
/// view controller. Nothing is fetched until `controller.start()` runs.
pub struct UserdeckContext {
    pub config: Config,
    pub controller: ViewController,
}

impl UserdeckContext {
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        let user_service = Arc::new(HttpUserService::new(api.clone()));
        let topology_service = Arc::new(HttpTopologyService::new(api));

        Ok(Self {
            config,
            controller: ViewController::new(user_service, topology_service),
        })
    }
}
