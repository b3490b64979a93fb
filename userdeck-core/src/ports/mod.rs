//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces to the remote service. The controller depends
//! only on these traits, not on the HTTP adapter.

mod topology;
mod user_service;

#[cfg(test)]
pub(crate) mod fakes;

pub use topology::ClusterTopologyService;
pub use user_service::RemoteUserService;
