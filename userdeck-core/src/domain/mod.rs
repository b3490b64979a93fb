//! Core domain entities
//!
//! Plain data exchanged with the remote service. No I/O here.

mod cluster;
pub mod result;
mod user;

pub use cluster::{ClusterNode, ClusterTopologySnapshot};
pub use user::{User, UserDraft, UserField, UserPatch};
