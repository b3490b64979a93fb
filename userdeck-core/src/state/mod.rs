//! Local state containers
//!
//! Synchronous, in-memory holders of already-confirmed data. Nothing in here
//! suspends or talks to the network; the controller decides when to call
//! each mutator.

mod collection;
mod edit_session;

pub use collection::UserCollectionState;
pub use edit_session::EditSession;
