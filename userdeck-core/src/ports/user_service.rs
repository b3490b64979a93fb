//! Remote user service port - CRUD over user records

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{User, UserDraft, UserPatch};

/// Remote user store
///
/// Every method is a single request/response exchange. Implementations never
/// retry and never touch local state; applying a result is the caller's job.
#[async_trait]
pub trait RemoteUserService: Send + Sync {
    /// Fetch the full user collection in server order
    async fn list(&self) -> Result<Vec<User>>;

    /// Fetch one user by id
    async fn get(&self, id: &str) -> Result<User>;

    /// Create a user from a draft; the returned id is server-assigned
    async fn create(&self, draft: &UserDraft) -> Result<User>;

    /// Overwrite name and email of an existing user
    ///
    /// The response body is discarded. Callers apply the record they already
    /// hold once this returns `Ok`.
    async fn update(&self, id: &str, patch: &UserPatch) -> Result<()>;

    /// Delete a user
    async fn remove(&self, id: &str) -> Result<()>;
}
