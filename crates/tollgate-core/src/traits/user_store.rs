//! User store trait: the credential lookup and persistence collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::identity::{NewUser, StoredCredentials};

/// Persistence boundary for user identities.
///
/// The token subsystem only ever reads credentials through this trait; the
/// relational schema behind it is an implementation detail.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the stored hash and token claims for an identifier (email).
    /// Returns `None` when the identifier is unknown.
    async fn lookup_credentials(&self, identifier: &str) -> AppResult<Option<StoredCredentials>>;

    /// Persist a new user together with its address.
    ///
    /// A duplicate identifier is reported as
    /// [`ErrorKind::Conflict`](crate::error::ErrorKind::Conflict).
    async fn persist_user(&self, user: &NewUser) -> AppResult<()>;
}
