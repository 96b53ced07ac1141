//! Persisted session store trait.
//!
//! Defines the interface for the durable mirror of the in-memory
//! session, decoupling the session lifecycle from the specific storage
//! mechanism (JSON file, in-memory test double, etc.).

use super::model::UserProfile;
use crate::error::Result;
use async_trait::async_trait;

/// The serialized mirror of an authenticated session.
///
/// Unlike [`super::Session`], both fields are mandatory: the store only
/// ever holds complete sessions, and a partial record is reported as an
/// absent one by implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    /// Raw credential token as issued by the identity provider
    pub token: String,
    /// Profile returned by the login exchange
    pub profile: UserProfile,
}

/// An abstract store for the persisted session mirror.
///
/// The store is not a second source of truth: on startup the persisted
/// record wins exactly once (hydration), after which the in-memory
/// session owned by `SessionManager` is authoritative and every change
/// is written through.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the persisted session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(StoredSession))`: both entries present and well-formed
    /// - `Ok(None)`: no persisted session (either entry absent)
    /// - `Err(BylineError::MalformedState)`: entries present but unparseable
    /// - `Err(_)`: storage access failed
    async fn load(&self) -> Result<Option<StoredSession>>;

    /// Persists the session mirror, replacing any previous record.
    async fn save(&self, session: &StoredSession) -> Result<()>;

    /// Removes the persisted session. Succeeds when nothing is stored.
    async fn clear(&self) -> Result<()>;
}
