//! Login exchange gateway trait.

use super::model::UserProfile;
use crate::error::Result;
use async_trait::async_trait;

/// Remote gateway for the login exchange.
///
/// Exchanges an opaque identity-provider credential for an
/// application-level session.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Performs the login exchange.
    ///
    /// # Returns
    ///
    /// - `Ok(UserProfile)`: exchange accepted, profile extracted from the response
    /// - `Err(BylineError::AuthExchange)`: non-200 response or network failure
    async fn login(&self, credential: &str) -> Result<UserProfile>;
}
