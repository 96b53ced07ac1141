//! Identity provider collaborator trait.

/// Client-local collaborator for the third-party identity provider.
///
/// The handshake that produces a credential is outside this client; the
/// only obligation towards the provider is to invalidate whatever local
/// state it keeps when the user logs out, so a later login starts from
/// a clean slate.
pub trait IdentityProvider: Send + Sync {
    /// Invalidates the provider's client-local state.
    ///
    /// Called on logout and on unauthorized teardown. Must be safe to
    /// call when there is nothing to invalidate.
    fn invalidate(&self);
}
