//! Identity provider local-state collaborator.

use byline_core::session::IdentityProvider;

/// Stand-in for the identity provider's logout hook.
///
/// The credential handshake happens outside this client, so there is no
/// provider SDK state to drop here; invalidation is logged and the
/// provider-side session is left to expire on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIdentityProvider;

impl IdentityProvider for DefaultIdentityProvider {
    fn invalidate(&self) {
        tracing::debug!(target: "session", "identity provider local state invalidated");
    }
}
