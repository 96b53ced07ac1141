use super::gateway::AuthGateway;
use super::model::{Session, UserProfile};
use super::provider::IdentityProvider;
use super::store::{SessionStore, StoredSession};
use crate::error::{BylineError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Owns the in-memory session and its lifecycle.
///
/// `SessionManager` is responsible for:
/// - Restoring the persisted session on startup (hydration)
/// - Running the login exchange and persisting its result
/// - Clearing the session on logout
/// - Tearing the session down when an authenticated call is answered
///   with 401
///
/// The session is exclusively owned here; collaborators read it through
/// the accessor methods and mutate it only through the lifecycle
/// methods above.
pub struct SessionManager {
    /// The single owned session object
    session: RwLock<Session>,
    /// Durable mirror of the session
    store: Arc<dyn SessionStore>,
    /// Remote login exchange
    auth: Arc<dyn AuthGateway>,
    /// Identity-provider local-state collaborator
    provider: Arc<dyn IdentityProvider>,
    /// Guards against a second login exchange while one is in flight
    login_in_flight: AtomicBool,
}

impl SessionManager {
    /// Creates a new `SessionManager` with an anonymous session.
    ///
    /// Call [`initialize`](Self::initialize) before exposing any
    /// protected operation, so a persisted session is restored first.
    pub fn new(
        store: Arc<dyn SessionStore>,
        auth: Arc<dyn AuthGateway>,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            session: RwLock::new(Session::anonymous()),
            store,
            auth,
            provider,
            login_in_flight: AtomicBool::new(false),
        }
    }

    /// Restores the persisted session, if a complete well-formed record
    /// exists.
    ///
    /// This must complete before any protected operation becomes
    /// reachable. It never fails: malformed or unreadable persisted
    /// state is treated as an absent session (and cleared so the next
    /// startup is clean), and startup continues anonymous.
    pub async fn initialize(&self) {
        match self.store.load().await {
            Ok(Some(stored)) => {
                let mut session = self.session.write().await;
                *session = Session::authenticated(stored.token, stored.profile);
                tracing::debug!(target: "session", "restored persisted session");
            }
            Ok(None) => {
                tracing::debug!(target: "session", "no persisted session, starting anonymous");
            }
            Err(err) => {
                tracing::warn!(
                    target: "session",
                    error = %err,
                    "persisted session unreadable, starting anonymous"
                );
                if let Err(err) = self.store.clear().await {
                    tracing::warn!(
                        target: "session",
                        error = %err,
                        "failed to discard unreadable session state"
                    );
                }
            }
        }
    }

    /// Exchanges an identity-provider credential for a session.
    ///
    /// All-or-nothing: the in-memory session is only replaced after the
    /// exchange succeeded and the mirror was persisted. On any failure
    /// the session is left untouched and the caller re-prompts.
    ///
    /// A second login attempt while an exchange is in flight is
    /// rejected without a network call.
    ///
    /// # Errors
    ///
    /// Returns `BylineError::AuthExchange` when the exchange is refused
    /// or unreachable, or a storage error when persisting fails.
    pub async fn login(&self, credential: &str) -> Result<UserProfile> {
        if credential.trim().is_empty() {
            return Err(BylineError::auth_exchange("credential token is empty"));
        }
        if self.login_in_flight.swap(true, Ordering::SeqCst) {
            return Err(BylineError::auth_exchange(
                "another login exchange is already in flight",
            ));
        }

        let result = self.login_exchange(credential).await;
        self.login_in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn login_exchange(&self, credential: &str) -> Result<UserProfile> {
        let profile = self.auth.login(credential).await?;

        let stored = StoredSession {
            token: credential.to_string(),
            profile: profile.clone(),
        };
        self.store.save(&stored).await?;

        let mut session = self.session.write().await;
        *session = Session::authenticated(credential, profile.clone());
        tracing::info!(target: "session", email = %profile.email, "login exchange succeeded");

        Ok(profile)
    }

    /// Clears the session in memory and in the store, and notifies the
    /// identity provider to invalidate its local state.
    ///
    /// Safe to call when already logged out.
    ///
    /// # Errors
    ///
    /// Returns a storage error when clearing the persisted mirror
    /// fails; the in-memory session is cleared regardless.
    pub async fn logout(&self) -> Result<()> {
        self.clear_in_memory().await;
        self.provider.invalidate();
        self.store.clear().await?;
        tracing::info!(target: "session", "logged out");
        Ok(())
    }

    /// Tears the session down after an unauthorized response.
    ///
    /// Same clearing effect as [`logout`](Self::logout), but invoked
    /// internally rather than by user action, and never initiates a new
    /// login. Teardown cannot fail: persisted-clear errors are logged
    /// and swallowed.
    pub async fn force_teardown(&self) {
        self.clear_in_memory().await;
        self.provider.invalidate();
        if let Err(err) = self.store.clear().await {
            tracing::warn!(
                target: "session",
                error = %err,
                "failed to clear persisted session during teardown"
            );
        }
        tracing::warn!(target: "session", "session torn down after unauthorized response");
    }

    /// True iff a credential token is present.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// The current credential token, if any.
    pub async fn current_token(&self) -> Option<String> {
        self.session.read().await.token().map(str::to_string)
    }

    /// The current profile, if any.
    pub async fn current_profile(&self) -> Option<UserProfile> {
        self.session.read().await.profile().cloned()
    }

    async fn clear_in_memory(&self) {
        let mut session = self.session.write().await;
        *session = Session::anonymous();
    }
}
