//! Session domain model.
//!
//! The `Session` entity records whether, and as whom, the user is
//! currently authenticated.

use serde::{Deserialize, Serialize};

/// Profile returned by the login exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User's display name
    pub name: String,
    /// User's email address
    pub email: String,
}

/// The client's record of the current authentication state.
///
/// Invariant: the credential token and the profile are either both
/// present or both absent. The fields are private so the invariant is
/// enforced by construction; a session is only ever populated or
/// cleared as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    token: Option<String>,
    profile: Option<UserProfile>,
}

impl Session {
    /// An unauthenticated session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session populated from a successful login exchange or from the
    /// persisted mirror.
    pub fn authenticated(token: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            token: Some(token.into()),
            profile: Some(profile),
        }
    }

    /// True iff a credential token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The current credential token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The current profile, if any.
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_has_neither_field() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.profile().is_none());
    }

    #[test]
    fn authenticated_session_has_both_fields() {
        let profile = UserProfile {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
        };
        let session = Session::authenticated("T", profile.clone());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("T"));
        assert_eq!(session.profile(), Some(&profile));
    }
}
