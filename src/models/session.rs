use serde::Serialize;

use crate::models::user::User;

/// Represents a user session: the user record plus its opaque token.
///
/// The token is a non-cryptographic identifier. Nothing verifies it; a session
/// is valid purely because both halves are present.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The signed-in user.
    pub user: User,
    /// The opaque token issued at login.
    pub token: String,
}

/// In-memory session state shared by the whole process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStore {
    /// The current user, if any.
    pub user: Option<User>,
    /// The current token, if any.
    #[serde(skip)]
    pub token: Option<String>,
    /// Whether the startup restore from storage is still running.
    pub loading: bool,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::loading()
    }
}

impl SessionStore {
    /// A store still waiting for the startup restore.
    pub fn loading() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
        }
    }

    /// A settled store with no session.
    pub fn signed_out() -> Self {
        Self {
            user: None,
            token: None,
            loading: false,
        }
    }

    /// A settled store holding `session`.
    pub fn signed_in(session: Session) -> Self {
        Self {
            user: Some(session.user),
            token: Some(session.token),
            loading: false,
        }
    }

    /// True iff both a user and a non-empty token are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns the current session when authenticated.
    pub fn session(&self) -> Option<Session> {
        match (&self.user, &self.token) {
            (Some(user), Some(token)) if !token.is_empty() => Some(Session {
                user: user.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            email: "owner@example.com".to_string(),
            name: "Owner".to_string(),
            role: Role::Merchant,
            phone: None,
            avatar_url: None,
        }
    }

    #[test]
    fn authenticated_needs_user_and_token() {
        assert!(!SessionStore::loading().is_authenticated());
        assert!(!SessionStore::signed_out().is_authenticated());

        let store = SessionStore::signed_in(Session {
            user: user(),
            token: "t".to_string(),
        });
        assert!(store.is_authenticated());
        assert!(!store.loading);

        let empty_token = SessionStore {
            user: Some(user()),
            token: Some(String::new()),
            loading: false,
        };
        assert!(!empty_token.is_authenticated());
        assert!(empty_token.session().is_none());

        let no_user = SessionStore {
            user: None,
            token: Some("t".to_string()),
            loading: false,
        };
        assert!(!no_user.is_authenticated());
    }
}
