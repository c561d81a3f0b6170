//! In-memory session store.
//!
//! Identity resolution is deliberately simple: login issues an opaque
//! bearer token mapped to a user id, and the auth middleware resolves it
//! on every request. The core trusts the resolved user and nothing else.

use dashmap::DashMap;
use meridian_shared::types::UserId;
use uuid::Uuid;

/// Maps opaque bearer tokens to user ids.
#[derive(Debug, Default)]
pub struct SessionStore {
    tokens: DashMap<String, UserId>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh session token for a user.
    pub fn issue(&self, user: UserId) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), user);
        token
    }

    /// Resolves a token to its user, if the session exists.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).map(|user| *user)
    }

    /// Revokes a session. Returns true if one was removed.
    pub fn revoke(&self, token: &str) -> bool {
        self.tokens.remove(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_resolve() {
        let store = SessionStore::new();
        let user = UserId::new();
        let token = store.issue(user);

        assert_eq!(store.resolve(&token), Some(user));
    }

    #[test]
    fn test_unknown_token_does_not_resolve() {
        let store = SessionStore::new();
        assert_eq!(store.resolve("not-a-token"), None);
    }

    #[test]
    fn test_revoke() {
        let store = SessionStore::new();
        let token = store.issue(UserId::new());

        assert!(store.revoke(&token));
        assert!(!store.revoke(&token));
        assert_eq!(store.resolve(&token), None);
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let store = SessionStore::new();
        let user = UserId::new();
        assert_ne!(store.issue(user), store.issue(user));
    }
}
