//! User registry.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use meridian_shared::types::UserId;
use serde::Serialize;
use thiserror::Error;

/// A registered user.
///
/// The password is held only as an argon2id hash.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email (unique).
    pub email: String,
    /// Full display name.
    pub display_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Argon2id password hash (PHC string). Never serialized.
    #[serde(skip)]
    pub password_hash: String,
}

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Full display name.
    pub display_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Argon2id password hash.
    pub password_hash: String,
}

/// Errors from user registration.
#[derive(Debug, Error)]
pub enum UserError {
    /// The email is already registered.
    #[error("Email already registered: {0}")]
    EmailTaken(String),
}

/// In-memory user registry with an email index.
#[derive(Debug, Default)]
pub struct UserStore {
    by_id: DashMap<UserId, User>,
    by_email: DashMap<String, UserId>,
}

impl UserStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmailTaken` if the email is already registered.
    pub fn register(&self, input: NewUser) -> Result<User, UserError> {
        let user = User {
            id: UserId::new(),
            email: input.email,
            display_name: input.display_name,
            phone: input.phone,
            password_hash: input.password_hash,
        };

        // Claim the email first so concurrent registrations cannot race.
        match self.by_email.entry(user.email.to_lowercase()) {
            Entry::Occupied(_) => return Err(UserError::EmailTaken(user.email)),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        self.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    /// Looks up a user by id.
    #[must_use]
    pub fn get(&self, id: UserId) -> Option<User> {
        self.by_id.get(&id).map(|user| user.clone())
    }

    /// Looks up a user by email (case-insensitive).
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let id = *self.by_email.get(&email.to_lowercase())?;
        self.get(id)
    }
}
