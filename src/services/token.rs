use std::sync::Arc;

use crate::{
    error::Result,
    models::{session::Session, user::User},
    navigation::Route,
    repositories::session::SessionStorage,
};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key of the JSON-encoded user.
pub const USER_KEY: &str = "user";

/// Reads and writes the session in [`SessionStorage`].
///
/// Cloning is cheap and every clone sees the same storage.
#[derive(Clone)]
pub struct TokenManager {
    storage: Arc<dyn SessionStorage>,
}

impl TokenManager {
    /// Creates a new `TokenManager`.
    ///
    /// # Arguments
    ///
    /// * `storage` - Where the token and user are kept.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    /// The stored token. Unreadable storage counts as no token.
    pub fn get_token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("⚠️ Could not read session token: {}", e);
                None
            }
        }
    }

    pub fn remove_token(&self) -> Result<()> {
        self.storage.remove_item(TOKEN_KEY)
    }

    pub fn set_user(&self, user: &User) -> Result<()> {
        let json = sonic_rs::to_string(user)?;
        self.storage.set_item(USER_KEY, &json)
    }

    /// The stored user, or `None` when absent or not valid JSON.
    pub fn get_user(&self) -> Option<User> {
        let json = match self.storage.get_item(USER_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("⚠️ Could not read stored user: {}", e);
                return None;
            }
        };

        match sonic_rs::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("⚠️ Stored user is not valid JSON: {}", e);
                None
            }
        }
    }

    pub fn remove_user(&self) -> Result<()> {
        self.storage.remove_item(USER_KEY)
    }

    /// True iff a non-empty token is stored. The token is not checked
    /// against the backend.
    pub fn is_logged_in(&self) -> bool {
        self.get_token().is_some_and(|token| !token.is_empty())
    }

    /// The current session, when both a token and a user are stored.
    pub fn session(&self) -> Option<Session> {
        let token = self.get_token().filter(|t| !t.is_empty())?;
        let user = self.get_user()?;
        Some(Session { token, user })
    }

    /// Stores a new session, replacing any previous one.
    pub fn start(&self, session: &Session) -> Result<()> {
        self.set_token(&session.token)?;
        self.set_user(&session.user)?;
        tracing::info!("✅ Session started");
        Ok(())
    }

    /// Clears the token and the user and returns where to navigate.
    ///
    /// Both removals are attempted even if the first one fails.
    pub fn logout(&self) -> Route {
        if let Err(e) = self.remove_token() {
            tracing::error!("❌ Failed to remove session token: {}", e);
        }
        if let Err(e) = self.remove_user() {
            tracing::error!("❌ Failed to remove stored user: {}", e);
        }
        tracing::info!("👋 Session cleared");
        Route::Landing
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}
