//! Identity store: registration and session-token authentication.

use std::collections::HashMap;

use rand::RngCore;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, User};

/// Generate an opaque session token: 16 random bytes, hex-encoded
/// (128 bits of entropy, 32 characters on the wire).
fn generate_session_token() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// In-memory user store.
///
/// Registration only appends; nothing ever removes or rewrites a user, so
/// `authenticate` can run under the read lock.
pub struct UserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new user and issue their session token.
    ///
    /// Duplicate usernames and emails are accepted as given; there is no
    /// uniqueness check.
    pub async fn register(&self, username: String, name: String, email: String) -> User {
        let user = User {
            id: Uuid::new_v4(),
            username,
            name,
            email,
            session_token: generate_session_token(),
        };
        tracing::info!(user_id = %user.id, username = %user.username, "Registered user");
        self.users.write().await.insert(user.id, user.clone());
        user
    }

    /// Resolve a session token to the user id that owns it.
    ///
    /// Linear scan over all registered users; tokens are unique so at most
    /// one can match. O(n) is a deliberate choice at this scale.
    pub async fn authenticate(&self, token: &str) -> Result<Uuid, StoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.session_token == token)
            .map(|user| user.id)
            .ok_or(StoreError::Unauthorized)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
