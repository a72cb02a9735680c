use crate::models::{Role, User};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session key holding the serialized [`SessionIdentity`].
pub const IDENTITY_KEY: &str = "identity";

/// Who the current session belongs to. Written once at login, read by the
/// admin guard and by page rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl SessionIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Read the identity from the session, if any. A value that no longer
    /// deserializes counts as logged out.
    pub async fn load(session: &Session) -> Option<Self> {
        session.get::<Self>(IDENTITY_KEY).await.ok().flatten()
    }

    pub async fn store(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(IDENTITY_KEY, self).await
    }
}

impl From<&User> for SessionIdentity {
    fn from(user: &User) -> Self {
        SessionIdentity {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role(),
        }
    }
}
