use tower_sessions::Session;

use crate::auth::SessionIdentity;
use crate::flash::{self, Flash};

/// What the base layout needs on every page: who is logged in and the
/// notices queued since the last render.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub username: String,
    pub logged_in: bool,
    pub is_admin: bool,
    pub flashes: Vec<Flash>,
}

impl PageContext {
    pub async fn load(session: &Session) -> Self {
        let identity = SessionIdentity::load(session).await;
        let flashes = flash::take(session).await;

        match identity {
            Some(identity) => PageContext {
                is_admin: identity.is_admin(),
                username: identity.username,
                logged_in: true,
                flashes,
            },
            None => PageContext {
                flashes,
                ..Default::default()
            },
        }
    }
}
