use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{debug, warn};
use uuid::Uuid;

pub const CSRF_TOKEN_KEY: &str = "csrf_token";

/// Token lifetime in seconds.
const CSRF_TOKEN_TTL: i64 = 24 * 60 * 60;

pub const CSRF_FAILURE_MESSAGE: &str = "Your form has expired. Please try again.";

/// CSRF token as stored in the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfToken {
    pub value: String,
    pub created_at: i64,
}

impl CsrfToken {
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() - self.created_at > CSRF_TOKEN_TTL
    }
}

impl Default for CsrfToken {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CsrfError {
    #[error("no CSRF token in session")]
    Missing,
    #[error("CSRF token expired")]
    Expired,
    #[error("CSRF token mismatch")]
    Mismatch,
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Generate a new CSRF token and store it in the session
pub async fn generate_csrf_token(
    session: &Session,
) -> Result<String, tower_sessions::session::Error> {
    let token = CsrfToken::new();
    let value = token.value.clone();

    session.insert(CSRF_TOKEN_KEY, token).await?;

    debug!("Generated new CSRF token: {}", prefix(&value));
    Ok(value)
}

/// Get or create a CSRF token for the session
pub async fn get_or_create_csrf_token(
    session: &Session,
) -> Result<String, tower_sessions::session::Error> {
    let token: Option<CsrfToken> = session.get(CSRF_TOKEN_KEY).await?;

    match token {
        Some(existing) if !existing.is_expired() => Ok(existing.value),
        _ => generate_csrf_token(session).await,
    }
}

/// Check a submitted form token against the session. A matching token is
/// rotated so it cannot be replayed.
pub async fn validate_csrf_form_field(
    session: &Session,
    form_token: &str,
) -> Result<(), CsrfError> {
    let stored: Option<CsrfToken> = session.get(CSRF_TOKEN_KEY).await?;

    let stored = match stored {
        Some(token) if token.is_expired() => {
            warn!("CSRF token expired during form validation");
            return Err(CsrfError::Expired);
        }
        Some(token) => token,
        None => {
            warn!("No CSRF token in session for form validation");
            return Err(CsrfError::Missing);
        }
    };

    if form_token != stored.value {
        warn!(
            "CSRF form token mismatch: expected {}, got {}",
            prefix(&stored.value),
            prefix(form_token)
        );
        return Err(CsrfError::Mismatch);
    }

    debug!("CSRF form token validated, regenerating");
    generate_csrf_token(session).await?;

    Ok(())
}

fn prefix(token: &str) -> &str {
    token.get(..8).unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_csrf_token_generation() {
        let session = new_session();

        let token1 = generate_csrf_token(&session).await.unwrap();
        let token2 = generate_csrf_token(&session).await.unwrap();
        assert!(!token1.is_empty());
        assert_ne!(token1, token2, "Tokens should be unique");
    }

    #[tokio::test]
    async fn test_csrf_token_expiry() {
        let token = CsrfToken {
            value: "test".to_string(),
            created_at: chrono::Utc::now().timestamp() - 100_000,
        };
        assert!(token.is_expired());
        assert!(!CsrfToken::new().is_expired());
    }

    #[tokio::test]
    async fn test_get_or_create_csrf_token() {
        let session = new_session();

        let token1 = get_or_create_csrf_token(&session).await.unwrap();
        let token2 = get_or_create_csrf_token(&session).await.unwrap();
        assert_eq!(token1, token2);

        generate_csrf_token(&session).await.unwrap();
        let token3 = get_or_create_csrf_token(&session).await.unwrap();
        assert_ne!(token1, token3);
    }

    #[tokio::test]
    async fn valid_token_is_accepted_once() {
        let session = new_session();
        let token = get_or_create_csrf_token(&session).await.unwrap();

        assert!(validate_csrf_form_field(&session, &token).await.is_ok());
        assert!(matches!(
            validate_csrf_form_field(&session, &token).await,
            Err(CsrfError::Mismatch)
        ));
    }

    #[tokio::test]
    async fn short_or_missing_tokens_are_rejected() {
        let session = new_session();
        assert!(matches!(
            validate_csrf_form_field(&session, "abc").await,
            Err(CsrfError::Missing)
        ));

        get_or_create_csrf_token(&session).await.unwrap();
        assert!(matches!(
            validate_csrf_form_field(&session, "").await,
            Err(CsrfError::Mismatch)
        ));
    }
}
